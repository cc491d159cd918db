// ==========================================
// KS Clothing 订单管理 - 内存表格
// ==========================================
// 职责: 进程内 RemoteTable 实现（测试、临时数据）
// ==========================================

use crate::domain::canonical_headers;
use crate::store::error::{TableError, TableResult};
use crate::store::{column_of, RemoteTable};
use std::sync::{Mutex, MutexGuard};

/// 内存表格，第 1 行为表头
pub struct MemoryTable {
    rows: Mutex<Vec<Vec<String>>>,
}

impl MemoryTable {
    /// 以给定表头创建空表
    pub fn new(headers: Vec<String>) -> Self {
        Self::from_rows(vec![headers])
    }

    /// 以 10 个规范表头创建空表
    pub fn with_canonical_headers() -> Self {
        Self::new(canonical_headers())
    }

    /// 以现有行创建（第一行视为表头）
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// 当前全部行的拷贝
    pub fn snapshot(&self) -> TableResult<Vec<Vec<String>>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> TableResult<MutexGuard<'_, Vec<Vec<String>>>> {
        self.rows
            .lock()
            .map_err(|e| TableError::Lock(e.to_string()))
    }
}

impl RemoteTable for MemoryTable {
    fn read_column(&self, index: usize) -> TableResult<Vec<String>> {
        let rows = self.lock()?;
        Ok(column_of(&rows, index))
    }

    fn read_all_rows(&self) -> TableResult<Vec<Vec<String>>> {
        self.snapshot()
    }

    fn append_row(&self, values: &[String]) -> TableResult<()> {
        self.lock()?.push(values.to_vec());
        Ok(())
    }

    fn write_range(&self, row_index: usize, values: &[String]) -> TableResult<()> {
        let mut rows = self.lock()?;
        let row_count = rows.len();
        // 第 1 行为表头，不允许覆盖
        if row_index < 2 || row_index > row_count {
            return Err(TableError::RowOutOfRange {
                row: row_index,
                row_count,
            });
        }
        rows[row_index - 1] = values.to_vec();
        Ok(())
    }
}
