// ==========================================
// KS Clothing 订单管理 - 远程表格存储层
// ==========================================
// 职责: 定义行列寻址的表格接口,屏蔽具体存储
// 约束: 启动时获取一次句柄,以依赖注入方式传给仓储
// ==========================================

pub mod error;
pub mod memory;
pub mod sheet_loader;
pub mod sqlite;

use std::sync::Arc;

pub use error::{LoadError, LoadResult, TableError, TableResult};
pub use memory::MemoryTable;
pub use sheet_loader::load_sheet_rows;
pub use sqlite::SqliteTable;

// ==========================================
// RemoteTable Trait
// ==========================================
// 用途: 订单仓储访问表格的唯一通道
// 实现者: SqliteTable, MemoryTable
//
// 行号从 1 开始,第 1 行为表头;列下标从 0 开始。
pub trait RemoteTable: Send + Sync {
    /// 读取整列（按行序），末尾的空单元格被丢弃
    fn read_column(&self, index: usize) -> TableResult<Vec<String>>;

    /// 读取整张表（第一行为表头）
    fn read_all_rows(&self) -> TableResult<Vec<Vec<String>>>;

    /// 在表尾追加一行
    fn append_row(&self, values: &[String]) -> TableResult<()>;

    /// 整行替换第 `row_index` 行（单次调用内原子）
    fn write_range(&self, row_index: usize, values: &[String]) -> TableResult<()>;
}

impl<T: RemoteTable + ?Sized> RemoteTable for Arc<T> {
    fn read_column(&self, index: usize) -> TableResult<Vec<String>> {
        (**self).read_column(index)
    }

    fn read_all_rows(&self) -> TableResult<Vec<Vec<String>>> {
        (**self).read_all_rows()
    }

    fn append_row(&self, values: &[String]) -> TableResult<()> {
        (**self).append_row(values)
    }

    fn write_range(&self, row_index: usize, values: &[String]) -> TableResult<()> {
        (**self).write_range(row_index, values)
    }
}

/// 从整表中抽取一列，并去掉末尾空单元格
pub(crate) fn column_of(rows: &[Vec<String>], index: usize) -> Vec<String> {
    let mut column: Vec<String> = rows
        .iter()
        .map(|row| row.get(index).cloned().unwrap_or_default())
        .collect();
    while column.last().is_some_and(|v| v.is_empty()) {
        column.pop();
    }
    column
}
