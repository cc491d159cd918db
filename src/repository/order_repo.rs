// ==========================================
// KS Clothing 订单管理 - 订单仓储
// ==========================================
// 职责: 新建 / 查询 / 更新订单，读写远程表格
// 红线:
// - 校验在任何写入之前完成，失败时不产生写入
// - Date / Order ID 一经追加不可修改
// - 远程写入失败原样上报，不重试
// ==========================================
// 查询为全表 O(n) 扫描，不维护索引。
// ==========================================

use crate::domain::{LocatedOrder, OrderField, OrderRecord, RawOrderInput};
use crate::engine::{OrderIdAllocator, RecordValidator};
use crate::repository::error::{OrderError, OrderResult};
use crate::store::{RemoteTable, TableError};
use chrono::{Local, NaiveDate};
use std::collections::HashSet;

fn read_err(err: TableError) -> OrderError {
    OrderError::RemoteReadError(err.to_string())
}

fn write_err(err: TableError) -> OrderError {
    OrderError::RemoteWriteError(err.to_string())
}

// ==========================================
// OrderRepository - 订单仓储
// ==========================================
/// 订单仓储
///
/// 表格句柄在启动时获取一次，通过构造函数注入。
pub struct OrderRepository<T: RemoteTable> {
    table: T,
    allocator: OrderIdAllocator,
    validator: RecordValidator,
}

impl<T: RemoteTable> OrderRepository<T> {
    /// 使用默认订单号规则（KS + 两位补零）创建
    pub fn new(table: T) -> Self {
        Self::with_allocator(table, OrderIdAllocator::default())
    }

    pub fn with_allocator(table: T, allocator: OrderIdAllocator) -> Self {
        Self {
            table,
            allocator,
            validator: RecordValidator,
        }
    }

    /// 底层表格
    pub fn table(&self) -> &T {
        &self.table
    }

    /// 预览下一个订单号（新建表单打开时展示）
    pub fn preview_next_order_id(&self) -> OrderResult<String> {
        let ids = self
            .table
            .read_column(OrderField::OrderId.index())
            .map_err(read_err)?;
        Ok(self.allocator.next_order_id(&ids)?)
    }

    /// 新建订单（日期取本地当天）
    pub fn create_order(&self, raw: &RawOrderInput) -> OrderResult<OrderRecord> {
        self.create_order_on(raw, Local::now().date_naive())
    }

    /// 新建订单
    ///
    /// # 流程
    /// 1. 读取 Order ID 列，分配下一个订单号
    /// 2. 读取 Tracking ID 列，校验并归一化表单
    /// 3. 追加一行
    ///
    /// # 返回
    /// - Ok(OrderRecord): 已写入的订单
    /// - Err(InvalidIdentifierFormat): 表格中最后一个订单号已损坏
    /// - Err(EmptyField / DuplicateTrackingId / NotANumber / InvalidEnum): 表单错误，未写入
    /// - Err(RemoteReadError / RemoteWriteError): 表格访问失败
    pub fn create_order_on(
        &self,
        raw: &RawOrderInput,
        date: NaiveDate,
    ) -> OrderResult<OrderRecord> {
        let order_id = self.preview_next_order_id()?;
        let tracking_ids = self.existing_tracking_ids()?;

        let record = self
            .validator
            .validate(date, &order_id, raw, &tracking_ids)
            .map_err(|e| {
                tracing::warn!(order_id = %order_id, error = %e, "新建订单校验失败");
                OrderError::from(e)
            })?;

        self.table
            .append_row(&record.to_row())
            .map_err(write_err)?;

        tracing::info!(
            order_id = %record.order_id,
            tracking_id = %record.tracking_id,
            "订单已新建"
        );
        Ok(record)
    }

    /// 按 Order ID 精确查找
    ///
    /// # 返回
    /// - Ok(LocatedOrder): 订单及其行号（用于原位更新）
    /// - Err(NotFound): 无匹配
    pub fn find_by_order_id(&self, order_id: &str) -> OrderResult<LocatedOrder> {
        self.scan(|record| record.order_id == order_id)?
            .ok_or_else(|| OrderError::NotFound(format!("Order ID={}", order_id)))
    }

    /// 按 Order ID 或 Tracking ID 查找，返回表格顺序中的第一条
    pub fn find_by_order_or_tracking_id(&self, query: &str) -> OrderResult<LocatedOrder> {
        self.scan(|record| record.order_id == query || record.tracking_id == query)?
            .ok_or_else(|| OrderError::NotFound(format!("Order ID / Tracking ID={}", query)))
    }

    /// 原位更新订单
    ///
    /// # 参数
    /// - row_position: 表格行号（从 1 开始，由查询结果提供）
    /// - updated: 编辑后的字段
    ///
    /// # 说明
    /// - Date / Order ID 取该行当前持久化值，忽略调用方传入值
    /// - COD 归一化为 TRUE / FALSE，其余字段去首尾空白
    /// - 整行一次写回
    pub fn update_order(
        &self,
        row_position: usize,
        updated: &OrderRecord,
    ) -> OrderResult<OrderRecord> {
        let rows = self.read_rows()?;
        if row_position < 2 || row_position > rows.len() {
            return Err(OrderError::NotFound(format!("第 {} 行", row_position)));
        }

        let persisted = OrderRecord::from_row(&rows[row_position - 1]);
        let record = self.validator.normalize_update(&persisted, updated);

        self.table
            .write_range(row_position, &record.to_row())
            .map_err(|e| {
                tracing::warn!(row_position, error = %e, "订单更新写入失败");
                write_err(e)
            })?;

        tracing::info!(order_id = %record.order_id, row_position, "订单已更新");
        Ok(record)
    }

    /// 全部订单（不含表头，按表格顺序）
    pub fn list_orders(&self) -> OrderResult<Vec<OrderRecord>> {
        let rows = self.read_rows()?;
        Ok(rows.iter().skip(1).map(|row| OrderRecord::from_row(row)).collect())
    }

    /// 表格表头（第 1 行）；空表返回空列表
    pub fn headers(&self) -> OrderResult<Vec<String>> {
        Ok(self.read_rows()?.into_iter().next().unwrap_or_default())
    }

    fn read_rows(&self) -> OrderResult<Vec<Vec<String>>> {
        self.table.read_all_rows().map_err(read_err)
    }

    fn existing_tracking_ids(&self) -> OrderResult<HashSet<String>> {
        let column = self
            .table
            .read_column(OrderField::TrackingId.index())
            .map_err(read_err)?;
        Ok(column.into_iter().skip(1).collect())
    }

    /// 跳过表头，按表格顺序返回第一条满足条件的订单
    fn scan<F>(&self, predicate: F) -> OrderResult<Option<LocatedOrder>>
    where
        F: Fn(&OrderRecord) -> bool,
    {
        let rows = self.read_rows()?;
        tracing::debug!(rows = rows.len(), "全表扫描");

        Ok(rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, row)| LocatedOrder {
                row_position: idx + 1,
                record: OrderRecord::from_row(row),
            })
            .find(|located| predicate(&located.record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTable;

    fn raw(tracking_id: &str) -> RawOrderInput {
        RawOrderInput {
            tracking_id: tracking_id.to_string(),
            customer_name: "Nimal".to_string(),
            phone: "0771234567".to_string(),
            product_details: "Shirt".to_string(),
            quantity: "1".to_string(),
            delivery_cost: "350".to_string(),
            total_price: "2500".to_string(),
            cod_payment: "Yes".to_string(),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let repo = OrderRepository::new(MemoryTable::with_canonical_headers());
        let first = repo.create_order_on(&raw("TRK1"), day()).unwrap();
        let second = repo.create_order_on(&raw("TRK2"), day()).unwrap();

        assert_eq!(first.order_id, "KS01");
        assert_eq!(second.order_id, "KS02");
        assert_eq!(repo.preview_next_order_id().unwrap(), "KS03");
    }

    #[test]
    fn test_find_returns_row_position() {
        let repo = OrderRepository::new(MemoryTable::with_canonical_headers());
        repo.create_order_on(&raw("TRK1"), day()).unwrap();
        repo.create_order_on(&raw("TRK2"), day()).unwrap();

        let located = repo.find_by_order_id("KS02").unwrap();
        assert_eq!(located.row_position, 3);
        assert_eq!(located.record.tracking_id, "TRK2");
    }

    #[test]
    fn test_header_row_is_never_matched() {
        let repo = OrderRepository::new(MemoryTable::with_canonical_headers());
        assert!(matches!(
            repo.find_by_order_id("Order ID"),
            Err(OrderError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_rejects_header_position() {
        let repo = OrderRepository::new(MemoryTable::with_canonical_headers());
        let result = repo.update_order(1, &OrderRecord::default());
        assert!(matches!(result, Err(OrderError::NotFound(_))));
    }
}
