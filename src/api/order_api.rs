// ==========================================
// KS Clothing 订单管理 - 订单 API
// ==========================================
// 职责: 对应操作界面的四个入口（新建、更新、查询、浏览/导出）
// 输入: 展示层提供的原始字符串（不可信）
// 输出: 订单记录或 OrderError，由展示层原样提示
// ==========================================

use crate::domain::{canonical_headers, CodFilter, LocatedOrder, OrderRecord, RawOrderInput};
use crate::engine::{parse_iso_date, ExportSummary, OrderExporter, OrderFilter};
use crate::repository::{OrderError, OrderRepository, OrderResult};
use crate::store::RemoteTable;
use chrono::NaiveDate;
use std::path::Path;

/// COD 过滤可选值
pub const COD_FILTER_OPTIONS: &str = "All, Yes, No";

/// 解析浏览页的过滤输入
///
/// - cod: All / Yes / No（忽略大小写）
/// - from / to: YYYY-MM-DD，空白表示不限
pub fn parse_filter(cod: &str, from: &str, to: &str) -> OrderResult<OrderFilter> {
    let cod_filter = CodFilter::parse(cod).ok_or_else(|| OrderError::InvalidEnum {
        field: "COD Payment",
        value: cod.trim().to_string(),
        allowed: COD_FILTER_OPTIONS,
    })?;
    let from_date = parse_optional_date("From Date", from)?;
    let to_date = parse_optional_date("To Date", to)?;
    Ok(OrderFilter::new(cod_filter, from_date, to_date))
}

fn parse_optional_date(field: &'static str, raw: &str) -> OrderResult<Option<NaiveDate>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_iso_date(trimmed)
        .map(Some)
        .ok_or_else(|| OrderError::InvalidDate {
            field,
            value: trimmed.to_string(),
        })
}

// ==========================================
// OrderApi
// ==========================================
pub struct OrderApi<T: RemoteTable> {
    repo: OrderRepository<T>,
    exporter: OrderExporter,
}

impl<T: RemoteTable> OrderApi<T> {
    pub fn new(repo: OrderRepository<T>) -> Self {
        Self {
            repo,
            exporter: OrderExporter,
        }
    }

    pub fn repository(&self) -> &OrderRepository<T> {
        &self.repo
    }

    // ===== 新建订单 =====

    /// 新建表单打开时展示的订单号
    pub fn next_order_id(&self) -> OrderResult<String> {
        self.repo.preview_next_order_id()
    }

    pub fn add_order(&self, raw: &RawOrderInput) -> OrderResult<OrderRecord> {
        self.repo.create_order(raw)
    }

    // ===== 更新订单 =====

    /// 按 Order ID 取出待编辑的订单
    pub fn fetch_for_update(&self, order_id: &str) -> OrderResult<LocatedOrder> {
        self.repo.find_by_order_id(order_id.trim())
    }

    pub fn save_changes(
        &self,
        row_position: usize,
        edited: &OrderRecord,
    ) -> OrderResult<OrderRecord> {
        self.repo.update_order(row_position, edited)
    }

    // ===== 查询订单 =====

    /// 按 Order ID 或 Tracking ID 查询；空白查询在读表之前拒绝
    pub fn search(&self, query: &str) -> OrderResult<LocatedOrder> {
        let query = query.trim();
        if query.is_empty() {
            return Err(OrderError::EmptyField {
                field: "Order ID / Tracking ID",
            });
        }
        self.repo.find_by_order_or_tracking_id(query)
    }

    /// "表头: 值" 形式的展示行（表头取自表格第 1 行）
    pub fn describe(&self, record: &OrderRecord) -> OrderResult<Vec<String>> {
        let headers = self.repo.headers()?;
        Ok(record.labelled_fields(&headers))
    }

    /// 批量生成展示行，表头只读取一次
    pub fn describe_all(&self, records: &[OrderRecord]) -> OrderResult<Vec<Vec<String>>> {
        let headers = self.repo.headers()?;
        Ok(records
            .iter()
            .map(|record| record.labelled_fields(&headers))
            .collect())
    }

    // ===== 浏览 / 导出 =====

    /// 按过滤输入浏览订单；过滤输入非法时不读表
    pub fn view_orders(&self, cod: &str, from: &str, to: &str) -> OrderResult<Vec<OrderRecord>> {
        let filter = parse_filter(cod, from, to)?;
        let orders = self.repo.list_orders()?;
        Ok(filter.apply(&orders))
    }

    /// 导出浏览结果
    ///
    /// 表头优先取表格第 1 行，表格无表头时使用规范表头。
    pub fn export_orders(
        &self,
        rows: &[OrderRecord],
        destination: &Path,
    ) -> OrderResult<ExportSummary> {
        if rows.is_empty() {
            return Err(OrderError::NothingToExport);
        }

        let mut headers = self.repo.headers()?;
        if headers.is_empty() {
            headers = canonical_headers();
        }
        Ok(self.exporter.export(rows, &headers, destination)?)
    }
}
