// ==========================================
// KS Clothing 订单管理 - 订单过滤
// ==========================================
// 条件: COD 状态 + 日期区间（两端均为闭区间，缺省端不限）
// 约束: Date 无法解析的行静默跳过，不报错
// ==========================================

use crate::domain::{CodFilter, OrderRecord};
use chrono::NaiveDate;

/// 解析 YYYY-MM-DD 日期（忽略首尾空白）
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub cod: CodFilter,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl OrderFilter {
    pub fn new(cod: CodFilter, from_date: Option<NaiveDate>, to_date: Option<NaiveDate>) -> Self {
        Self {
            cod,
            from_date,
            to_date,
        }
    }

    /// 单行判定；Date 不可解析时返回 false
    pub fn matches(&self, record: &OrderRecord) -> bool {
        let Some(date) = parse_iso_date(&record.date) else {
            return false;
        };

        let date_match = self.from_date.map_or(true, |from| date >= from)
            && self.to_date.map_or(true, |to| date <= to);

        date_match && self.cod.matches(&record.cod_payment)
    }

    /// 按表格顺序返回满足条件的行
    pub fn apply<'a, I>(&self, records: I) -> Vec<OrderRecord>
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let mut skipped = 0usize;
        let mut matched = Vec::new();

        for record in records {
            if parse_iso_date(&record.date).is_none() {
                skipped += 1;
                continue;
            }
            if self.matches(record) {
                matched.push(record.clone());
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "跳过 Date 无法解析的行");
        }
        tracing::debug!(
            cod = %self.cod,
            from = ?self.from_date,
            to = ?self.to_date,
            matched = matched.len(),
            "订单过滤完成"
        );
        matched
    }
}
