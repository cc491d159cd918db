// ==========================================
// KS Clothing 订单管理 - 订单记录校验器
// ==========================================
// 职责: 将表单原始字符串转换为规范的订单行
// 约束: 纯函数，不做任何 I/O；已有 Tracking ID 由调用方传入
// ==========================================

use crate::domain::{CodPayment, OrderField, OrderRecord, RawOrderInput};
use crate::engine::error::ValidationError;
use chrono::NaiveDate;
use std::collections::HashSet;

/// COD 表单可选值
pub const COD_OPTIONS: &str = "Yes, No";

pub struct RecordValidator;

impl RecordValidator {
    /// 校验新建订单表单
    ///
    /// 校验顺序：
    /// 1. Tracking ID 非空
    /// 2. Tracking ID 未被占用
    /// 3. Phone / Quantity / Delivery Cost / Total Price 为整数
    /// 4. COD 为 Yes / No
    ///
    /// 整数字段重新序列化为规范十进制串（去掉前导零与空白），
    /// 自由文本字段只做首尾去空白。
    pub fn validate(
        &self,
        date: NaiveDate,
        order_id: &str,
        raw: &RawOrderInput,
        existing_tracking_ids: &HashSet<String>,
    ) -> Result<OrderRecord, ValidationError> {
        let tracking_id = raw.tracking_id.trim();
        if tracking_id.is_empty() {
            return Err(ValidationError::EmptyField {
                field: OrderField::TrackingId.header(),
            });
        }
        if existing_tracking_ids.contains(tracking_id) {
            return Err(ValidationError::DuplicateTrackingId(tracking_id.to_string()));
        }

        let phone = self.canonical_integer(OrderField::Phone, &raw.phone)?;
        let quantity = self.canonical_integer(OrderField::Quantity, &raw.quantity)?;
        let delivery_cost = self.canonical_integer(OrderField::DeliveryCost, &raw.delivery_cost)?;
        let total_price = self.canonical_integer(OrderField::TotalPrice, &raw.total_price)?;

        let cod = CodPayment::from_option(&raw.cod_payment).ok_or_else(|| {
            ValidationError::InvalidEnum {
                field: OrderField::CodPayment.header(),
                value: raw.cod_payment.trim().to_string(),
                allowed: COD_OPTIONS,
            }
        })?;

        Ok(OrderRecord {
            date: date.format("%Y-%m-%d").to_string(),
            order_id: order_id.to_string(),
            tracking_id: tracking_id.to_string(),
            customer_name: raw.customer_name.trim().to_string(),
            phone,
            product_details: raw.product_details.trim().to_string(),
            quantity,
            delivery_cost,
            total_price,
            cod_payment: cod.as_stored().to_string(),
        })
    }

    /// 整理编辑后的订单行
    ///
    /// - Date / Order ID 强制取原持久化值
    /// - COD 宽松归一化为 TRUE / FALSE
    /// - 其余字段去首尾空白（不做整数校验）
    pub fn normalize_update(&self, persisted: &OrderRecord, edited: &OrderRecord) -> OrderRecord {
        OrderRecord {
            date: persisted.date.clone(),
            order_id: persisted.order_id.clone(),
            tracking_id: edited.tracking_id.trim().to_string(),
            customer_name: edited.customer_name.trim().to_string(),
            phone: edited.phone.trim().to_string(),
            product_details: edited.product_details.trim().to_string(),
            quantity: edited.quantity.trim().to_string(),
            delivery_cost: edited.delivery_cost.trim().to_string(),
            total_price: edited.total_price.trim().to_string(),
            cod_payment: CodPayment::from_stored(&edited.cod_payment)
                .as_stored()
                .to_string(),
        }
    }

    /// 解析十进制整数并返回规范字符串
    pub fn canonical_integer(
        &self,
        field: OrderField,
        value: &str,
    ) -> Result<String, ValidationError> {
        let trimmed = value.trim();
        canonical_decimal(trimmed).ok_or_else(|| ValidationError::NotANumber {
            field: field.header(),
            value: trimmed.to_string(),
        })
    }
}

/// 十进制整数串规范化（不限位数）
///
/// 可选符号 + ASCII 数字；去掉 `+` 与前导零，全零为 "0"（`-0` 亦为 "0"）。
fn canonical_decimal(raw: &str) -> Option<String> {
    let (negative, digits) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Some("0".to_string());
    }
    Some(if negative {
        format!("-{}", significant)
    } else {
        significant.to_string()
    })
}
