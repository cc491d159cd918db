// ==========================================
// KS Clothing 订单管理 - 订单记录
// ==========================================
// 职责: 固定 10 列的订单行结构，列序即线上顺序
// 红线: Date / Order ID 追加后不可变
// ==========================================

use crate::domain::types::CodPayment;
use serde::{Deserialize, Serialize};

/// 订单行固定列数
pub const COLUMN_COUNT: usize = 10;

// ==========================================
// OrderField - 订单列
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    Date,
    OrderId,
    TrackingId,
    CustomerName,
    Phone,
    ProductDetails,
    Quantity,
    DeliveryCost,
    TotalPrice,
    CodPayment,
}

impl OrderField {
    /// 按列序排列的全部列
    pub const ALL: [OrderField; COLUMN_COUNT] = [
        OrderField::Date,
        OrderField::OrderId,
        OrderField::TrackingId,
        OrderField::CustomerName,
        OrderField::Phone,
        OrderField::ProductDetails,
        OrderField::Quantity,
        OrderField::DeliveryCost,
        OrderField::TotalPrice,
        OrderField::CodPayment,
    ];

    /// 列下标（从 0 开始）
    pub fn index(self) -> usize {
        self as usize
    }

    /// 规范表头
    pub fn header(self) -> &'static str {
        match self {
            OrderField::Date => "Date",
            OrderField::OrderId => "Order ID",
            OrderField::TrackingId => "Tracking ID",
            OrderField::CustomerName => "Customer Name",
            OrderField::Phone => "Phone",
            OrderField::ProductDetails => "Product Details",
            OrderField::Quantity => "Quantity",
            OrderField::DeliveryCost => "Delivery Cost",
            OrderField::TotalPrice => "Total Price",
            OrderField::CodPayment => "COD Payment",
        }
    }
}

/// 10 个规范表头（导出文件首行）
pub fn canonical_headers() -> Vec<String> {
    OrderField::ALL
        .iter()
        .map(|f| f.header().to_string())
        .collect()
}

// ==========================================
// OrderRecord - 订单记录
// ==========================================
/// 一条已持久化（或即将持久化）的订单行
///
/// 所有字段都以线上字符串形式保存：存量数据可能不规范，
/// 更新时必须原样写回未改动的值。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderRecord {
    pub date: String,
    pub order_id: String,
    pub tracking_id: String,
    pub customer_name: String,
    pub phone: String,
    pub product_details: String,
    pub quantity: String,
    pub delivery_cost: String,
    pub total_price: String,
    pub cod_payment: String,
}

impl OrderRecord {
    /// 从表格行构造；不足 10 列的行以空串补齐，多余列忽略
    pub fn from_row(row: &[String]) -> Self {
        let cell = |field: OrderField| row.get(field.index()).cloned().unwrap_or_default();
        Self {
            date: cell(OrderField::Date),
            order_id: cell(OrderField::OrderId),
            tracking_id: cell(OrderField::TrackingId),
            customer_name: cell(OrderField::CustomerName),
            phone: cell(OrderField::Phone),
            product_details: cell(OrderField::ProductDetails),
            quantity: cell(OrderField::Quantity),
            delivery_cost: cell(OrderField::DeliveryCost),
            total_price: cell(OrderField::TotalPrice),
            cod_payment: cell(OrderField::CodPayment),
        }
    }

    /// 转为按列序排列的表格行
    pub fn to_row(&self) -> Vec<String> {
        OrderField::ALL
            .iter()
            .map(|f| self.get(*f).to_string())
            .collect()
    }

    /// 按列读取
    pub fn get(&self, field: OrderField) -> &str {
        match field {
            OrderField::Date => &self.date,
            OrderField::OrderId => &self.order_id,
            OrderField::TrackingId => &self.tracking_id,
            OrderField::CustomerName => &self.customer_name,
            OrderField::Phone => &self.phone,
            OrderField::ProductDetails => &self.product_details,
            OrderField::Quantity => &self.quantity,
            OrderField::DeliveryCost => &self.delivery_cost,
            OrderField::TotalPrice => &self.total_price,
            OrderField::CodPayment => &self.cod_payment,
        }
    }

    /// COD 标记（宽松解析存量值）
    pub fn cod(&self) -> CodPayment {
        CodPayment::from_stored(&self.cod_payment)
    }

    /// 生成 "表头: 值" 形式的展示行
    ///
    /// `headers` 缺失的列使用规范表头。
    pub fn labelled_fields(&self, headers: &[String]) -> Vec<String> {
        OrderField::ALL
            .iter()
            .map(|f| {
                let header = headers
                    .get(f.index())
                    .map(String::as_str)
                    .unwrap_or_else(|| f.header());
                format!("{}: {}", header, self.get(*f))
            })
            .collect()
    }
}

// ==========================================
// RawOrderInput - 表单原始输入
// ==========================================
/// 新建订单表单提交的原始字符串（未校验）
///
/// Date 与 Order ID 由系统生成，不在表单中。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawOrderInput {
    pub tracking_id: String,
    pub customer_name: String,
    pub phone: String,
    pub product_details: String,
    pub quantity: String,
    pub delivery_cost: String,
    pub total_price: String,
    pub cod_payment: String,
}

/// 定位到表格中的订单（行号从 1 开始，第 1 行为表头）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedOrder {
    pub row_position: usize,
    pub record: OrderRecord,
}
