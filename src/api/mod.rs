// ==========================================
// KS Clothing 订单管理 - API 层
// ==========================================
// 职责: 为展示层提供订单操作入口
// ==========================================

pub mod order_api;

pub use order_api::{parse_filter, OrderApi, COD_FILTER_OPTIONS};
