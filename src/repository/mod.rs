// ==========================================
// KS Clothing 订单管理 - 订单仓储层
// ==========================================
// 职责: 编排订单号分配、校验与远程表格读写
// 约束: 表格句柄通过构造函数注入，不使用全局状态
// ==========================================

pub mod error;
pub mod order_repo;

// 重导出核心仓储
pub use error::{OrderError, OrderResult};
pub use order_repo::OrderRepository;
