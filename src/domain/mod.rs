// ==========================================
// KS Clothing 订单管理 - 领域模型层
// ==========================================
// 职责: 订单记录结构、列定义、COD 类型
// 红线: 不含数据访问逻辑,不含校验逻辑
// ==========================================

pub mod order;
pub mod types;

// 重导出核心类型
pub use order::{
    canonical_headers, LocatedOrder, OrderField, OrderRecord, RawOrderInput, COLUMN_COUNT,
};
pub use types::{is_affirmative, CodFilter, CodPayment, COD_FALSE, COD_TRUE};
