// ==========================================
// KS Clothing 订单管理 - 核心库
// ==========================================
// 职责: 订单记录同步层
// - 订单号分配、表单校验与归一化
// - 远程表格读写（新建 / 查询 / 原位更新）
// - 过滤与导出
// 系统定位: 单操作员、单会话、同步请求/响应
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 订单记录与类型
pub mod domain;

// 表格存储层 - 远程表格接口与适配器
pub mod store;

// 引擎层 - 分配、校验、过滤、导出
pub mod engine;

// 数据仓储层 - 订单读写编排
pub mod repository;

// API 层 - 操作界面入口
pub mod api;

// 配置层
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{CodFilter, CodPayment, LocatedOrder, OrderField, OrderRecord, RawOrderInput};

pub use engine::{OrderExporter, OrderFilter, OrderIdAllocator, RecordValidator};

pub use repository::{OrderError, OrderRepository, OrderResult};

pub use store::{MemoryTable, RemoteTable, SqliteTable};

pub use api::OrderApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "KS Clothing Order Manager";
