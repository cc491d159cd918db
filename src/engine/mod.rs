// ==========================================
// KS Clothing 订单管理 - 引擎层
// ==========================================
// 职责: 订单号分配、表单校验与归一化、过滤、导出
// 红线: 引擎只处理内存数据，不直接访问表格
// ==========================================

pub mod error;
pub mod exporter;
pub mod filter;
pub mod id_allocator;
pub mod validator;

// 重导出核心类型
pub use error::{AllocationError, ExportError, ValidationError};
pub use exporter::{ExportFormat, ExportSummary, OrderExporter, EXPORT_SHEET_NAME};
pub use filter::{parse_iso_date, OrderFilter};
pub use id_allocator::{OrderIdAllocator, DEFAULT_ORDER_ID_MIN_WIDTH, DEFAULT_ORDER_ID_PREFIX};
pub use validator::RecordValidator;
