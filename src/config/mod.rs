// ==========================================
// KS Clothing 订单管理 - 配置层
// ==========================================
// 职责: 应用配置加载、校验与环境变量覆写
// 存储: JSON 配置文件
// ==========================================

pub mod app_config;

// 重导出核心配置
pub use app_config::{
    default_config_path, get_default_db_path, AppConfig, ConfigError, LogFormat,
    CONFIG_PATH_ENV, DB_PATH_ENV, DEFAULT_SHEET_NAME,
};
