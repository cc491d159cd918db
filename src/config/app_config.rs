// ==========================================
// KS Clothing 订单管理 - 应用配置
// ==========================================
// 加载顺序: 默认值 → JSON 配置文件 → 环境变量覆写
// 配置文件: $KS_ORDER_MANAGER_CONFIG 或 <config_dir>/ks-order-manager/config.json
// ==========================================

use crate::engine::{OrderIdAllocator, DEFAULT_ORDER_ID_MIN_WIDTH, DEFAULT_ORDER_ID_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "KS_ORDER_MANAGER_CONFIG";
/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "KS_ORDER_MANAGER_DB_PATH";
/// 默认工作表名称
pub const DEFAULT_SHEET_NAME: &str = "KSClothing";

const APP_DIR: &str = "ks-order-manager";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 (path={path}): {message}")]
    Read { path: String, message: String },

    #[error("配置文件解析失败 (path={path}): {message}")]
    Parse { path: String, message: String },

    #[error("配置值无效 (key={key}): {message}")]
    Invalid { key: &'static str, message: String },
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

// ==========================================
// AppConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 本地表格数据库路径
    pub db_path: String,
    /// 工作表名称
    pub sheet_name: String,
    /// 订单号前缀
    pub order_id_prefix: String,
    /// 订单号数字部分最小位数
    pub order_id_min_width: usize,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: get_default_db_path(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            order_id_prefix: DEFAULT_ORDER_ID_PREFIX.to_string(),
            order_id_min_width: DEFAULT_ORDER_ID_MIN_WIDTH,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// 按默认顺序加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(default_config_path);

        let mut config = match path {
            Some(p) if p.exists() => Self::from_file(&p)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件读取（缺省字段取默认值）
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: AppConfig = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "已读取配置文件");
        Ok(config)
    }

    /// 环境变量覆写
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                self.db_path = trimmed.to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.order_id_prefix.is_empty()
            || !self.order_id_prefix.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(ConfigError::Invalid {
                key: "order_id_prefix",
                message: format!("'{}' 必须为非空英文字母", self.order_id_prefix),
            });
        }
        if !(1..=9).contains(&self.order_id_min_width) {
            return Err(ConfigError::Invalid {
                key: "order_id_min_width",
                message: format!("{} 超出范围 [1, 9]", self.order_id_min_width),
            });
        }
        if self.sheet_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "sheet_name",
                message: "不能为空".to_string(),
            });
        }
        if self.db_path.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "db_path",
                message: "不能为空".to_string(),
            });
        }
        Ok(())
    }

    /// 按配置构造订单号分配器
    pub fn allocator(&self) -> OrderIdAllocator {
        OrderIdAllocator::new(&self.order_id_prefix, self.order_id_min_width)
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
}

/// 默认数据库路径（用户数据目录，取不到时回退到当前目录）
pub fn get_default_db_path() -> String {
    let path = dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join("ks_orders.db"))
        .unwrap_or_else(|| PathBuf::from("./ks_orders.db"));
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.sheet_name, "KSClothing");
        assert_eq!(config.order_id_prefix, "KS");
        assert_eq!(config.order_id_min_width, 2);
        assert!(config.validate().is_ok());
        assert_eq!(config.allocator().first_id(), "KS01");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"sheet_name": "Orders2025", "log_format": "json"}}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.sheet_name, "Orders2025");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.order_id_prefix, "KS");
    }

    // 本模块内唯一读写这两个环境变量的测试
    #[test]
    fn test_load_reads_config_file_and_db_path_override() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"db_path": "/from/file.db", "sheet_name": "Orders2025", "order_id_min_width": 3}}"#
        )
        .unwrap();

        std::env::set_var(CONFIG_PATH_ENV, file.path());
        std::env::set_var(DB_PATH_ENV, "  /from/env/ks.db ");
        let loaded = AppConfig::load();
        std::env::remove_var(CONFIG_PATH_ENV);
        std::env::remove_var(DB_PATH_ENV);

        let config = loaded.unwrap();
        assert_eq!(config.db_path, "/from/env/ks.db");
        assert_eq!(config.sheet_name, "Orders2025");
        assert_eq!(config.allocator().first_id(), "KS001");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_prefix_and_width() {
        let config = AppConfig {
            order_id_prefix: "K5".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "order_id_prefix", .. })
        ));

        let config = AppConfig {
            order_id_min_width: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
