// ==========================================
// KS Clothing 订单管理 - 表格存储错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 远程表格访问错误
#[derive(Error, Debug)]
pub enum TableError {
    #[error("表格读取失败: {0}")]
    Read(String),

    #[error("表格写入失败: {0}")]
    Write(String),

    #[error("行号越界: row={row}, 当前行数={row_count}")]
    RowOutOfRange { row: usize, row_count: usize },

    #[error("表格锁获取失败: {0}")]
    Lock(String),

    #[error("行数据编码失败: {0}")]
    Encoding(String),

    #[error("数据库错误: {0}")]
    Sqlite(String),
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for TableError {
    fn from(err: rusqlite::Error) -> Self {
        TableError::Sqlite(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::Encoding(err.to_string())
    }
}

/// Result 类型别名
pub type TableResult<T> = Result<T, TableError>;

/// 表格文件加载错误
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("文件无表头行")]
    EmptySheet,
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::CsvParseError(err.to_string())
    }
}

impl From<calamine::XlsxError> for LoadError {
    fn from(err: calamine::XlsxError) -> Self {
        LoadError::ExcelParseError(err.to_string())
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
