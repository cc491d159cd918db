// ==========================================
// KS Clothing 订单管理 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约束: 校验错误必须在任何远程写入之前产生
// ==========================================

use thiserror::Error;

/// 表单校验错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("字段不能为空: {field}")]
    EmptyField { field: &'static str },

    #[error("Tracking ID 已存在: {0}")]
    DuplicateTrackingId(String),

    #[error("字段必须为整数 (field={field}): '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("字段取值无效 (field={field}): '{value}'，可选值: {allowed}")]
    InvalidEnum {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },
}

/// 订单号分配错误
///
/// 出现即表示表格数据已损坏，调用方必须中止新建流程。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("订单号格式损坏: '{id}'（期望 {prefix} + 数字）")]
    InvalidIdentifierFormat { id: String, prefix: String },
}

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("没有可导出的数据")]
    NothingToExport,

    #[error("导出文件写入失败 (path={path}): {message}")]
    Io { path: String, message: String },

    #[error("CSV 写入失败: {0}")]
    Csv(String),

    #[error("Excel 写入失败: {0}")]
    Xlsx(String),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Xlsx(err.to_string())
    }
}
