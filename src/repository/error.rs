// ==========================================
// KS Clothing 订单管理 - 订单仓储错误类型
// ==========================================
// 工具: thiserror 派生宏
// 目的: 将引擎层、表格层错误统一为操作员可读的错误
// 约束: 全部可恢复，由展示层原样提示，不自动重试
// ==========================================

use crate::engine::error::{AllocationError, ExportError, ValidationError};
use thiserror::Error;

/// 订单操作错误
#[derive(Error, Debug)]
pub enum OrderError {
    // ===== 表单校验错误 =====
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

    #[error("日期格式错误 (field={field}): '{value}'，期望 YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    // ===== 数据损坏 =====
    #[error("订单号格式损坏: '{id}'（期望 {prefix} + 数字），已中止新建订单")]
    InvalidIdentifierFormat { id: String, prefix: String },

    // ===== 查询错误 =====
    #[error("订单未找到: {0}")]
    NotFound(String),

    // ===== 远程表格错误 =====
    #[error("读取远程表格失败: {0}")]
    RemoteReadError(String),

    #[error("写入远程表格失败: {0}")]
    RemoteWriteError(String),

    // ===== 导出错误 =====
    #[error("没有可导出的数据")]
    NothingToExport,

    #[error("导出失败: {0}")]
    ExportIOError(String),
}

// ==========================================
// 从 ValidationError 转换
// ==========================================
impl From<ValidationError> for OrderError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyField { field } => OrderError::EmptyField { field },
            ValidationError::DuplicateTrackingId(id) => OrderError::DuplicateTrackingId(id),
            ValidationError::NotANumber { field, value } => OrderError::NotANumber { field, value },
            ValidationError::InvalidEnum {
                field,
                value,
                allowed,
            } => OrderError::InvalidEnum {
                field,
                value,
                allowed,
            },
        }
    }
}

// ==========================================
// 从 AllocationError 转换
// ==========================================
impl From<AllocationError> for OrderError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::InvalidIdentifierFormat { id, prefix } => {
                OrderError::InvalidIdentifierFormat { id, prefix }
            }
        }
    }
}

// ==========================================
// 从 ExportError 转换
// ==========================================
impl From<ExportError> for OrderError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NothingToExport => OrderError::NothingToExport,
            other => OrderError::ExportIOError(other.to_string()),
        }
    }
}

impl OrderError {
    /// 是否为输入校验类错误（提示操作员修改表单即可）
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            OrderError::EmptyField { .. }
                | OrderError::DuplicateTrackingId(_)
                | OrderError::NotANumber { .. }
                | OrderError::InvalidEnum { .. }
                | OrderError::InvalidDate { .. }
        )
    }
}

/// Result 类型别名
pub type OrderResult<T> = Result<T, OrderError>;
