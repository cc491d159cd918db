// ==========================================
// KS Clothing 订单管理 - 领域类型定义
// ==========================================
// 职责: COD 付款标记、COD 过滤条件及其宽松归一化
// 线上取值: "TRUE" / "FALSE"
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 持久化的 COD 肯定值
pub const COD_TRUE: &str = "TRUE";
/// 持久化的 COD 否定值
pub const COD_FALSE: &str = "FALSE";

/// 宽松判断一个已存储的 COD 值是否为"是"
///
/// 规则（忽略大小写与首尾空白）：
/// - `yes` / `true` / `1` → true
/// - 其他任何值（包括空串）→ false
///
/// 所有读取存量数据的位置都必须通过此函数判断，不允许在调用处散落字符串比较。
pub fn is_affirmative(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "1"
    )
}

// ==========================================
// COD 付款 (Cash On Delivery)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodPayment {
    Yes,
    No,
}

impl CodPayment {
    /// 严格解析表单选项（仅接受 Yes / No，忽略大小写与首尾空白）
    pub fn from_option(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(CodPayment::Yes),
            "no" => Some(CodPayment::No),
            _ => None,
        }
    }

    /// 宽松解析存量值（见 [`is_affirmative`]）
    pub fn from_stored(raw: &str) -> Self {
        if is_affirmative(raw) {
            CodPayment::Yes
        } else {
            CodPayment::No
        }
    }

    /// 持久化取值
    pub fn as_stored(self) -> &'static str {
        match self {
            CodPayment::Yes => COD_TRUE,
            CodPayment::No => COD_FALSE,
        }
    }

    /// 界面显示取值
    pub fn label(self) -> &'static str {
        match self {
            CodPayment::Yes => "Yes",
            CodPayment::No => "No",
        }
    }
}

impl fmt::Display for CodPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// COD 过滤条件
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CodFilter {
    #[default]
    All,
    Yes,
    No,
}

impl CodFilter {
    /// 解析过滤选项 All / Yes / No（忽略大小写与首尾空白）
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "all" => Some(CodFilter::All),
            "yes" => Some(CodFilter::Yes),
            "no" => Some(CodFilter::No),
            _ => None,
        }
    }

    /// 判断存量 COD 值是否满足过滤条件
    pub fn matches(self, stored: &str) -> bool {
        match self {
            CodFilter::All => true,
            CodFilter::Yes => CodPayment::from_stored(stored) == CodPayment::Yes,
            CodFilter::No => CodPayment::from_stored(stored) == CodPayment::No,
        }
    }
}

impl fmt::Display for CodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodFilter::All => write!(f, "All"),
            CodFilter::Yes => write!(f, "Yes"),
            CodFilter::No => write!(f, "No"),
        }
    }
}
