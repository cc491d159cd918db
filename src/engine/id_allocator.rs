// ==========================================
// KS Clothing 订单管理 - 订单号分配器
// ==========================================
// 规则: 取 Order ID 列最后一个值，序号 +1，前缀 + 至少两位补零
// 红线: 最后一个订单号格式损坏时报错，不猜测回退值
// ==========================================

use crate::engine::error::AllocationError;

/// 默认订单号前缀
pub const DEFAULT_ORDER_ID_PREFIX: &str = "KS";
/// 默认最小数字位数
pub const DEFAULT_ORDER_ID_MIN_WIDTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIdAllocator {
    prefix: String,
    min_width: usize,
}

impl Default for OrderIdAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER_ID_PREFIX, DEFAULT_ORDER_ID_MIN_WIDTH)
    }
}

impl OrderIdAllocator {
    pub fn new(prefix: &str, min_width: usize) -> Self {
        Self {
            prefix: prefix.to_string(),
            min_width,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 第一个订单号（如 KS01）
    pub fn first_id(&self) -> String {
        self.format_id(1)
    }

    /// 计算下一个订单号
    ///
    /// # 参数
    /// - existing_ids: Order ID 整列（含表头，按行序）
    ///
    /// # 返回
    /// - Ok(String): 下一个订单号
    /// - Err(InvalidIdentifierFormat): 最后一个订单号不符合 前缀+数字
    pub fn next_order_id(&self, existing_ids: &[String]) -> Result<String, AllocationError> {
        // 只有表头（或整列为空）时从 1 开始
        if existing_ids.len() <= 1 {
            tracing::debug!("订单号列为空，分配首个订单号");
            return Ok(self.first_id());
        }

        let last = existing_ids
            .last()
            .map(String::as_str)
            .unwrap_or_default();
        let next = self
            .parse_sequence(last)?
            .checked_add(1)
            .ok_or_else(|| self.invalid(last))?;

        let id = self.format_id(next);
        tracing::debug!(last_id = last, next_id = %id, "分配订单号");
        Ok(id)
    }

    /// 解析订单号中的序号部分
    pub fn parse_sequence(&self, id: &str) -> Result<u64, AllocationError> {
        let digits = id
            .trim()
            .strip_prefix(self.prefix.as_str())
            .ok_or_else(|| self.invalid(id))?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.invalid(id));
        }
        digits.parse::<u64>().map_err(|_| self.invalid(id))
    }

    fn format_id(&self, sequence: u64) -> String {
        format!("{}{:0width$}", self.prefix, sequence, width = self.min_width)
    }

    fn invalid(&self, id: &str) -> AllocationError {
        AllocationError::InvalidIdentifierFormat {
            id: id.to_string(),
            prefix: self.prefix.clone(),
        }
    }
}
