// ==========================================
// 货代报价比选系统 - 分析策略参数
// ==========================================
// 职责: 报价分析中的业务常量（资金成本率、安全缓冲、弹性阈值）
// 红线: 这些是策略不是算法，必须可覆写，禁止在引擎中硬编码
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 默认年化资金成本率 (15%)
pub const DEFAULT_ANNUAL_CARRYING_COST_RATE: f64 = 0.15;
/// 默认海运安全缓冲天数
pub const DEFAULT_SAFE_BUFFER_DAYS: i64 = 3;
/// 默认"宽裕"阈值天数
pub const DEFAULT_HIGH_FLEXIBILITY_DAYS: i64 = 25;
/// 默认"一般"阈值天数
pub const DEFAULT_MEDIUM_FLEXIBILITY_DAYS: i64 = 14;
/// 默认可信样本量
pub const DEFAULT_MIN_RELIABLE_QUOTE_COUNT: usize = 2;
/// 可信样本量下限（只允许调高）
pub const MIN_RELIABLE_QUOTE_FLOOR: usize = 2;
/// 货代信息缺失时的图表占位名称
pub const DEFAULT_UNKNOWN_FORWARDER_LABEL: &str = "Unknown";

/// 一年按 365 天折算日成本
pub const DAYS_PER_YEAR: f64 = 365.0;

// ==========================================
// AnalysisConfig - 分析参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 年化资金成本率（用于在途库存日成本）
    pub annual_carrying_cost_rate: f64,
    /// 海运到港早于截止日 ≥ 该天数视为安全
    pub safe_buffer_days: i64,
    /// 可用天数 ≥ 该值 → high
    pub high_flexibility_days: i64,
    /// 可用天数 ≥ 该值 → medium
    pub medium_flexibility_days: i64,
    /// 报价数 ≥ 该值才视为可信（不低于 2）
    pub min_reliable_quote_count: usize,
    /// 图表中货代名称占位
    pub unknown_forwarder_label: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            annual_carrying_cost_rate: DEFAULT_ANNUAL_CARRYING_COST_RATE,
            safe_buffer_days: DEFAULT_SAFE_BUFFER_DAYS,
            high_flexibility_days: DEFAULT_HIGH_FLEXIBILITY_DAYS,
            medium_flexibility_days: DEFAULT_MEDIUM_FLEXIBILITY_DAYS,
            min_reliable_quote_count: DEFAULT_MIN_RELIABLE_QUOTE_COUNT,
            unknown_forwarder_label: DEFAULT_UNKNOWN_FORWARDER_LABEL.to_string(),
        }
    }
}

// ==========================================
// 参数校验
// ==========================================

/// 参数非法错误
#[derive(Error, Debug, Clone, PartialEq)]
#[error("分析参数非法 (key={key}): {message}")]
pub struct InvalidConfigError {
    pub key: String,
    pub message: String,
}

impl AnalysisConfig {
    /// 校验参数组合
    ///
    /// # 规则
    /// - 资金成本率必须是有限非负数
    /// - 天数阈值不能为负
    /// - medium 阈值不能大于 high 阈值
    /// - 可信样本量不能低于 2
    pub fn validate(&self) -> Result<(), InvalidConfigError> {
        if !self.annual_carrying_cost_rate.is_finite() || self.annual_carrying_cost_rate < 0.0 {
            return Err(InvalidConfigError {
                key: "annual_carrying_cost_rate".to_string(),
                message: format!("必须为非负有限数，实际 {}", self.annual_carrying_cost_rate),
            });
        }

        for (key, value) in [
            ("safe_buffer_days", self.safe_buffer_days),
            ("high_flexibility_days", self.high_flexibility_days),
            ("medium_flexibility_days", self.medium_flexibility_days),
        ] {
            if value < 0 {
                return Err(InvalidConfigError {
                    key: key.to_string(),
                    message: format!("天数不能为负，实际 {}", value),
                });
            }
        }

        if self.medium_flexibility_days > self.high_flexibility_days {
            return Err(InvalidConfigError {
                key: "medium_flexibility_days".to_string(),
                message: format!(
                    "medium({}) 不能大于 high({})",
                    self.medium_flexibility_days, self.high_flexibility_days
                ),
            });
        }

        if self.min_reliable_quote_count < MIN_RELIABLE_QUOTE_FLOOR {
            return Err(InvalidConfigError {
                key: "min_reliable_quote_count".to_string(),
                message: format!(
                    "不能低于 {}，实际 {}",
                    MIN_RELIABLE_QUOTE_FLOOR, self.min_reliable_quote_count
                ),
            });
        }

        Ok(())
    }
}
