// ==========================================
// 货代报价比选系统 - 报价实体
// ==========================================
// 红线: total_amount ≥ 0，一条报价只对应一种运输方式
// 说明: 数据源不保证顺序，排序由分析引擎显式完成
// ==========================================

use crate::domain::types::{QuoteStatus, TransportMode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 默认比价币种
pub const DEFAULT_CURRENCY: &str = "USD";

// ==========================================
// ForwarderSummary - 货代展示信息（联表读取）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwarderSummary {
    pub id: String,
    pub name: String,
}

// ==========================================
// Quote - 货代报价
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub request_id: String,
    pub forwarder_id: String,

    /// 联表得到的货代展示信息，缺失时图表使用占位名称
    #[serde(default)]
    pub forwarder: Option<ForwarderSummary>,

    pub mode: TransportMode,
    pub total_amount: f64,

    /// 币种字段仅透传，分析时假定同一比价币种
    #[serde(default = "default_currency")]
    pub currency: String,

    pub transit_days: Option<u32>,
    pub etd: Option<NaiveDate>,
    pub eta: Option<NaiveDate>,

    #[serde(default)]
    pub status: QuoteStatus,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Quote {
    /// 货代显示名称（无联表信息时返回 None）
    pub fn forwarder_name(&self) -> Option<&str> {
        self.forwarder
            .as_ref()
            .map(|f| f.name.trim())
            .filter(|name| !name.is_empty())
    }
}
