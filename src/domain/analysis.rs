// ==========================================
// 货代报价比选系统 - 报价分析结果
// ==========================================
// 职责: 分析引擎的输出结构（纯数据，可直接序列化）
// 红线: 所有可空输入对应的输出字段均为 Option，不使用 NaN 占位
// ==========================================

use crate::domain::quote::Quote;
use crate::domain::types::{TimelineFlexibility, TransportMode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// QuoteAnalysis - 分析结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteAnalysis {
    /// 最低价空运报价
    pub best_air: Option<Quote>,
    /// 最低价海运报价
    pub best_sea: Option<Quote>,
    /// 潜在节省 = 空运最低价 - 海运最低价（可为负）
    pub potential_savings: Option<f64>,
    /// 推荐运输方式（只会是 Air/Sea）
    pub recommendation: Option<TransportMode>,
    /// 推荐原因（面向用户的英文文案）
    pub recommendation_reason: Option<String>,
    pub factors: AnalysisFactors,
    pub chart_data: ChartData,
    /// 样本量是否足以信任推荐结果
    pub is_reliable: bool,
}

// ==========================================
// AnalysisFactors - 决策因子
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFactors {
    pub timeline_flexibility: TimelineFlexibility,
    /// 在途资金日成本 (USD/天，四舍五入取整)
    pub daily_carrying_cost: Option<i64>,
    /// 货好日期到要求到货日期的可用天数
    pub available_days: Option<i64>,
    /// 节省百分比（四舍五入取整）
    pub savings_percentage: Option<i64>,
}

// ==========================================
// ChartData - 图表序列（按价格升序）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub air: Vec<ChartPoint>,
    pub sea: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub forwarder_label: String,
    pub transit_days: Option<u32>,
    pub cost: f64,
    pub eta: Option<NaiveDate>,
}
