// ==========================================
// 货代报价比选系统 - 时间窗与资金成本计算
// ==========================================
// 职责: 日历天差、时间窗弹性分级、在途资金日成本
// 红线: 纯函数，不读时钟
// ==========================================

use crate::config::analysis_config::{AnalysisConfig, DAYS_PER_YEAR};
use crate::domain::types::TimelineFlexibility;
use chrono::NaiveDate;

/// 日历天差 (to - from)
///
/// 日期不含时分秒，差值天然为整数；按向上取整口径即为 num_days。
pub fn calendar_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// 时间窗弹性分级
///
/// # 规则（顺序执行，命中即返回）
/// 1) 任一日期缺失 → (Low, None)
/// 2) available ≥ high_flexibility_days → High
/// 3) available ≥ medium_flexibility_days → Medium
/// 4) 其他 → Low
pub fn classify_timeline(
    cargo_ready_date: Option<NaiveDate>,
    delivery_required_date: Option<NaiveDate>,
    config: &AnalysisConfig,
) -> (TimelineFlexibility, Option<i64>) {
    let (Some(ready), Some(required)) = (cargo_ready_date, delivery_required_date) else {
        return (TimelineFlexibility::Low, None);
    };

    let available_days = calendar_days_between(ready, required);
    let flexibility = if available_days >= config.high_flexibility_days {
        TimelineFlexibility::High
    } else if available_days >= config.medium_flexibility_days {
        TimelineFlexibility::Medium
    } else {
        TimelineFlexibility::Low
    };

    (flexibility, Some(available_days))
}

/// 在途资金日成本 = round(货值 × 年化成本率 / 365)
pub fn daily_carrying_cost(value_usd: Option<f64>, config: &AnalysisConfig) -> Option<i64> {
    value_usd.map(|value| (value * config.annual_carrying_cost_rate / DAYS_PER_YEAR).round() as i64)
}
