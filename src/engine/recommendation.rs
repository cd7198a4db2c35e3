// ==========================================
// 货代报价比选系统 - 运输方式推荐规则
// ==========================================
// 红线: 推荐必须输出 reason（无推荐时 reason 同为空）
// ==========================================

use crate::domain::quote::Quote;
use crate::domain::types::TransportMode;
use crate::engine::timeline::calendar_days_between;
use chrono::NaiveDate;

pub const REASON_ONLY_SEA: &str = "Only sea freight quotes available.";
pub const REASON_ONLY_AIR: &str = "Only air freight quotes available.";
pub const REASON_SEA_MISSES_DEADLINE: &str =
    "Sea freight does not meet delivery deadline. Air freight required.";

/// 节省百分比缺失（空运最低价为 0）时文案中的占位
const PERCENTAGE_PLACEHOLDER: &str = "n/a";

/// 推荐结果
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub mode: Option<TransportMode>,
    pub reason: Option<String>,
}

impl Recommendation {
    fn none() -> Self {
        Self { mode: None, reason: None }
    }

    fn with(mode: TransportMode, reason: impl Into<String>) -> Self {
        Self {
            mode: Some(mode),
            reason: Some(reason.into()),
        }
    }
}

/// 双方式比价结果（两种方式均有报价时才存在）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Savings {
    pub potential_savings: f64,
    pub savings_percentage: Option<i64>,
}

/// 推荐运输方式
///
/// # 规则（顺序执行，命中即返回）
/// 1) 无空运、无海运 → 无推荐
/// 2) 仅海运 → sea
/// 3) 仅空运 → air
/// 4) 无要求到货日期 → 无推荐（无法评估）
/// 5) 海运 eta ≤ 截止日 且 缓冲 ≥ safe_buffer_days → sea
/// 6) 海运 eta ≤ 截止日 且 缓冲不足 → sea（提示可考虑空运）
/// 7) 海运 eta 缺失或晚于截止日 → air
pub fn recommend(
    best_air: Option<&Quote>,
    best_sea: Option<&Quote>,
    delivery_required_date: Option<NaiveDate>,
    savings: Option<Savings>,
    safe_buffer_days: i64,
) -> Recommendation {
    let sea = match (best_air, best_sea) {
        (None, None) => return Recommendation::none(),
        (None, Some(_)) => return Recommendation::with(TransportMode::Sea, REASON_ONLY_SEA),
        (Some(_), None) => return Recommendation::with(TransportMode::Air, REASON_ONLY_AIR),
        (Some(_), Some(sea)) => sea,
    };

    let Some(required) = delivery_required_date else {
        return Recommendation::none();
    };

    let buffer_days = match sea.eta {
        Some(eta) if eta <= required => calendar_days_between(eta, required),
        _ => return Recommendation::with(TransportMode::Air, REASON_SEA_MISSES_DEADLINE),
    };

    if buffer_days >= safe_buffer_days {
        let (percentage, amount) = match savings {
            Some(s) => (
                s.savings_percentage
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| PERCENTAGE_PLACEHOLDER.to_string()),
                format_amount(s.potential_savings),
            ),
            None => (PERCENTAGE_PLACEHOLDER.to_string(), PERCENTAGE_PLACEHOLDER.to_string()),
        };
        Recommendation::with(
            TransportMode::Sea,
            format!(
                "Sea freight arrives {} days before deadline with {}% cost savings (${})",
                buffer_days, percentage, amount
            ),
        )
    } else {
        Recommendation::with(
            TransportMode::Sea,
            format!(
                "Sea freight meets deadline with minimal buffer ({} days). Consider air if timing is critical.",
                buffer_days
            ),
        )
    }
}

/// 金额文案：整数不带小数位，其余取最短十进制表示
fn format_amount(value: f64) -> String {
    // 避免 -0 出现在文案中
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}
