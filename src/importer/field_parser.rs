// ==========================================
// 货代报价比选系统 - 字段解析器
// ==========================================
// 职责: 字符串字段 → 强类型字段（日期/金额/天数/状态）
// 红线: 解析失败返回 ValidationError 并指明字段，禁止静默纠正
// ==========================================

use crate::domain::types::{QuoteStatus, TransportMode};
use crate::domain::validation::{ensure_non_negative_amount, ValidationError, ValidationResult};
use chrono::{DateTime, NaiveDate, Utc};

/// 去空白后为空视为缺失
fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

/// 解析日历日期
///
/// 支持:
/// - YYYY-MM-DD
/// - RFC 3339 时间戳（统一换算为 UTC 日期）
pub fn parse_date(field: &str, raw: Option<&str>) -> ValidationResult<Option<NaiveDate>> {
    let Some(value) = non_blank(raw) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| Some(dt.with_timezone(&Utc).date_naive()))
        .map_err(|_| {
            ValidationError::new(
                field,
                format!("日期格式错误: 期望 YYYY-MM-DD 或 RFC 3339，实际 {}", value),
            )
        })
}

/// 解析必填金额（≥0）
pub fn parse_amount(field: &str, raw: Option<&str>) -> ValidationResult<f64> {
    parse_optional_amount(field, raw)?
        .ok_or_else(|| ValidationError::new(field, "金额不能为空"))
}

/// 解析可选金额（≥0）
pub fn parse_optional_amount(field: &str, raw: Option<&str>) -> ValidationResult<Option<f64>> {
    let Some(value) = non_blank(raw) else {
        return Ok(None);
    };

    let amount = value
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| ValidationError::new(field, format!("金额格式错误: {}", value)))?;

    ensure_non_negative_amount(field, amount).map(Some)
}

/// 解析在途天数（非负整数）
pub fn parse_transit_days(field: &str, raw: Option<&str>) -> ValidationResult<Option<u32>> {
    let Some(value) = non_blank(raw) else {
        return Ok(None);
    };

    value
        .parse::<u32>()
        .map(Some)
        .map_err(|_| ValidationError::new(field, format!("天数必须为非负整数，实际 {}", value)))
}

/// 解析运输方式（未知取值 → Other，由引擎剔除）
pub fn parse_mode(raw: Option<&str>) -> TransportMode {
    non_blank(raw)
        .map(TransportMode::from_str)
        .unwrap_or(TransportMode::Other)
}

/// 解析报价状态（缺失 → active，未知取值 → 校验失败）
pub fn parse_status(field: &str, raw: Option<&str>) -> ValidationResult<QuoteStatus> {
    let Some(value) = non_blank(raw) else {
        return Ok(QuoteStatus::default());
    };

    QuoteStatus::parse(value).ok_or_else(|| {
        ValidationError::new(
            field,
            format!("状态取值非法: {}（允许 active/expired/selected/declined）", value),
        )
    })
}

/// 解析必填文本
pub fn require_text(field: &str, raw: Option<&str>) -> ValidationResult<String> {
    non_blank(raw)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::new(field, "不能为空"))
}
