// ==========================================
// 货代报价比选系统 - 存量字段解码
// ==========================================
// 职责: 按 SQLite 实际存储类型解码金额列
// 红线: 类型不符按字段值错误上报，不作为查询失败
// ==========================================

use crate::domain::validation::{ensure_non_negative_amount, ValidationError, ValidationResult};
use crate::importer::field_parser::parse_optional_amount;
use rusqlite::types::Value;

/// 解码可空金额列（NULL → None）
pub(crate) fn stored_optional_amount(field: &str, value: Value) -> ValidationResult<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Integer(v) => ensure_non_negative_amount(field, v as f64).map(Some),
        Value::Real(v) => ensure_non_negative_amount(field, v).map(Some),
        Value::Text(text) => parse_optional_amount(field, Some(&text)),
        Value::Blob(_) => Err(ValidationError::new(field, "金额不能为二进制数据")),
    }
}

/// 解码必填金额列
pub(crate) fn stored_amount(field: &str, value: Value) -> ValidationResult<f64> {
    stored_optional_amount(field, value)?
        .ok_or_else(|| ValidationError::new(field, "金额不能为空"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_storage_classes() {
        assert_eq!(stored_amount("quotes.total_amount", Value::Real(12.5)), Ok(12.5));
        assert_eq!(stored_amount("quotes.total_amount", Value::Integer(300)), Ok(300.0));
        assert_eq!(
            stored_optional_amount("shipment_requests.value_usd", Value::Null),
            Ok(None)
        );
    }

    #[test]
    fn test_non_numeric_text_names_column() {
        let err = stored_amount("quotes.total_amount", Value::Text("abc".to_string())).unwrap_err();
        assert_eq!(err.field, "quotes.total_amount");

        let err = stored_amount("quotes.total_amount", Value::Null).unwrap_err();
        assert_eq!(err.field, "quotes.total_amount");

        let err = stored_amount("quotes.total_amount", Value::Blob(vec![1, 2])).unwrap_err();
        assert_eq!(err.field, "quotes.total_amount");
    }
}
