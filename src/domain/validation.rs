// ==========================================
// 货代报价比选系统 - 字段校验错误
// ==========================================
// 红线: 非法输入必须指明出错字段，禁止静默纠正
// ==========================================

use thiserror::Error;

/// 字段级校验错误（引擎/导入/仓储共用）
#[derive(Error, Debug, Clone, PartialEq)]
#[error("字段校验失败 (field={field}): {message}")]
pub struct ValidationError {
    /// 出错字段，批量数据带下标，如 quotes[2].eta
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result 类型别名
pub type ValidationResult<T> = Result<T, ValidationError>;

/// 校验金额：必须是有限非负数
pub fn ensure_non_negative_amount(field: &str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::new(field, format!("金额必须为有限数，实际 {}", value)));
    }
    if value < 0.0 {
        return Err(ValidationError::new(field, format!("金额不能为负，实际 {}", value)));
    }
    Ok(value)
}
