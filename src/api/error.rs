// ==========================================
// 货代报价比选系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository/校验错误为可解释的错误消息
// 红线: 错误信息必须包含显式原因（字段类错误必须带字段名）
// ==========================================

use crate::domain::validation::ValidationError as FieldValidationError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 调用方错误
    // ==========================================
    #[error("未认证: {0}")]
    Unauthorized(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("数据验证失败 (field={field}): {message}")]
    ValidationError { field: String, message: String },

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    /// 存量数据不合法（非调用方输入）
    #[error("存储数据异常 (field={field}): {message}")]
    StoredDataError { field: String, message: String },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 出错字段（仅字段类错误）
    pub fn field(&self) -> Option<&str> {
        match self {
            ApiError::ValidationError { field, .. } | ApiError::StoredDataError { field, .. } => {
                Some(field.as_str())
            }
            _ => None,
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::DatabaseError(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::DatabaseError(format!("外键约束违反: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::StoredDataError { field, message }
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

// ==========================================
// 从字段校验错误转换
// ==========================================
impl From<FieldValidationError> for ApiError {
    fn from(err: FieldValidationError) -> Self {
        ApiError::ValidationError {
            field: err.field,
            message: err.message,
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
