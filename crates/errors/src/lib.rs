//! strata-errors - 统一错误处理
//!
//! 所有 crate 的公共错误类型。"未找到" 通常以 `Option` 表达，
//! 只有调用方无法继续时才返回 `AppError`。

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// 是否为 "未找到" 类错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// 错误类别，用于日志字段
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation",
            Self::Configuration(_) => "configuration",
            Self::Internal(_) => "internal",
            Self::Database(_) => "database",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_and_kind() {
        assert_eq!(AppError::not_found("x").kind(), "not_found");
        assert_eq!(AppError::configuration("x").kind(), "configuration");
        assert!(AppError::not_found("role").is_not_found());
        assert!(!AppError::internal("boom").is_not_found());
    }

    #[test]
    fn test_display() {
        let err = AppError::database("connection reset");
        assert_eq!(err.to_string(), "Database error: connection reset");
    }

    #[test]
    fn test_from_serde_json() {
        let err: AppError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.kind(), "serialization");
    }
}
