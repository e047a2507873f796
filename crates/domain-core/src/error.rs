//! 注册表错误

use strata_errors::AppError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// 实体类型无法构造出操作接口，属于配置错误，不重试
    #[error("failed to construct operate interface for {type_name}")]
    OperateConstruction { type_name: String },

    #[error("unknown entity type: {name}")]
    UnknownType { name: String },
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::OperateConstruction { .. } => AppError::configuration(err.to_string()),
            RegistryError::UnknownType { .. } => AppError::not_found(err.to_string()),
        }
    }
}
