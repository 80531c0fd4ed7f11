//! 服务器级错误 (启动/运行阶段)

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

impl From<crate::utils::AppError> for ServerError {
    fn from(err: crate::utils::AppError) -> Self {
        ServerError::Internal(anyhow::anyhow!(err))
    }
}

/// 服务器启动/运行的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
