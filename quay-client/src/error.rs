//! Client error types

use thiserror::Error;

use crate::editor::EditorError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection, timeout, body decode)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with an error response body
    #[error("API error {code} (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Editor state machine rejected the operation
    #[error("Editor state error: {0}")]
    Editor(#[from] EditorError),
}

pub type ClientResult<T> = Result<T, ClientError>;
