use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = ArbError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ArbError {
    #[error("format: {0}")]
    Format(String),

    #[error("document already loaded: {}", .0.display())]
    DuplicateDocument(PathBuf),

    #[error("validation: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("tool: {0}")]
    Tool(String),
}

impl From<serde_json::Error> for ArbError {
    fn from(err: serde_json::Error) -> Self {
        ArbError::Format(err.to_string())
    }
}

impl ArbError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
