//! Error types for Owl Math
//!
//! Wrong answers are not errors. These variants only cover the edges of the
//! crate: onboarding validation, parsing, and terminal I/O.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid player profile: {0}")]
    InvalidProfile(String),

    #[error("Unknown activity: {0}")]
    UnknownActivity(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid script: {0}")]
    InvalidScript(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
