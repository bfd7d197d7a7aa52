use thiserror::Error;

use crate::models::TimerError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    #[error("Could not find config directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, Error>;
