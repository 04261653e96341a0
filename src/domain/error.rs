use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    InvalidInput(String),
    Processing(String),
    ConfigError(String),
    IoError(String),
}

impl AppError {
    /// The bare message, without the variant prefix `Display` adds.
    ///
    /// This is what goes into the `detail` field of an error response body;
    /// the prefixed form is for logs.
    pub fn detail(&self) -> &str {
        match self {
            AppError::InvalidInput(msg) => msg,
            AppError::Processing(msg) => msg,
            AppError::ConfigError(msg) => msg,
            AppError::IoError(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Processing(msg) => write!(f, "Processing error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
