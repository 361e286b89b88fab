//! Error types for the sd-app service layer.

use std::path::PathBuf;

/// Application error shared by every frontend.
///
/// The two "nothing to do" outcomes keep their engine reasons so a frontend
/// can leave its state alone instead of reporting a failure.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration validation failed: {0}")]
    Validation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Configuration left unchanged: {0}")]
    NoOp(#[from] sd_synth::NoOp),

    #[error("View left unchanged: {0}")]
    NavNoOp(#[from] sd_nav::NavNoOp),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// True when the engines declined to act rather than failed.
    pub fn is_no_op(&self) -> bool {
        matches!(self, AppError::NoOp(_) | AppError::NavNoOp(_))
    }
}

/// Result type for sd-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<sd_config::ConfigError> for AppError {
    fn from(err: sd_config::ConfigError) -> Self {
        match err {
            sd_config::ConfigError::Validation(reason) => AppError::Validation(reason.to_string()),
            other => AppError::Config(other.to_string()),
        }
    }
}

impl From<sd_config::ValidationError> for AppError {
    fn from(err: sd_config::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<sd_results::ResultsError> for AppError {
    fn from(err: sd_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
