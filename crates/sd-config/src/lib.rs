//! sd-config: run configuration format, lookup directories and validation.

pub mod catalog;
pub mod directory;
pub mod schema;
pub mod validate;

pub use catalog::{ALL_SUITE, WorkloadCatalog, WorkloadRecord};
pub use directory::{ClusterDirectory, HyperParamKind, SchedulerDirectory, SchedulerEntry};
pub use schema::*;
pub use validate::{ValidationError, validate_run_configuration};

use std::path::Path;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encodings for a run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

pub fn load_yaml(path: &Path) -> ConfigResult<RunConfiguration> {
    let content = std::fs::read_to_string(path)?;
    let config: RunConfiguration = serde_yaml::from_str(&content)?;
    validate_run_configuration(&config)?;
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &RunConfiguration) -> ConfigResult<()> {
    validate_run_configuration(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ConfigResult<RunConfiguration> {
    let content = std::fs::read_to_string(path)?;
    let config: RunConfiguration = serde_json::from_str(&content)?;
    validate_run_configuration(&config)?;
    Ok(config)
}

pub fn save_json(path: &Path, config: &RunConfiguration) -> ConfigResult<()> {
    validate_run_configuration(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a configuration, picking the encoding from the file extension.
pub fn load(path: &Path) -> ConfigResult<RunConfiguration> {
    match ConfigFormat::from_path(path)? {
        ConfigFormat::Yaml => load_yaml(path),
        ConfigFormat::Json => load_json(path),
    }
}

/// Save a configuration, picking the encoding from the file extension.
pub fn save(path: &Path, config: &RunConfiguration) -> ConfigResult<()> {
    match ConfigFormat::from_path(path)? {
        ConfigFormat::Yaml => save_yaml(path, config),
        ConfigFormat::Json => save_json(path, config),
    }
}
