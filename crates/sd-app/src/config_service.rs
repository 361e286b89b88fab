//! Configuration synthesis, loading, saving and validation.

use serde::de::DeserializeOwned;
use std::path::Path;

use sd_config::{
    ClusterDirectory, RunConfiguration, SchedulerDirectory, WorkloadCatalog, WorkloadRecord,
};
use sd_synth::{Directories, FormSnapshot};

use crate::error::{AppError, AppResult};

/// Everything one synthesis pass reads.
#[derive(Debug, Clone)]
pub struct SynthesisInputs {
    pub snapshot: FormSnapshot,
    pub clusters: ClusterDirectory,
    pub schedulers: SchedulerDirectory,
    pub workloads: WorkloadCatalog,
}

impl SynthesisInputs {
    pub fn directories(&self) -> Directories<'_> {
        Directories {
            clusters: &self.clusters,
            schedulers: &self.schedulers,
            workloads: &self.workloads,
        }
    }
}

/// Paths of the JSON documents a synthesis pass is built from.
#[derive(Debug, Clone, Copy)]
pub struct InputPaths<'a> {
    pub snapshot: &'a Path,
    pub clusters: &'a Path,
    pub schedulers: &'a Path,
    /// A list of `{machine, suite, load}` records.
    pub workloads: &'a Path,
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| AppError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub fn load_inputs(paths: InputPaths<'_>) -> AppResult<SynthesisInputs> {
    let records: Vec<WorkloadRecord> = read_json(paths.workloads)?;
    Ok(SynthesisInputs {
        snapshot: read_json(paths.snapshot)?,
        clusters: read_json(paths.clusters)?,
        schedulers: read_json(paths.schedulers)?,
        workloads: WorkloadCatalog::from_records(&records),
    })
}

/// Run synthesis. A declined pass surfaces as [`AppError::NoOp`].
pub fn synthesize_configuration(inputs: &SynthesisInputs) -> AppResult<RunConfiguration> {
    let config = sd_synth::synthesize(&inputs.snapshot, &inputs.directories())?;
    Ok(config)
}

pub fn validate_configuration(config: &RunConfiguration) -> AppResult<()> {
    sd_config::validate_run_configuration(config)?;
    Ok(())
}

/// Load a stored configuration (YAML or JSON by extension); it is validated.
pub fn load_configuration(path: &Path) -> AppResult<RunConfiguration> {
    let config = sd_config::load(path)?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Save a configuration; invalid configurations are refused.
pub fn save_configuration(path: &Path, config: &RunConfiguration) -> AppResult<()> {
    sd_config::save(path, config)?;
    tracing::info!(path = %path.display(), "configuration saved");
    Ok(())
}

/// Render a configuration as YAML for display.
pub fn configuration_to_yaml(config: &RunConfiguration) -> AppResult<String> {
    serde_yaml::to_string(config)
        .map_err(|e| AppError::Config(format!("Failed to serialize configuration: {}", e)))
}
