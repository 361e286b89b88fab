//! Run configuration validation.

use crate::schema::{GeneratorConfig, RunConfiguration, SimulationMode, StopCondition};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing field: {field} ({reason})")]
    Missing { field: String, reason: String },

    #[error("Unexpected field: {field} ({reason})")]
    Unexpected { field: String, reason: String },
}

pub fn validate_run_configuration(config: &RunConfiguration) -> Result<(), ValidationError> {
    validate_generator(&config.generator)?;

    if config.cluster.nodes == 0 {
        return Err(ValidationError::InvalidValue {
            field: "cluster.nodes".to_string(),
            value: config.cluster.nodes.to_string(),
            reason: "cluster needs at least one node".to_string(),
        });
    }
    if config.cluster.processes_per_node == 0 {
        return Err(ValidationError::InvalidValue {
            field: "cluster.processes_per_node".to_string(),
            value: config.cluster.processes_per_node.to_string(),
            reason: "nodes need at least one process slot".to_string(),
        });
    }

    if config.schedulers.is_empty() {
        return Err(ValidationError::Missing {
            field: "schedulers".to_string(),
            reason: "select at least one scheduling algorithm".to_string(),
        });
    }

    let simulation = &config.simulation;
    if simulation.experiments == 0 {
        return Err(ValidationError::InvalidValue {
            field: "simulation.experiments".to_string(),
            value: "0".to_string(),
            reason: "at least one experiment is required".to_string(),
        });
    }

    match (simulation.mode, &simulation.stop_condition) {
        (SimulationMode::Static, Some(_)) => Err(ValidationError::Unexpected {
            field: "simulation.stop_condition".to_string(),
            reason: "static simulations have no stop condition".to_string(),
        }),
        (SimulationMode::Dynamic, None) => Err(ValidationError::Missing {
            field: "simulation.stop_condition".to_string(),
            reason: "dynamic simulations need a stop condition".to_string(),
        }),
        (SimulationMode::Dynamic, Some(condition)) => validate_stop_condition(condition),
        (SimulationMode::Static, None) => Ok(()),
    }
}

fn validate_generator(generator: &GeneratorConfig) -> Result<(), ValidationError> {
    match generator {
        GeneratorConfig::Random { job_count } => {
            if *job_count == 0 {
                return Err(ValidationError::InvalidValue {
                    field: "generator.job_count".to_string(),
                    value: "0".to_string(),
                    reason: "random generator must produce at least one job".to_string(),
                });
            }
        }
        GeneratorConfig::Dictionary { per_workload_count } => {
            if per_workload_count.values().all(|count| *count == 0) {
                return Err(ValidationError::InvalidValue {
                    field: "generator.per_workload_count".to_string(),
                    value: format!("{} workloads, all zero", per_workload_count.len()),
                    reason: "at least one workload needs a positive count".to_string(),
                });
            }
        }
        GeneratorConfig::List { raw_upload } => {
            if raw_upload.is_empty() {
                return Err(ValidationError::Missing {
                    field: "generator.raw_upload".to_string(),
                    reason: "no workload list was uploaded".to_string(),
                });
            }
        }
    }
    Ok(())
}

fn validate_stop_condition(condition: &StopCondition) -> Result<(), ValidationError> {
    match condition {
        StopCondition::Time {
            stop_time,
            generator_time,
        } => {
            for (field, value) in [
                ("simulation.stop_condition.stop_time", *stop_time),
                ("simulation.stop_condition.generator_time", *generator_time),
            ] {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ValidationError::InvalidValue {
                        field: field.to_string(),
                        value: value.to_string(),
                        reason: "must be a positive, finite time".to_string(),
                    });
                }
            }
            Ok(())
        }
        StopCondition::JobCount { count } => {
            if *count == 0 {
                return Err(ValidationError::InvalidValue {
                    field: "simulation.stop_condition.count".to_string(),
                    value: "0".to_string(),
                    reason: "job-count bound must be positive".to_string(),
                });
            }
            Ok(())
        }
    }
}
