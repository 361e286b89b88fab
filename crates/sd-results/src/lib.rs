//! sd-results: the multi-experiment results store produced by a simulation run.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::fingerprint;
pub use store::{ExperimentResults, ResultsStore, SchedulerResults};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Metric not found: {metric}")]
    MissingMetric { metric: String },

    #[error("Malformed {metric} payload: {reason}")]
    Malformed { metric: String, reason: String },
}
