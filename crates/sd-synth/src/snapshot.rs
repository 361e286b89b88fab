//! Snapshot of the configuration form at the moment the run is triggered.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the synthesizer reads from the UI, passed in explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormSnapshot {
    /// Machine whose workload logs feed the generator.
    pub machine: String,
    pub suite: String,
    /// Label of the selected generator (`Random Generator`, ...).
    pub generator_type: String,
    /// Rendered generator options subtree; its shape depends on `generator_type`.
    #[serde(default)]
    pub generator_options: Value,
    #[serde(default)]
    pub cluster: ClusterForm,
    /// Rendered scheduler checklist rows, in display order.
    #[serde(default)]
    pub scheduler_rows: Value,
    pub simulation: SimulationForm,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClusterForm {
    /// Click counter of the named/manual toggle button.
    #[serde(default)]
    pub toggle_clicks: Option<u64>,
    /// Machine selected in the named-machine dropdown.
    #[serde(default)]
    pub machine: String,
    #[serde(default)]
    pub nodes: Option<f64>,
    #[serde(default)]
    pub ppn: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationForm {
    /// `Static` or `Dynamic`.
    pub mode: String,
    #[serde(default)]
    pub experiments: Option<f64>,
    #[serde(default)]
    pub stop_kind: Option<String>,
    #[serde(default)]
    pub stop_time: Option<f64>,
    #[serde(default)]
    pub generator_time: Option<f64>,
    #[serde(default)]
    pub stop_jobs: Option<f64>,
}

/// Where the cluster shape comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterSource {
    Named,
    Manual,
}

impl ClusterSource {
    /// The toggle flips on every click; only the parity of the counter matters.
    pub fn from_clicks(clicks: Option<u64>) -> Self {
        match clicks {
            Some(n) if n % 2 == 1 => Self::Manual,
            _ => Self::Named,
        }
    }

    /// Caption of the toggle button while this source is active.
    pub fn toggle_caption(&self) -> &'static str {
        match self {
            Self::Named => "To manual configuration",
            Self::Manual => "By name configuration",
        }
    }
}
