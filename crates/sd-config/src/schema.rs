//! Run configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fully resolved configuration for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfiguration {
    pub workload: WorkloadSelection,
    pub generator: GeneratorConfig,
    pub cluster: ClusterSpec,
    /// Module id -> hyperparameters. Only selected algorithms appear.
    #[serde(default)]
    pub schedulers: BTreeMap<String, HyperParams>,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkloadSelection {
    pub machine: String,
    pub suite: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum GeneratorConfig {
    Random {
        job_count: u32,
    },
    Dictionary {
        per_workload_count: BTreeMap<String, u32>,
    },
    List {
        raw_upload: UploadBlob,
    },
}

impl GeneratorConfig {
    pub fn kind(&self) -> GeneratorKind {
        match self {
            Self::Random { .. } => GeneratorKind::Random,
            Self::Dictionary { .. } => GeneratorKind::Dictionary,
            Self::List { .. } => GeneratorKind::List,
        }
    }
}

/// Generator variants as labelled in the generator type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    Random,
    Dictionary,
    List,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 3] = [Self::Random, Self::Dictionary, Self::List];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Random => "Random Generator",
            Self::Dictionary => "Dictionary Generator",
            Self::List => "List Generator",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

/// Raw content of an uploaded file, kept exactly as the upload widget delivered it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct UploadBlob(pub String);

impl UploadBlob {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClusterSpec {
    pub nodes: u32,
    pub processes_per_node: u32,
}

impl ClusterSpec {
    pub fn total_cores(&self) -> u64 {
        u64::from(self.nodes) * u64::from(self.processes_per_node)
    }
}

pub type HyperParams = BTreeMap<String, HyperValue>;

/// A decoded hyperparameter control value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum HyperValue {
    Flag(bool),
    Number(f64),
    /// Control whose value is supplied later (e.g. a file upload).
    Deferred,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub mode: SimulationMode,
    pub experiments: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_condition: Option<StopCondition>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SimulationMode {
    Static,
    Dynamic,
}

impl SimulationMode {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Static" => Some(Self::Static),
            "Dynamic" => Some(Self::Dynamic),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Dynamic => "Dynamic",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum StopCondition {
    Time { stop_time: f64, generator_time: f64 },
    JobCount { count: u32 },
}

/// The stop-condition selector of a dynamic simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopConditionKind {
    Time,
    JobCount,
}

impl StopConditionKind {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "time" => Some(Self::Time),
            "jobs" | "job count" | "number of jobs" => Some(Self::JobCount),
            _ => None,
        }
    }
}
