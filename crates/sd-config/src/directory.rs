//! Lookup directories consulted while synthesizing a run configuration.

use crate::schema::ClusterSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named machines and their shapes, keyed by machine name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ClusterDirectory {
    machines: BTreeMap<String, MachineShape>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
struct MachineShape {
    nodes: u32,
    ppn: u32,
}

impl ClusterDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, machine: impl Into<String>, spec: ClusterSpec) {
        self.machines.insert(
            machine.into(),
            MachineShape {
                nodes: spec.nodes,
                ppn: spec.processes_per_node,
            },
        );
    }

    pub fn get(&self, machine: &str) -> Option<ClusterSpec> {
        self.machines.get(machine).map(|shape| ClusterSpec {
            nodes: shape.nodes,
            processes_per_node: shape.ppn,
        })
    }

    /// Machine names in selector order.
    pub fn machines(&self) -> impl Iterator<Item = &str> {
        self.machines.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

/// One scheduling algorithm as offered in the scheduler checklist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchedulerEntry {
    /// Stable internal module id, used as the key in the run configuration.
    pub module: String,
    /// Display label shown next to the checkbox.
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub disabled: bool,
    /// Hyperparameter name -> type annotation of the algorithm's constructor.
    #[serde(default)]
    pub hyperparams: BTreeMap<String, String>,
}

/// Ordered list of available scheduling algorithms.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SchedulerDirectory {
    entries: Vec<SchedulerEntry>,
}

impl SchedulerDirectory {
    pub fn new(entries: Vec<SchedulerEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SchedulerEntry] {
        &self.entries
    }

    /// Resolve a checklist label to its directory entry.
    ///
    /// Linear scan by display-name equality; the first match wins when two
    /// algorithms share a label.
    pub fn resolve(&self, display_name: &str) -> Option<&SchedulerEntry> {
        self.entries.iter().find(|entry| entry.name == display_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Control used to edit a hyperparameter, derived from its type annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HyperParamKind {
    Numeric,
    Flag,
    Upload,
}

impl HyperParamKind {
    pub fn from_annotation(annotation: &str) -> Self {
        if annotation.contains("float") || annotation.contains("int") {
            Self::Numeric
        } else if annotation.contains("bool") {
            Self::Flag
        } else {
            Self::Upload
        }
    }
}
