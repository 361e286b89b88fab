//! Workload catalogue: machine -> suite -> workload names.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Synthetic suite that holds every workload of a machine.
pub const ALL_SUITE: &str = "All";

/// One stored workload log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkloadRecord {
    pub machine: String,
    pub suite: String,
    pub load: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WorkloadCatalog {
    machines: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl WorkloadCatalog {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a WorkloadRecord>,
    {
        let mut machines: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();

        for record in records {
            let suites = machines.entry(record.machine.clone()).or_default();
            suites
                .entry(ALL_SUITE.to_string())
                .or_default()
                .push(record.load.clone());
            suites
                .entry(record.suite.clone())
                .or_default()
                .push(record.load.clone());
        }

        for suites in machines.values_mut() {
            for loads in suites.values_mut() {
                loads.sort_by(|a, b| compare_workloads(a, b));
                loads.dedup();
            }
        }

        Self { machines }
    }

    pub fn machines(&self) -> impl Iterator<Item = &str> {
        self.machines.keys().map(String::as_str)
    }

    /// Suites of a machine, the synthetic "All" suite first.
    pub fn suites(&self, machine: &str) -> Vec<&str> {
        let Some(suites) = self.machines.get(machine) else {
            return Vec::new();
        };
        let mut names: Vec<&str> = Vec::with_capacity(suites.len());
        if suites.contains_key(ALL_SUITE) {
            names.push(ALL_SUITE);
        }
        names.extend(
            suites
                .keys()
                .map(String::as_str)
                .filter(|name| *name != ALL_SUITE),
        );
        names
    }

    pub fn workloads(&self, machine: &str, suite: &str) -> Option<&[String]> {
        self.machines
            .get(machine)
            .and_then(|suites| suites.get(suite))
            .map(Vec::as_slice)
    }
}

/// Sort key of a workload name such as `bt.D.64`: first segment, then the
/// numeric third segment.
fn workload_key(name: &str) -> Option<(&str, u64)> {
    let mut parts = name.split('.');
    let head = parts.next()?;
    let _class = parts.next()?;
    let size = parts.next()?.parse().ok()?;
    Some((head, size))
}

fn compare_workloads(a: &str, b: &str) -> Ordering {
    match (workload_key(a), workload_key(b)) {
        (Some(ka), Some(kb)) => ka.cmp(&kb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
