//! Results store: `experiment → scheduler → metric → payload`.
//!
//! Raw metric JSON is kept as delivered and decoded on access, so a single
//! malformed metric never prevents browsing the rest of the store.

use crate::types::{BASELINE_SCHEDULER, JobTable, MetricKind, MetricPayload, TimeSeries};
use crate::{ResultsError, ResultsResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultsStore {
    experiments: IndexMap<String, ExperimentResults>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExperimentResults {
    schedulers: IndexMap<String, SchedulerResults>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchedulerResults {
    metrics: IndexMap<String, Value>,
}

impl ResultsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(text: &str) -> ResultsResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load_json(path: &Path) -> ResultsResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn save_json(&self, path: &Path) -> ResultsResult<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn insert_experiment(&mut self, name: impl Into<String>, experiment: ExperimentResults) {
        self.experiments.insert(name.into(), experiment);
    }

    pub fn experiment(&self, name: &str) -> Option<&ExperimentResults> {
        self.experiments.get(name)
    }

    pub fn experiments(&self) -> impl Iterator<Item = (&str, &ExperimentResults)> {
        self.experiments.iter().map(|(name, e)| (name.as_str(), e))
    }

    pub fn experiment_names(&self) -> impl Iterator<Item = &str> + Clone {
        self.experiments.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    /// Every scheduler seen in any experiment except the baseline, in
    /// first-seen order.
    pub fn non_baseline_schedulers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for experiment in self.experiments.values() {
            for name in experiment.scheduler_names() {
                if name != BASELINE_SCHEDULER && !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn fingerprint(&self) -> String {
        crate::hash::fingerprint(self)
    }
}

impl ExperimentResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_scheduler(&mut self, name: impl Into<String>, results: SchedulerResults) {
        self.schedulers.insert(name.into(), results);
    }

    pub fn scheduler(&self, name: &str) -> Option<&SchedulerResults> {
        self.schedulers.get(name)
    }

    pub fn schedulers(&self) -> impl Iterator<Item = (&str, &SchedulerResults)> {
        self.schedulers.iter().map(|(name, s)| (name.as_str(), s))
    }

    pub fn scheduler_names(&self) -> impl Iterator<Item = &str> + Clone {
        self.schedulers.keys().map(String::as_str)
    }

    /// Jobs per run, taken from the first job table present.
    pub fn job_count(&self) -> usize {
        self.schedulers
            .values()
            .find_map(|s| s.job_table().ok())
            .map(|table| table.len())
            .unwrap_or(0)
    }
}

impl SchedulerResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raw(&mut self, metric: impl Into<String>, raw: Value) {
        self.metrics.insert(metric.into(), raw);
    }

    pub fn raw(&self, metric: &str) -> Option<&Value> {
        self.metrics.get(metric)
    }

    pub fn metric_names(&self) -> impl Iterator<Item = &str> + Clone {
        self.metrics.keys().map(String::as_str)
    }

    /// Exact name first, then the same name in any ASCII case.
    pub fn raw_metric(&self, kind: MetricKind) -> Option<&Value> {
        self.metrics.get(kind.name()).or_else(|| {
            self.metrics
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(kind.name()))
                .map(|(_, raw)| raw)
        })
    }

    pub fn has(&self, kind: MetricKind) -> bool {
        self.raw_metric(kind).is_some()
    }

    pub fn payload(&self, kind: MetricKind) -> ResultsResult<MetricPayload> {
        let raw = self
            .raw_metric(kind)
            .ok_or_else(|| ResultsError::MissingMetric {
                metric: kind.name().to_string(),
            })?;
        MetricPayload::decode(kind, raw)
    }

    pub fn figure(&self, kind: MetricKind) -> ResultsResult<Value> {
        match self.payload(kind)? {
            MetricPayload::Figure(figure) => Ok(figure),
            _ => Err(wrong_shape(kind, "figure")),
        }
    }

    pub fn job_table(&self) -> ResultsResult<JobTable> {
        match self.payload(MetricKind::JobsUtilization)? {
            MetricPayload::Jobs(table) => Ok(table),
            _ => Err(wrong_shape(MetricKind::JobsUtilization, "job table")),
        }
    }

    pub fn series(&self, kind: MetricKind) -> ResultsResult<TimeSeries> {
        match self.payload(kind)? {
            MetricPayload::Series(series) => Ok(series),
            _ => Err(wrong_shape(kind, "time series")),
        }
    }

    pub fn makespan_speedup(&self) -> ResultsResult<f64> {
        match self.payload(MetricKind::MakespanSpeedup)? {
            MetricPayload::Scalar(value) => Ok(value),
            _ => Err(wrong_shape(MetricKind::MakespanSpeedup, "scalar")),
        }
    }

    pub fn workload(&self) -> ResultsResult<String> {
        match self.payload(MetricKind::Workload)? {
            MetricPayload::Upload(text) => Ok(text),
            _ => Err(wrong_shape(MetricKind::Workload, "workload text")),
        }
    }
}

fn wrong_shape(kind: MetricKind, expected: &str) -> ResultsError {
    ResultsError::Malformed {
        metric: kind.name().to_string(),
        reason: format!("not a {expected}"),
    }
}
