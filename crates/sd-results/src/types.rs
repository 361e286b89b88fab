//! Metric vocabulary and typed payloads.

use crate::{ResultsError, ResultsResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reference scheduler every other scheduler is compared against.
pub const BASELINE_SCHEDULER: &str = "Default Scheduler";

/// Metrics a simulation run publishes per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    ResourceUsage,
    GanttDiagram,
    ClusterHistory,
    JobsUtilization,
    JobsThroughput,
    WaitingQueue,
    UnusedCores,
    MakespanSpeedup,
    Workload,
}

/// How a metric's raw JSON is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Figure,
    JobTable,
    Series,
    Scalar,
    Upload,
}

impl MetricKind {
    pub const ALL: [MetricKind; 9] = [
        MetricKind::ResourceUsage,
        MetricKind::GanttDiagram,
        MetricKind::ClusterHistory,
        MetricKind::JobsUtilization,
        MetricKind::JobsThroughput,
        MetricKind::WaitingQueue,
        MetricKind::UnusedCores,
        MetricKind::MakespanSpeedup,
        MetricKind::Workload,
    ];

    /// Name under which the metric is stored.
    pub fn name(self) -> &'static str {
        match self {
            MetricKind::ResourceUsage => "Resource usage",
            MetricKind::GanttDiagram => "Gantt diagram",
            MetricKind::ClusterHistory => "Cluster history",
            MetricKind::JobsUtilization => "Jobs utilization",
            MetricKind::JobsThroughput => "Jobs throughput",
            MetricKind::WaitingQueue => "Waiting queue",
            MetricKind::UnusedCores => "Unused cores",
            MetricKind::MakespanSpeedup => "Makespan speedup",
            MetricKind::Workload => "Workload",
        }
    }

    /// Metric names are matched ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub fn shape(self) -> PayloadShape {
        match self {
            MetricKind::ResourceUsage | MetricKind::GanttDiagram | MetricKind::ClusterHistory => {
                PayloadShape::Figure
            }
            MetricKind::JobsUtilization => PayloadShape::JobTable,
            MetricKind::JobsThroughput | MetricKind::WaitingQueue | MetricKind::UnusedCores => {
                PayloadShape::Series
            }
            MetricKind::MakespanSpeedup => PayloadShape::Scalar,
            MetricKind::Workload => PayloadShape::Upload,
        }
    }

    /// Axis titles used when the metric is drawn as a time series.
    pub fn series_axes(self) -> Option<(&'static str, &'static str)> {
        match self {
            MetricKind::JobsThroughput => Some(("Time (s)", "Number of finished jobs")),
            MetricKind::WaitingQueue => Some(("Time (s)", "Number of waiting jobs")),
            MetricKind::UnusedCores => Some(("Time (s)", "Number of unused cores")),
            _ => None,
        }
    }
}

/// Per-job ratios against the baseline run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JobUtilization {
    pub speedup: f64,
    pub turnaround: f64,
    pub waiting: f64,
}

/// Keyed by job name, in document order.
pub type JobTable = IndexMap<String, JobUtilization>;

/// Parallel `(x[], y[])` arrays, stored on the wire as a two-element array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(Vec<f64>, Vec<f64>)", into = "(Vec<f64>, Vec<f64>)")]
pub struct TimeSeries {
    pub timestamps: Vec<f64>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(timestamps: Vec<f64>, values: Vec<f64>) -> ResultsResult<Self> {
        if timestamps.len() != values.len() {
            return Err(ResultsError::Malformed {
                metric: "time series".to_string(),
                reason: format!(
                    "{} timestamps but {} values",
                    timestamps.len(),
                    values.len()
                ),
            });
        }
        Ok(Self { timestamps, values })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

impl TryFrom<(Vec<f64>, Vec<f64>)> for TimeSeries {
    type Error = ResultsError;

    fn try_from((timestamps, values): (Vec<f64>, Vec<f64>)) -> Result<Self, Self::Error> {
        Self::new(timestamps, values)
    }
}

impl From<TimeSeries> for (Vec<f64>, Vec<f64>) {
    fn from(series: TimeSeries) -> Self {
        (series.timestamps, series.values)
    }
}

/// A metric decoded according to its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricPayload {
    /// Complete chart, rendered verbatim.
    Figure(Value),
    Jobs(JobTable),
    Series(TimeSeries),
    Scalar(f64),
    /// Workload file contents, passed through untouched.
    Upload(String),
}

impl MetricPayload {
    pub fn decode(kind: MetricKind, raw: &Value) -> ResultsResult<Self> {
        let malformed = |reason: String| ResultsError::Malformed {
            metric: kind.name().to_string(),
            reason,
        };

        match kind.shape() {
            PayloadShape::Figure => match raw {
                // The simulator hands figures over already serialized.
                Value::String(text) => serde_json::from_str(text)
                    .map(MetricPayload::Figure)
                    .map_err(|e| malformed(e.to_string())),
                Value::Object(_) => Ok(MetricPayload::Figure(raw.clone())),
                other => Err(malformed(format!("expected a figure, found {other}"))),
            },
            PayloadShape::JobTable => JobTable::deserialize(raw)
                .map(MetricPayload::Jobs)
                .map_err(|e| malformed(e.to_string())),
            PayloadShape::Series => TimeSeries::deserialize(raw)
                .map(MetricPayload::Series)
                .map_err(|e| malformed(e.to_string())),
            PayloadShape::Scalar => raw
                .as_f64()
                .map(MetricPayload::Scalar)
                .ok_or_else(|| malformed(format!("expected a number, found {raw}"))),
            PayloadShape::Upload => raw
                .as_str()
                .map(|text| MetricPayload::Upload(text.to_string()))
                .ok_or_else(|| malformed("expected workload text".to_string())),
        }
    }
}
