//! Reasons a navigation event leaves the current view on screen.

use std::fmt;

/// Store level a route tag is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Experiment,
    Scheduler,
    Metric,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Experiment => "experiment",
            Level::Scheduler => "scheduler",
            Level::Metric => "metric",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NavNoOp {
    #[error("No results loaded")]
    NotLoaded,

    #[error("Route `{key}` has {segments} segments")]
    SegmentCount { key: String, segments: usize },

    #[error("Unrecognized route segment: {segment}")]
    UnknownRoute { segment: String },

    #[error("No {level} matches tag `{tag}`")]
    DecodeMiss { level: Level, tag: String },

    #[error("No renderer for metric: {metric}")]
    UnknownMetric { metric: String },

    #[error("`{key}` is a download route")]
    DownloadRoute { key: String },

    #[error("`{key}` is not a download route")]
    NotDownloadRoute { key: String },

    #[error("Unusable {metric} for {scheduler}: {reason}")]
    Payload {
        scheduler: String,
        metric: String,
        reason: String,
    },

    #[error("No scheduler in {experiment} reports {metric}")]
    NothingToPlot { experiment: String, metric: String },

    #[error("Distribution views need the all-experiments chart on screen")]
    ViewUnavailable,
}

/// Coarse classification of a [`NavNoOp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavNoOpCategory {
    NotReady,
    UnrecognizedVariant,
    LookupMiss,
    StructuralMismatch,
}

impl NavNoOp {
    pub fn category(&self) -> NavNoOpCategory {
        match self {
            Self::NotLoaded | Self::ViewUnavailable => NavNoOpCategory::NotReady,
            Self::SegmentCount { .. }
            | Self::UnknownRoute { .. }
            | Self::UnknownMetric { .. }
            | Self::DownloadRoute { .. }
            | Self::NotDownloadRoute { .. } => NavNoOpCategory::UnrecognizedVariant,
            Self::DecodeMiss { .. } | Self::NothingToPlot { .. } => NavNoOpCategory::LookupMiss,
            Self::Payload { .. } => NavNoOpCategory::StructuralMismatch,
        }
    }

    pub(crate) fn payload(
        scheduler: &str,
        metric: sd_results::MetricKind,
        err: sd_results::ResultsError,
    ) -> Self {
        Self::Payload {
            scheduler: scheduler.to_string(),
            metric: metric.name().to_string(),
            reason: err.to_string(),
        }
    }
}

pub type NavResult<T> = Result<T, NavNoOp>;
