//! Route keys and the tag codec.
//!
//! A route key is the `~`-joined fragment the results menu links to. Each
//! segment is a tag: a store name lowercased with whitespace runs replaced by
//! `_`. Tags are resolved back to names against the keys actually present in
//! the store, never by reconstructing the name alone.

use crate::error::{Level, NavNoOp, NavResult};
use sd_results::{ExperimentResults, MetricKind, ResultsStore, SchedulerResults};
use std::fmt;

pub const ALL_EXPERIMENTS: &str = "all-experiments";
pub const DOWNLOAD_WORKLOAD: &str = "download-workload";
const SEPARATOR: char = '~';

pub fn encode_tag(name: &str) -> String {
    let mut tag = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                tag.push('_');
            }
            in_space = true;
        } else {
            tag.extend(c.to_lowercase());
            in_space = false;
        }
    }
    tag
}

/// Best-effort name reconstruction: `_` becomes a space and the first
/// character is capitalized.
pub fn decode_tag(tag: &str) -> String {
    let spaced = tag.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Find the name among `candidates` that `tag` refers to.
///
/// The decoded tag is compared case-insensitively first; names whose
/// encoding collapsed several spaces are then found by re-encoding.
pub fn resolve_tag<'a>(tag: &str, candidates: impl Iterator<Item = &'a str> + Clone) -> Option<&'a str> {
    let decoded = decode_tag(tag).to_lowercase();
    candidates
        .clone()
        .find(|name| name.to_lowercase() == decoded)
        .or_else(|| candidates.into_iter().find(|name| encode_tag(name) == tag))
}

/// The per-experiment overlays reachable from a two-segment route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentAggregate {
    JobsThroughputs,
    WaitingQueues,
    UnusedCores,
}

impl ExperimentAggregate {
    pub const ALL: [ExperimentAggregate; 3] = [
        ExperimentAggregate::JobsThroughputs,
        ExperimentAggregate::WaitingQueues,
        ExperimentAggregate::UnusedCores,
    ];

    pub fn token(self) -> &'static str {
        match self {
            ExperimentAggregate::JobsThroughputs => "all-jobs-throughputs",
            ExperimentAggregate::WaitingQueues => "all-waiting-queues",
            ExperimentAggregate::UnusedCores => "all-unused-cores",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.token() == token)
    }

    pub fn metric(self) -> MetricKind {
        match self {
            ExperimentAggregate::JobsThroughputs => MetricKind::JobsThroughput,
            ExperimentAggregate::WaitingQueues => MetricKind::WaitingQueue,
            ExperimentAggregate::UnusedCores => MetricKind::UnusedCores,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperimentAggregate::JobsThroughputs => "All jobs throughput",
            ExperimentAggregate::WaitingQueues => "All waiting queues",
            ExperimentAggregate::UnusedCores => "All unused cores",
        }
    }
}

/// A parsed route key. Segments stay encoded until resolved against a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    AllExperiments,
    Experiment {
        experiment: String,
        aggregate: ExperimentAggregate,
    },
    Single {
        experiment: String,
        scheduler: String,
        metric: String,
    },
    Download {
        experiment: String,
        scheduler: String,
    },
}

impl Route {
    /// Parse a route key; a leading `#` is ignored.
    pub fn parse(key: &str) -> NavResult<Self> {
        let key = key.strip_prefix('#').unwrap_or(key);
        let segments: Vec<&str> = key.split(SEPARATOR).collect();

        match segments.as_slice() {
            [ALL_EXPERIMENTS] => Ok(Route::AllExperiments),
            [other] => Err(NavNoOp::UnknownRoute {
                segment: other.to_string(),
            }),
            [experiment, token] => ExperimentAggregate::from_token(token)
                .map(|aggregate| Route::Experiment {
                    experiment: experiment.to_string(),
                    aggregate,
                })
                .ok_or_else(|| NavNoOp::UnknownRoute {
                    segment: token.to_string(),
                }),
            [experiment, scheduler, DOWNLOAD_WORKLOAD] => Ok(Route::Download {
                experiment: experiment.to_string(),
                scheduler: scheduler.to_string(),
            }),
            [experiment, scheduler, metric] => Ok(Route::Single {
                experiment: experiment.to_string(),
                scheduler: scheduler.to_string(),
                metric: metric.to_string(),
            }),
            _ => Err(NavNoOp::SegmentCount {
                key: key.to_string(),
                segments: segments.len(),
            }),
        }
    }

    pub fn all_experiments() -> Self {
        Route::AllExperiments
    }

    pub fn experiment(name: &str, aggregate: ExperimentAggregate) -> Self {
        Route::Experiment {
            experiment: encode_tag(name),
            aggregate,
        }
    }

    pub fn single(experiment: &str, scheduler: &str, metric: MetricKind) -> Self {
        Route::Single {
            experiment: encode_tag(experiment),
            scheduler: encode_tag(scheduler),
            metric: encode_tag(metric.name()),
        }
    }

    pub fn download(experiment: &str, scheduler: &str) -> Self {
        Route::Download {
            experiment: encode_tag(experiment),
            scheduler: encode_tag(scheduler),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::AllExperiments => f.write_str(ALL_EXPERIMENTS),
            Route::Experiment {
                experiment,
                aggregate,
            } => write!(f, "{experiment}{SEPARATOR}{}", aggregate.token()),
            Route::Single {
                experiment,
                scheduler,
                metric,
            } => write!(f, "{experiment}{SEPARATOR}{scheduler}{SEPARATOR}{metric}"),
            Route::Download {
                experiment,
                scheduler,
            } => write!(f, "{experiment}{SEPARATOR}{scheduler}{SEPARATOR}{DOWNLOAD_WORKLOAD}"),
        }
    }
}

pub(crate) fn resolve_experiment<'s>(
    store: &'s ResultsStore,
    tag: &str,
) -> NavResult<(&'s str, &'s ExperimentResults)> {
    resolve_tag(tag, store.experiment_names())
        .and_then(|name| store.experiment(name).map(|e| (name, e)))
        .ok_or_else(|| miss(Level::Experiment, tag))
}

pub(crate) fn resolve_scheduler<'s>(
    experiment: &'s ExperimentResults,
    tag: &str,
) -> NavResult<(&'s str, &'s SchedulerResults)> {
    resolve_tag(tag, experiment.scheduler_names())
        .and_then(|name| experiment.scheduler(name).map(|s| (name, s)))
        .ok_or_else(|| miss(Level::Scheduler, tag))
}

pub(crate) fn resolve_metric(scheduler: &SchedulerResults, tag: &str) -> NavResult<MetricKind> {
    let name = resolve_tag(tag, scheduler.metric_names()).ok_or_else(|| miss(Level::Metric, tag))?;
    MetricKind::from_name(name).ok_or_else(|| NavNoOp::UnknownMetric {
        metric: name.to_string(),
    })
}

fn miss(level: Level, tag: &str) -> NavNoOp {
    NavNoOp::DecodeMiss {
        level,
        tag: tag.to_string(),
    }
}
