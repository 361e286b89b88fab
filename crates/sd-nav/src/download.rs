//! Workload re-download for `<exp>~<sched>~download-workload` routes.

use crate::error::{NavNoOp, NavResult};
use crate::route::{Route, resolve_experiment, resolve_scheduler};
use sd_results::{MetricKind, ResultsStore};
use serde::Serialize;
use tracing::debug;

/// File offered to the browser: the workload text as the simulator stored it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadPayload {
    pub content: String,
    pub filename: String,
}

pub fn download_workload(store: &ResultsStore, key: &str) -> NavResult<DownloadPayload> {
    let outcome = Route::parse(key).and_then(|route| match route {
        Route::Download {
            experiment,
            scheduler,
        } => {
            let (_, experiment_results) = resolve_experiment(store, &experiment)?;
            let (name, results) = resolve_scheduler(experiment_results, &scheduler)?;
            let content = results
                .workload()
                .map_err(|err| NavNoOp::payload(name, MetricKind::Workload, err))?;
            Ok(DownloadPayload {
                content,
                filename: format!("{experiment}.{scheduler}.workload"),
            })
        }
        _ => Err(NavNoOp::NotDownloadRoute {
            key: key.to_string(),
        }),
    });
    if let Err(reason) = &outcome {
        debug!(key, %reason, "download ignored");
    }
    outcome
}
