//! Navigable routes for a results store, in menu order.

use crate::route::{ExperimentAggregate, Route};
use sd_results::{BASELINE_SCHEDULER, MetricKind, ResultsStore};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub key: String,
    pub label: String,
}

impl MenuEntry {
    fn new(route: Route, label: String) -> Self {
        Self {
            key: route.to_string(),
            label,
        }
    }
}

/// Every link the results menu offers: the all-experiments view, then per
/// experiment its overlays followed by each scheduler's views.
pub fn menu_routes(store: &ResultsStore) -> Vec<MenuEntry> {
    let mut entries = vec![MenuEntry::new(Route::all_experiments(), "All in one".to_string())];

    for (experiment, results) in store.experiments() {
        for aggregate in ExperimentAggregate::ALL {
            entries.push(MenuEntry::new(
                Route::experiment(experiment, aggregate),
                format!("{experiment} / {}", aggregate.label()),
            ));
        }

        for scheduler in results.scheduler_names() {
            let mut metrics = vec![MetricKind::GanttDiagram];
            // Ratios against the baseline are meaningless for the baseline.
            if scheduler != BASELINE_SCHEDULER {
                metrics.push(MetricKind::JobsUtilization);
            }
            for metric in metrics {
                entries.push(MenuEntry::new(
                    Route::single(experiment, scheduler, metric),
                    format!("{experiment} / {scheduler} / {}", metric.name()),
                ));
            }
            entries.push(MenuEntry::new(
                Route::download(experiment, scheduler),
                format!("{experiment} / {scheduler} / Workload download"),
            ));
            entries.push(MenuEntry::new(
                Route::single(experiment, scheduler, MetricKind::ClusterHistory),
                format!("{experiment} / {scheduler} / {}", MetricKind::ClusterHistory.name()),
            ));
        }
    }

    entries
}
