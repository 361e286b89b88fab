//! Results loading, chart rendering, workload download and summaries.

use std::path::{Path, PathBuf};

use sd_nav::{
    AggregateStatistics, ChartCall, ChartSpec, DistributionView, DownloadPayload, GlobalChart,
    MenuEntry,
};
use sd_results::ResultsStore;
use serde::Serialize;

use crate::error::{AppError, AppResult};

pub fn load_results(path: &Path) -> AppResult<ResultsStore> {
    let store: ResultsStore = crate::config_service::read_json(path)?;
    tracing::info!(
        path = %path.display(),
        experiments = store.len(),
        "results loaded"
    );
    Ok(store)
}

pub fn list_routes(store: &ResultsStore) -> Vec<MenuEntry> {
    sd_nav::menu_routes(store)
}

/// Chart for a route key.
pub fn render_route(store: &ResultsStore, key: &str) -> AppResult<ChartCall> {
    Ok(sd_nav::render(store, key)?.chart())
}

/// The all-experiments chart laid out for one distribution view.
pub fn render_global_view(store: &ResultsStore, view: DistributionView) -> ChartSpec {
    let stats = AggregateStatistics::compute(store);
    GlobalChart::build(&stats).for_view(view)
}

pub fn download(store: &ResultsStore, key: &str) -> AppResult<DownloadPayload> {
    Ok(sd_nav::download_workload(store, key)?)
}

/// Write the workload for a download route into `dir`; returns the file path.
pub fn write_download(store: &ResultsStore, key: &str, dir: &Path) -> AppResult<PathBuf> {
    let payload = download(store, key)?;
    let path = dir.join(&payload.filename);

    std::fs::write(&path, payload.content).map_err(|e| AppError::FileWrite {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}

/// Pooled figures for one scheduler across every experiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedulerSummary {
    pub scheduler: String,
    pub jobs: usize,
    pub experiments_reported: usize,
    pub mean_makespan_speedup: f64,
    pub mean_speedup: f64,
    pub mean_turnaround: f64,
    pub mean_waiting: f64,
}

pub fn summarize(store: &ResultsStore) -> Vec<SchedulerSummary> {
    AggregateStatistics::compute(store)
        .pools
        .iter()
        .map(|pool| SchedulerSummary {
            scheduler: pool.scheduler.clone(),
            jobs: pool.samples.len(),
            experiments_reported: pool.makespans.len(),
            mean_makespan_speedup: pool.mean_makespan_speedup(),
            mean_speedup: mean(&pool.speedups()),
            mean_turnaround: mean(&pool.turnarounds()),
            mean_waiting: mean(&pool.waiting_times()),
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
