//! Route dispatch and the per-metric rendering strategies.

use crate::aggregate::{AggregateStatistics, DistributionView, GlobalChart};
use crate::chart::{Axis, ChartCall, ChartSpec, Grid, Layout, Trace, bold};
use crate::error::{NavNoOp, NavResult};
use crate::route::{ExperimentAggregate, Route, resolve_experiment, resolve_metric, resolve_scheduler};
use crate::session::ViewState;
use sd_results::{ExperimentResults, MetricKind, MetricPayload, ResultsStore, SchedulerResults};
use tracing::debug;

/// One metric of one scheduler of one experiment, by exact store names.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub experiment: String,
    pub scheduler: String,
    pub metric: MetricKind,
}

/// A resolved route together with the chart drawn for it.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Single {
        location: Location,
        chart: ChartCall,
    },
    ExperimentAggregate {
        experiment: String,
        aggregate: ExperimentAggregate,
        chart: ChartSpec,
    },
    Global {
        stats: AggregateStatistics,
        chart: GlobalChart,
    },
}

impl Rendered {
    pub fn chart(&self) -> ChartCall {
        match self {
            Rendered::Single { chart, .. } => chart.clone(),
            Rendered::ExperimentAggregate { chart, .. } => ChartCall::Built(chart.clone()),
            Rendered::Global { chart, .. } => ChartCall::Built(chart.for_view(DistributionView::All)),
        }
    }

    pub fn view(&self) -> ViewState {
        match self {
            Rendered::Single { location, .. } => ViewState::Single(location.clone()),
            Rendered::ExperimentAggregate {
                experiment,
                aggregate,
                ..
            } => ViewState::ExperimentAggregate {
                experiment: experiment.clone(),
                aggregate: *aggregate,
            },
            Rendered::Global { .. } => ViewState::GlobalAggregate(DistributionView::All),
        }
    }
}

/// Resolve `key` against `store` and build its chart.
pub fn render(store: &ResultsStore, key: &str) -> NavResult<Rendered> {
    let outcome = Route::parse(key).and_then(|route| render_route(store, &route));
    if let Err(reason) = &outcome {
        debug!(key, %reason, category = ?reason.category(), "navigation ignored");
    }
    outcome
}

pub fn render_route(store: &ResultsStore, route: &Route) -> NavResult<Rendered> {
    match route {
        Route::AllExperiments => {
            let stats = AggregateStatistics::compute(store);
            let chart = GlobalChart::build(&stats);
            Ok(Rendered::Global { stats, chart })
        }
        Route::Experiment {
            experiment,
            aggregate,
        } => {
            let (name, results) = resolve_experiment(store, experiment)?;
            let chart = experiment_overlay(name, results, *aggregate)?;
            Ok(Rendered::ExperimentAggregate {
                experiment: name.to_string(),
                aggregate: *aggregate,
                chart,
            })
        }
        Route::Single {
            experiment,
            scheduler,
            metric,
        } => {
            let (experiment, experiment_results) = resolve_experiment(store, experiment)?;
            let (scheduler, results) = resolve_scheduler(experiment_results, scheduler)?;
            let location = Location {
                experiment: experiment.to_string(),
                scheduler: scheduler.to_string(),
                metric: resolve_metric(results, metric)?,
            };
            let chart = render_metric(&location, results)?;
            Ok(Rendered::Single { location, chart })
        }
        Route::Download { .. } => Err(NavNoOp::DownloadRoute {
            key: route.to_string(),
        }),
    }
}

/// Draw a single metric. Scalars and workload files have no chart.
pub fn render_metric(location: &Location, results: &SchedulerResults) -> NavResult<ChartCall> {
    let scheduler = location.scheduler.as_str();
    let kind = location.metric;
    let payload = results
        .payload(kind)
        .map_err(|err| NavNoOp::payload(scheduler, kind, err))?;

    match payload {
        MetricPayload::Figure(figure) => Ok(ChartCall::Figure(figure)),
        MetricPayload::Jobs(jobs) => {
            let labels: Vec<String> = jobs.keys().cloned().collect();
            let series: [(&str, Vec<f64>); 3] = [
                ("Speedup", jobs.values().map(|j| j.speedup).collect()),
                ("Turnaround ratio", jobs.values().map(|j| j.turnaround).collect()),
                ("Waiting time difference", jobs.values().map(|j| j.waiting).collect()),
            ];
            let data = series
                .into_iter()
                .enumerate()
                .map(|(i, (name, values))| {
                    Trace::distribution(name, values, labels.clone()).on_subplot(i + 1)
                })
                .collect();
            let mut layout = Layout::titled(format!("{}<br>{}", bold(scheduler), kind.name()));
            layout.grid = Some(Grid::side_by_side(3));
            Ok(ChartCall::Built(ChartSpec { data, layout }))
        }
        MetricPayload::Series(series) => {
            let trace = Trace::line(series.timestamps, series.values).named(scheduler);
            let layout = series_layout(kind, format!("{}<br>{scheduler}", bold(single_title(kind))));
            Ok(ChartCall::Built(ChartSpec {
                data: vec![trace],
                layout,
            }))
        }
        MetricPayload::Scalar(_) | MetricPayload::Upload(_) => Err(NavNoOp::UnknownMetric {
            metric: kind.name().to_string(),
        }),
    }
}

/// Overlay one line per scheduler of `experiment`, baseline included.
/// Schedulers missing the metric are left out.
pub fn experiment_overlay(
    experiment: &str,
    results: &ExperimentResults,
    aggregate: ExperimentAggregate,
) -> NavResult<ChartSpec> {
    let kind = aggregate.metric();
    let mut data = Vec::new();
    let mut ymax = None;

    for (scheduler, scheduler_results) in results.schedulers() {
        match scheduler_results.series(kind) {
            Ok(series) => {
                if data.is_empty() {
                    ymax = series.last_value();
                }
                data.push(Trace::line(series.timestamps, series.values).named(scheduler));
            }
            Err(err) => debug!(experiment, scheduler, %err, "left out of overlay"),
        }
    }

    if data.is_empty() {
        return Err(NavNoOp::NothingToPlot {
            experiment: experiment.to_string(),
            metric: kind.name().to_string(),
        });
    }

    let mut layout = series_layout(kind, format!("{}<br>", bold(aggregate.label())));
    if aggregate == ExperimentAggregate::UnusedCores {
        if let (Some(ymax), Some(yaxis)) = (ymax, layout.axes.get_mut("yaxis")) {
            yaxis.tickmode = Some("array".to_string());
            yaxis.tickvals = Some(vec![0.0, ymax]);
        }
    }
    Ok(ChartSpec { data, layout })
}

fn single_title(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::WaitingQueue => "Number of jobs inside waiting queue per checkpoint",
        other => other.name(),
    }
}

fn series_layout(kind: MetricKind, title: String) -> Layout {
    let layout = Layout::titled(title).centered();
    match kind.series_axes() {
        Some((x, y)) => layout
            .with_axis("xaxis", Axis::titled(x))
            .with_axis("yaxis", Axis::titled(y)),
        None => layout,
    }
}
