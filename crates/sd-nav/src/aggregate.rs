//! Cross-experiment pooling for the all-experiments view.

use crate::chart::{
    Annotation, Axis, AxisTitle, ChartSpec, Font, Grid, Layout, Marker, MenuButton, Trace,
    UpdateMenu, bold,
};
use sd_results::ResultsStore;
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One job's ratios, labelled with the experiment it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PooledSample {
    pub label: String,
    pub speedup: f64,
    pub turnaround: f64,
    pub waiting: f64,
}

/// Everything one scheduler contributed across experiments.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerPool {
    pub scheduler: String,
    pub samples: Vec<PooledSample>,
    pub makespans: Vec<f64>,
}

impl SchedulerPool {
    fn new(scheduler: &str) -> Self {
        Self {
            scheduler: scheduler.to_string(),
            samples: Vec::new(),
            makespans: Vec::new(),
        }
    }

    /// Mean of the per-experiment makespan speedups, `0.0` when none were
    /// reported.
    pub fn mean_makespan_speedup(&self) -> f64 {
        if self.makespans.is_empty() {
            return 0.0;
        }
        self.makespans.iter().sum::<f64>() / self.makespans.len() as f64
    }

    pub fn labels(&self) -> Vec<String> {
        self.samples.iter().map(|s| s.label.clone()).collect()
    }

    pub fn speedups(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.speedup).collect()
    }

    pub fn turnarounds(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.turnaround).collect()
    }

    pub fn waiting_times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.waiting).collect()
    }
}

/// Pooled statistics for every non-baseline scheduler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateStatistics {
    pub pools: Vec<SchedulerPool>,
    pub experiments: usize,
    pub jobs_per_experiment: usize,
}

impl AggregateStatistics {
    pub fn compute(store: &ResultsStore) -> Self {
        let mut pools = Vec::new();

        for scheduler in store.non_baseline_schedulers() {
            let mut pool = SchedulerPool::new(scheduler);

            for (index, (experiment, results)) in store.experiments().enumerate() {
                let Some(results) = results.scheduler(scheduler) else {
                    debug!(experiment, scheduler, "scheduler absent from experiment");
                    continue;
                };

                match results.job_table() {
                    Ok(jobs) => {
                        pool.samples.extend(jobs.iter().map(|(job, ratios)| PooledSample {
                            label: format!("[exp{index}]{job}"),
                            speedup: ratios.speedup,
                            turnaround: ratios.turnaround,
                            waiting: ratios.waiting,
                        }));
                    }
                    Err(err) => debug!(experiment, scheduler, %err, "skipping job ratios"),
                }

                match results.makespan_speedup() {
                    Ok(makespan) => pool.makespans.push(makespan),
                    Err(err) => debug!(experiment, scheduler, %err, "skipping makespan speedup"),
                }
            }

            pools.push(pool);
        }

        let jobs_per_experiment = store
            .experiments()
            .next()
            .map(|(_, experiment)| experiment.job_count())
            .unwrap_or(0);

        Self {
            pools,
            experiments: store.len(),
            jobs_per_experiment,
        }
    }

    pub fn pool(&self, scheduler: &str) -> Option<&SchedulerPool> {
        self.pools.iter().find(|p| p.scheduler == scheduler)
    }

    /// `0.0` for schedulers that never reported.
    pub fn mean_makespan_speedup(&self, scheduler: &str) -> f64 {
        self.pool(scheduler)
            .map(SchedulerPool::mean_makespan_speedup)
            .unwrap_or(0.0)
    }

    pub fn scheduler_names(&self) -> Vec<String> {
        self.pools.iter().map(|p| p.scheduler.clone()).collect()
    }
}

/// Which pooled distributions the all-experiments chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistributionView {
    #[default]
    All,
    Speedup,
    Turnaround,
    Waiting,
}

impl DistributionView {
    pub const ALL: [DistributionView; 4] = [
        DistributionView::All,
        DistributionView::Speedup,
        DistributionView::Turnaround,
        DistributionView::Waiting,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DistributionView::All => "All",
            DistributionView::Speedup => "Jobs speedups",
            DistributionView::Turnaround => "Jobs turnarounds",
            DistributionView::Waiting => "Jobs waiting time",
        }
    }

    /// Which of the three subplots stay visible.
    fn shown(self) -> [bool; 3] {
        match self {
            DistributionView::All => [true, true, true],
            DistributionView::Speedup => [true, false, false],
            DistributionView::Turnaround => [false, true, false],
            DistributionView::Waiting => [false, false, true],
        }
    }

    fn domain(self, subplot: usize) -> [f64; 2] {
        const SIDE_BY_SIDE: [[f64; 2]; 3] = [[0.0, 0.3], [0.35, 0.65], [0.7, 1.0]];
        match self {
            DistributionView::All => SIDE_BY_SIDE[subplot],
            _ if self.shown()[subplot] => [0.0, 1.0],
            _ => [0.0, 0.0],
        }
    }

    /// Makespan labels sit on the speedup subplot.
    fn shows_annotations(self) -> bool {
        self.shown()[0]
    }
}

impl fmt::Display for DistributionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DistributionView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(DistributionView::All),
            "speedup" | "speedups" => Ok(DistributionView::Speedup),
            "turnaround" | "turnarounds" => Ok(DistributionView::Turnaround),
            "waiting" => Ok(DistributionView::Waiting),
            other => Err(format!("unknown distribution view: {other}")),
        }
    }
}

const SUBPLOT_AXES: [(&str, &str); 3] = [("xaxis", "yaxis"), ("xaxis2", "yaxis2"), ("xaxis3", "yaxis3")];
const Y_TITLES: [&str; 3] = [
    "Jobs and average makespan speedups",
    "Jobs turnaround ratio",
    "Jobs waiting time difference",
];

/// The all-experiments chart, kept so the view can be switched without
/// pooling again.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalChart {
    base: ChartSpec,
    annotations: Vec<Annotation>,
    schedulers: usize,
}

impl GlobalChart {
    pub fn build(stats: &AggregateStatistics) -> Self {
        let mut data = Vec::with_capacity(stats.pools.len() * 3 + 1);
        for pool in &stats.pools {
            let labels = pool.labels();
            let series = [pool.speedups(), pool.turnarounds(), pool.waiting_times()];
            for (subplot, values) in series.into_iter().enumerate() {
                data.push(
                    Trace::distribution(&pool.scheduler, values, labels.clone())
                        .on_subplot(subplot + 1)
                        .with_marker(Marker {
                            opacity: Some(0.6),
                            color: None,
                        }),
                );
            }
        }

        let means: Vec<f64> = stats
            .pools
            .iter()
            .map(SchedulerPool::mean_makespan_speedup)
            .collect();
        data.push(
            Trace::categories(stats.scheduler_names(), means.clone())
                .named("Average makespan speedup")
                .with_marker(Marker {
                    opacity: None,
                    color: Some("black".to_string()),
                })
                .without_legend(),
        );

        let annotations = stats
            .scheduler_names()
            .into_iter()
            .zip(means)
            .map(|(scheduler, mean)| Annotation {
                x: Value::String(scheduler),
                y: mean,
                xref: "x",
                yref: "y",
                text: bold(&format!("{mean:.2}")),
                font: Font { size: 20 },
            })
            .collect();

        let title = format!(
            "{}<br>{} experiment(s), {} jobs per experiment",
            bold("All experiments and scheduling algorithms"),
            stats.experiments,
            stats.jobs_per_experiment
        );
        let mut layout = Layout::titled(title);
        layout.font = Some(Font { size: 15 });
        layout.grid = Some(Grid::side_by_side(3));
        for (subplot, (x_name, y_name)) in SUBPLOT_AXES.into_iter().enumerate() {
            layout.axes.insert(x_name.to_string(), large_axis("Scheduling algorithms"));
            layout.axes.insert(y_name.to_string(), large_axis(Y_TITLES[subplot]));
        }

        let mut chart = Self {
            base: ChartSpec { data, layout },
            annotations,
            schedulers: stats.pools.len(),
        };
        let buttons = DistributionView::ALL
            .into_iter()
            .map(|view| chart.menu_button(view))
            .collect();
        chart.base.layout.updatemenus = vec![UpdateMenu::buttons(buttons)];
        chart
    }

    /// Per-trace visibility: three distributions per scheduler, then the
    /// makespan series.
    pub fn visibility(&self, view: DistributionView) -> Vec<bool> {
        let shown = view.shown();
        let mut visible = Vec::with_capacity(self.schedulers * 3 + 1);
        for _ in 0..self.schedulers {
            visible.extend(shown);
        }
        visible.push(view.shows_annotations());
        visible
    }

    /// The chart laid out for `view`; pooled data is reused untouched.
    pub fn for_view(&self, view: DistributionView) -> ChartSpec {
        let mut spec = self.base.clone();
        for (trace, visible) in spec.data.iter_mut().zip(self.visibility(view)) {
            trace.visible = (view != DistributionView::All).then_some(visible);
        }
        for (subplot, (x_name, y_name)) in SUBPLOT_AXES.into_iter().enumerate() {
            let shown = view.shown()[subplot];
            if let Some(axis) = spec.layout.axes.get_mut(x_name) {
                axis.domain = Some(view.domain(subplot));
                axis.visible = Some(shown);
            }
            if let Some(axis) = spec.layout.axes.get_mut(y_name) {
                axis.visible = Some(shown);
            }
        }
        spec.layout.annotations = if view.shows_annotations() {
            self.annotations.clone()
        } else {
            Vec::new()
        };
        spec
    }

    fn menu_button(&self, view: DistributionView) -> MenuButton {
        let mut relayout = serde_json::Map::new();
        for (subplot, (x_name, y_name)) in SUBPLOT_AXES.into_iter().enumerate() {
            let shown = view.shown()[subplot];
            relayout.insert(format!("{x_name}.domain"), json!(view.domain(subplot)));
            relayout.insert(format!("{x_name}.visible"), json!(shown));
            relayout.insert(format!("{y_name}.visible"), json!(shown));
        }
        let annotations = if view.shows_annotations() {
            match serde_json::to_value(&self.annotations) {
                Ok(annotations) => annotations,
                Err(err) => {
                    debug!(%view, %err, "menu button drops unserializable annotations");
                    json!([])
                }
            }
        } else {
            json!([])
        };
        relayout.insert("annotations".to_string(), annotations);

        MenuButton {
            label: view.label().to_string(),
            method: "update",
            args: [
                json!({ "visible": self.visibility(view) }),
                Value::Object(relayout),
            ],
        }
    }
}

fn large_axis(title: &str) -> Axis {
    Axis {
        title: Some(AxisTitle {
            text: bold(title),
            font: Some(Font { size: 16 }),
        }),
        tickfont: Some(Font { size: 14 }),
        ..Axis::default()
    }
}
