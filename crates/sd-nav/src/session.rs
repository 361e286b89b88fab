//! Browsing session: which view is on screen and which render may replace it.

use crate::aggregate::{DistributionView, GlobalChart};
use crate::chart::ChartCall;
use crate::error::{NavNoOp, NavResult};
use crate::render::{Location, Rendered, render};
use crate::route::ExperimentAggregate;
use chrono::{DateTime, Utc};
use sd_results::ResultsStore;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// No results yet, or results just replaced and nothing drawn from them.
    #[default]
    Idle,
    Single(Location),
    ExperimentAggregate {
        experiment: String,
        aggregate: ExperimentAggregate,
    },
    GlobalAggregate(DistributionView),
}

/// Where charts end up. The browser calls it only for the latest navigation.
pub trait ChartSink {
    fn render(&mut self, chart: &ChartCall);
}

impl<F: FnMut(&ChartCall)> ChartSink for F {
    fn render(&mut self, chart: &ChartCall) {
        self(chart)
    }
}

/// A chart built for a navigation event, waiting to be shown.
#[derive(Debug, Clone)]
pub struct PendingRender {
    ticket: u64,
    key: String,
    rendered: Rendered,
}

impl PendingRender {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn rendered(&self) -> &Rendered {
        &self.rendered
    }
}

#[derive(Debug, Default)]
pub struct ResultsBrowser {
    store: Option<Arc<ResultsStore>>,
    fingerprint: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
    view: ViewState,
    latest_ticket: u64,
    global: Option<GlobalChart>,
}

impl ResultsBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the results wholesale. Delivering identical results again
    /// keeps the current view; returns whether anything changed.
    pub fn load(&mut self, store: Arc<ResultsStore>) -> bool {
        let fingerprint = store.fingerprint();
        if self.fingerprint.as_deref() == Some(fingerprint.as_str()) {
            debug!(%fingerprint, "results unchanged");
            return false;
        }

        info!(
            %fingerprint,
            experiments = store.len(),
            "results loaded"
        );
        self.store = Some(store);
        self.fingerprint = Some(fingerprint);
        self.loaded_at = Some(Utc::now());
        self.view = ViewState::Idle;
        self.global = None;
        // Renders begun against the old results must not land.
        self.latest_ticket += 1;
        true
    }

    pub fn is_ready(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Option<&Arc<ResultsStore>> {
        self.store.as_ref()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Resolve `key` and build its chart. Supersedes any render begun earlier.
    /// A key that resolves to a no-op still supersedes earlier renders but
    /// leaves the visible chart alone.
    pub fn begin(&mut self, key: &str) -> NavResult<PendingRender> {
        self.latest_ticket += 1;
        let Some(store) = &self.store else {
            debug!(key, "navigation before results arrived");
            return Err(NavNoOp::NotLoaded);
        };
        let rendered = render(store, key)?;
        Ok(PendingRender {
            ticket: self.latest_ticket,
            key: key.to_string(),
            rendered,
        })
    }

    /// Show `pending` unless a newer navigation has begun since.
    pub fn complete(&mut self, pending: PendingRender, sink: &mut impl ChartSink) -> bool {
        if pending.ticket != self.latest_ticket {
            debug!(
                key = %pending.key,
                ticket = pending.ticket,
                latest = self.latest_ticket,
                "discarding stale render"
            );
            return false;
        }

        sink.render(&pending.rendered.chart());
        self.view = pending.rendered.view();
        self.global = match pending.rendered {
            Rendered::Global { chart, .. } => Some(chart),
            _ => None,
        };
        true
    }

    pub fn navigate(&mut self, key: &str, sink: &mut impl ChartSink) -> NavResult<()> {
        let pending = self.begin(key)?;
        self.complete(pending, sink);
        Ok(())
    }

    /// Re-lay-out the all-experiments chart without pooling again.
    pub fn switch_view(&mut self, view: DistributionView, sink: &mut impl ChartSink) -> NavResult<()> {
        let Some(global) = &self.global else {
            debug!(%view, "distribution view outside the all-experiments chart");
            return Err(NavNoOp::ViewUnavailable);
        };
        sink.render(&ChartCall::Built(global.for_view(view)));
        self.latest_ticket += 1;
        self.view = ViewState::GlobalAggregate(view);
        Ok(())
    }
}
