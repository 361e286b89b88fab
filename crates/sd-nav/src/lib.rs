//! sd-nav: navigation over simulation results.
//!
//! Route keys from the results menu are resolved against a [`ResultsStore`]
//! and turned into chart render calls. Anything that cannot be resolved is
//! reported as a [`NavNoOp`] and the view on screen stays as it is.
//!
//! [`ResultsStore`]: sd_results::ResultsStore

pub mod aggregate;
pub mod chart;
pub mod download;
pub mod error;
pub mod menu;
pub mod render;
pub mod route;
pub mod session;

pub use aggregate::{AggregateStatistics, DistributionView, GlobalChart, PooledSample, SchedulerPool};
pub use chart::{ChartCall, ChartSpec, Trace};
pub use download::{DownloadPayload, download_workload};
pub use error::{Level, NavNoOp, NavNoOpCategory, NavResult};
pub use menu::{MenuEntry, menu_routes};
pub use render::{Location, Rendered, render};
pub use route::{ALL_EXPERIMENTS, DOWNLOAD_WORKLOAD, ExperimentAggregate, Route, decode_tag, encode_tag, resolve_tag};
pub use session::{ChartSink, PendingRender, ResultsBrowser, ViewState};
