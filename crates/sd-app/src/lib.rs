//! Shared application service layer for the simulation dashboard.
//!
//! Frontends go through these services to synthesize and store run
//! configurations and to browse the results of a run.

pub mod config_service;
pub mod error;
pub mod results_service;

// Re-export key types for convenience
pub use config_service::{
    InputPaths, SynthesisInputs, configuration_to_yaml, load_configuration, load_inputs,
    save_configuration, synthesize_configuration, validate_configuration,
};
pub use error::{AppError, AppResult};
pub use results_service::{
    SchedulerSummary, download, list_routes, load_results, render_global_view, render_route,
    summarize, write_download,
};
