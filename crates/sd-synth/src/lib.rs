//! sd-synth: builds a run configuration from the configuration form.
//!
//! The form arrives as a snapshot of serialized widget subtrees plus a few
//! scalar control values. Each subtree is matched against the shape expected
//! for the currently selected variant; anything unexpected aborts the whole
//! pass with a [`NoOp`] describing why.

pub mod build;
pub mod error;
pub mod shape;
pub mod snapshot;
pub mod synthesize;
pub mod tree;

pub use error::{NoOp, NoOpCategory, SynthResult};
pub use shape::{ControlValue, GeneratorOptions, HyperParamField, LabeledNumber, SchedulerRow, UploadField};
pub use snapshot::{ClusterForm, ClusterSource, FormSnapshot, SimulationForm};
pub use synthesize::{Directories, match_generator_options, match_scheduler_rows, synthesize};
pub use tree::Widget;
