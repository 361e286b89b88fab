//! Reasons a synthesis pass declines to produce a configuration.

/// Why the configuration was left unchanged.
///
/// Synthesis is all-or-nothing: any of these aborts the whole pass.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NoOp {
    #[error("Unrecognized {what}: {value}")]
    UnknownVariant { what: &'static str, value: String },

    #[error("{what} not found: {name}")]
    LookupMiss { what: &'static str, name: String },

    #[error("Unexpected widget shape at {path}: expected {expected}")]
    ShapeMismatch { path: String, expected: String },

    #[error("No value entered for {field}")]
    MissingValue { field: String },
}

/// Coarse classification of a [`NoOp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpCategory {
    UnrecognizedVariant,
    LookupMiss,
    StructuralMismatch,
}

impl NoOp {
    pub fn category(&self) -> NoOpCategory {
        match self {
            Self::UnknownVariant { .. } => NoOpCategory::UnrecognizedVariant,
            Self::LookupMiss { .. } => NoOpCategory::LookupMiss,
            Self::ShapeMismatch { .. } | Self::MissingValue { .. } => {
                NoOpCategory::StructuralMismatch
            }
        }
    }

    pub(crate) fn shape(path: &str, expected: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            path: path.to_string(),
            expected: expected.into(),
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingValue {
            field: field.into(),
        }
    }
}

pub type SynthResult<T> = Result<T, NoOp>;
