//! Errors raised while loading and injecting a graph description.

use crate::machine::MachineError;
use thiserror::Error;

/// A problem found by `FsmDescription::validate`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphViolation {
    #[error("initial state name is empty")]
    EmptyInitial,

    #[error("initial state '{0}' is not declared")]
    UnknownInitial(String),

    #[error("state #{index} has an empty name")]
    EmptyStateName { index: usize },

    #[error("state '{0}' is declared more than once")]
    DuplicateState(String),

    #[error("state '{state}' has a transition with an empty action")]
    EmptyAction { state: String },

    #[error("action '{action}' in state '{state}' targets undeclared state '{target}'")]
    UnresolvedTarget {
        state: String,
        action: String,
        target: String,
    },
}

/// Errors that can occur when building a state machine from a description.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to read graph description: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON graph description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML graph description: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to write TOML graph description: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Unsupported graph description format: '{0}' (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("Invalid state graph: {}", join(.0))]
    Invalid(Vec<GraphViolation>),

    #[error(transparent)]
    Machine(#[from] MachineError),
}

fn join(violations: &[GraphViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
