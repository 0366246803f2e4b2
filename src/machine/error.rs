//! Errors reported by the state machine.

use crate::machine::outcome::TransitionOutcome;
use thiserror::Error;

/// Caller or configuration mistakes detected by the machine.
///
/// Normal runtime no-ops (unknown action, duplicate registration) are not
/// errors and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error("State name must not be empty")]
    EmptyStateName,

    #[error("Action '{action}' in state '{state}' targets unregistered state '{target}'")]
    UnresolvedTarget {
        state: String,
        action: String,
        target: String,
    },

    #[error("State '{0}' is the current state and cannot be removed")]
    StateActive(String),

    #[error("More than {limit} deferred actions requested during one dispatch")]
    DeferredOverflow { limit: usize },

    /// The requested action completed with `outcome`, then a follow-up
    /// requested by a listener failed.
    #[error("Deferred action failed after the transition to {outcome:?}: {source}")]
    Deferred {
        outcome: TransitionOutcome,
        source: Box<MachineError>,
    },
}
