//! Tunables for a state machine instance.

use serde::{Deserialize, Serialize};

/// Runtime options of a `StateMachine`.
///
/// Deserializes with defaults for every missing field, so it can be embedded
/// as an optional table in a graph description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Upper bound on listener-requested actions processed after one dispatch
    pub max_deferred_actions: usize,

    /// Keep a `StateHistory` of committed transitions
    pub record_history: bool,

    /// Most recent transitions kept in the history; older ones are dropped
    pub history_limit: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_deferred_actions: 64,
            record_history: true,
            history_limit: 256,
        }
    }
}
