//! A named node of the state graph.
//!
//! A `State` carries an immutable name, optional lifecycle notification
//! names and a mutable map from action name to target state name.

use crate::machine::MachineError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A state of the machine.
///
/// The name and lifecycle notification names are fixed at construction.
/// The transition map stays mutable for the life of the machine.
///
/// # Example
///
/// ```rust
/// use statebus::core::State;
///
/// let mut running = State::new("StopWatch/states/running")
///     .unwrap()
///     .entering("ensureTimer");
///
/// running.define_transition("StopWatch/actions/stop", "StopWatch/states/stopped");
/// running.define_transition("StopWatch/actions/stop", "StopWatch/states/ready");
///
/// // First definition wins
/// assert_eq!(
///     running.resolve_target("StopWatch/actions/stop"),
///     Some("StopWatch/states/stopped")
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    name: String,
    entering: Option<String>,
    exiting: Option<String>,
    changed: Option<String>,
    transitions: IndexMap<String, String>,
}

impl State {
    /// Create a state with no lifecycle notifications and no transitions.
    ///
    /// An empty name is rejected.
    pub fn new(name: impl Into<String>) -> Result<Self, MachineError> {
        let name = name.into();
        if name.is_empty() {
            return Err(MachineError::EmptyStateName);
        }

        Ok(Self {
            name,
            entering: None,
            exiting: None,
            changed: None,
            transitions: IndexMap::new(),
        })
    }

    /// Set the notification sent when this state is being entered.
    ///
    /// An empty name means no notification.
    pub fn entering(mut self, event: impl Into<String>) -> Self {
        self.entering = non_empty(event.into());
        self
    }

    /// Set the notification sent when this state is being exited.
    pub fn exiting(mut self, event: impl Into<String>) -> Self {
        self.exiting = non_empty(event.into());
        self
    }

    /// Set the notification sent once this state has become current.
    pub fn changed(mut self, event: impl Into<String>) -> Self {
        self.changed = non_empty(event.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entering_event(&self) -> Option<&str> {
        self.entering.as_deref()
    }

    pub fn exiting_event(&self) -> Option<&str> {
        self.exiting.as_deref()
    }

    pub fn changed_event(&self) -> Option<&str> {
        self.changed.as_deref()
    }

    /// Define a transition from this state.
    ///
    /// Redefining an action that already has a target is a no-op; remove
    /// it first to change the target. Returns `true` if the mapping was
    /// added.
    pub fn define_transition(
        &mut self,
        action: impl Into<String>,
        target: impl Into<String>,
    ) -> bool {
        let action = action.into();
        if self.transitions.contains_key(&action) {
            return false;
        }
        self.transitions.insert(action, target.into());
        true
    }

    /// Remove the transition for `action`, returning its former target.
    pub fn remove_transition(&mut self, action: &str) -> Option<String> {
        self.transitions.shift_remove(action)
    }

    /// Look up the target state name for `action` (pure).
    pub fn resolve_target(&self, action: &str) -> Option<&str> {
        self.transitions.get(action).map(String::as_str)
    }

    /// All `(action, target)` pairs in definition order.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.transitions
            .iter()
            .map(|(action, target)| (action.as_str(), target.as_str()))
    }
}

fn non_empty(event: String) -> Option<String> {
    if event.is_empty() {
        None
    } else {
        Some(event)
    }
}
