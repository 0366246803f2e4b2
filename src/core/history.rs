//! Record of committed state changes.
//!
//! Only transitions that reached the commit point are recorded; canceled
//! attempts leave no trace here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// A single committed transition.
///
/// # Example
///
/// ```rust
/// use statebus::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Some("ready".to_string()),
///     to: "running".to_string(),
///     action: Some("start".to_string()),
///     timestamp: Utc::now(),
/// };
/// assert!(!transition.is_activation());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state left behind, absent for the activation into the initial state
    pub from: Option<String>,
    /// The state that became current
    pub to: String,
    /// The action that triggered the transition, absent for activation
    pub action: Option<String>,
    /// When the commit happened
    pub timestamp: DateTime<Utc>,
}

impl StateTransition {
    /// Whether this is the machine's entry into its initial state.
    pub fn is_activation(&self) -> bool {
        self.from.is_none() && self.action.is_none()
    }
}

/// Ordered history of committed transitions.
///
/// `record` returns a new history with the transition appended and leaves
/// the receiver untouched. `push` appends in place and evicts the oldest
/// entries past a limit; the machine uses it so a long run stays bounded.
///
/// # Example
///
/// ```rust
/// use statebus::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: None,
///         to: "ready".to_string(),
///         action: None,
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: Some("ready".to_string()),
///         to: "running".to_string(),
///         action: Some("start".to_string()),
///         timestamp: Utc::now(),
///     });
///
/// assert_eq!(history.get_path(), vec!["ready", "running"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
        }
    }

    /// Return a new history with `transition` appended (pure).
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push_back(transition);
        Self { transitions }
    }

    /// Append `transition`, keeping at most `limit` of the newest entries.
    pub fn push(&mut self, transition: StateTransition, limit: usize) {
        self.transitions.push_back(transition);
        while self.transitions.len() > limit {
            self.transitions.pop_front();
        }
    }

    /// The sequence of state names visited.
    ///
    /// Starts with the first transition's origin when it has one, so an
    /// activation record contributes only its target.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(from) = self.transitions.front().and_then(|t| t.from.as_deref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Time between the first and the last recorded commit.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Recorded transitions, oldest first.
    pub fn transitions(&self) -> &VecDeque<StateTransition> {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
