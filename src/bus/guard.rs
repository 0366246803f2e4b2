//! Guard predicates that veto transitions.
//!
//! A guard inspects an exiting or entering notification and decides whether
//! the transition may proceed. Installed with `EventBus::guard`, a rejecting
//! guard cancels the transition in flight.

use super::notification::Notification;

/// Pure predicate over a lifecycle notification.
///
/// # Example
///
/// ```rust
/// use statebus::bus::{Guard, Notification};
///
/// // Never leave for the "stopped" state
/// let guard: Guard<()> = Guard::new(|note| note.kind() != Some("stopped"));
///
/// let to_paused = Notification::new("running/exiting").with_kind("paused");
/// let to_stopped = Notification::new("running/exiting").with_kind("stopped");
///
/// assert!(guard.check(&to_paused));
/// assert!(!guard.check(&to_stopped));
/// ```
pub struct Guard<P> {
    predicate: Box<dyn Fn(&Notification<'_, P>) -> bool>,
}

impl<P: 'static> Guard<P> {
    /// Create a guard from a predicate; `true` lets the transition proceed.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Notification<'_, P>) -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard that rejects exits heading for `target`.
    ///
    /// Exiting notifications carry the destination state's name as kind.
    pub fn reject_target(target: impl Into<String>) -> Self {
        let target = target.into();
        Self::new(move |note| note.kind() != Some(target.as_str()))
    }

    /// Guard over the payload alone. Notifications without a payload pass.
    pub fn on_payload<F>(predicate: F) -> Self
    where
        F: Fn(&P) -> bool + 'static,
    {
        Self::new(move |note| note.payload().is_none_or(&predicate))
    }

    /// Whether the guard lets the transition proceed.
    pub fn check(&self, note: &Notification<'_, P>) -> bool {
        (self.predicate)(note)
    }
}
