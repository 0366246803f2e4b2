//! Notifications exchanged between the machine and its listeners.

use crate::core::State;
use std::fmt;

/// Sent by the application to trigger a transition. The action name travels
/// as the notification's kind, the optional payload as its body.
pub const ACTION: &str = "StateMachine/notes/action";

/// Sent by a listener to veto the transition in flight.
pub const CANCEL: &str = "StateMachine/notes/cancel";

/// Sent by the machine after every committed transition, with the new
/// `State` as body and its name as kind.
pub const CHANGED: &str = "StateMachine/notes/changed";

/// Body of a notification.
pub enum Body<'a, P> {
    Empty,
    Payload(&'a P),
    State(&'a State),
}

impl<P> Clone for Body<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Body<'_, P> {}

impl<P: fmt::Debug> fmt::Debug for Body<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Payload(payload) => f.debug_tuple("Payload").field(payload).finish(),
            Self::State(state) => f.debug_tuple("State").field(&state.name()).finish(),
        }
    }
}

/// A named notification with a body and an optional discriminator.
///
/// # Example
///
/// ```rust
/// use statebus::bus::{Notification, ACTION};
///
/// let payload = 42;
/// let note = Notification::action("StopWatch/actions/start", Some(&payload));
///
/// assert_eq!(note.name(), ACTION);
/// assert_eq!(note.kind(), Some("StopWatch/actions/start"));
/// assert_eq!(note.payload(), Some(&42));
/// ```
pub struct Notification<'a, P> {
    name: &'a str,
    body: Body<'a, P>,
    kind: Option<&'a str>,
}

impl<'a, P> Notification<'a, P> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            body: Body::Empty,
            kind: None,
        }
    }

    /// An `ACTION` notification for `action`.
    pub fn action(action: &'a str, payload: Option<&'a P>) -> Self {
        Self::new(ACTION).with_payload(payload).with_kind(action)
    }

    /// A `CANCEL` notification.
    pub fn cancel() -> Self {
        Self::new(CANCEL)
    }

    /// Attach a payload body; `None` leaves the body empty.
    pub fn with_payload(mut self, payload: Option<&'a P>) -> Self {
        self.body = payload.map_or(Body::Empty, Body::Payload);
        self
    }

    pub fn with_state(mut self, state: &'a State) -> Self {
        self.body = Body::State(state);
        self
    }

    pub fn with_kind(mut self, kind: &'a str) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn body(&self) -> Body<'a, P> {
        self.body
    }

    pub fn kind(&self) -> Option<&'a str> {
        self.kind
    }

    /// The payload, if the body carries one.
    pub fn payload(&self) -> Option<&'a P> {
        match self.body {
            Body::Payload(payload) => Some(payload),
            _ => None,
        }
    }

    /// The state, if the body carries one.
    pub fn state(&self) -> Option<&'a State> {
        match self.body {
            Body::State(state) => Some(state),
            _ => None,
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for Notification<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("name", &self.name)
            .field("body", &self.body)
            .field("kind", &self.kind)
            .finish()
    }
}
