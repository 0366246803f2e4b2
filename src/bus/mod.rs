//! Notification plumbing between the machine and the application.
//!
//! The machine only talks to a `Notifier`. `EventBus` is the in-process
//! implementation: listeners subscribe by notification name, are called
//! synchronously, and answer through a per-notification `Reaction`.

mod event_bus;
mod guard;
mod notification;

pub use event_bus::{DeferredAction, EventBus, Notifier, Reaction, SubscriptionId};
pub use guard::Guard;
pub use notification::{Body, Notification, ACTION, CANCEL, CHANGED};
