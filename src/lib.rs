//! Statebus: a declarative, notification-driven finite state machine
//!
//! A `StateMachine` holds named states, each with optional lifecycle
//! notifications (entering, exiting, changed) and a map from action name to
//! target state. Applications send actions; the machine answers with
//! lifecycle notifications on its bus, and any listener may veto a
//! transition while it is exiting or entering.
//!
//! # Core Concepts
//!
//! - **State**: a named node with lifecycle notification names and transitions
//! - **Notifier / EventBus**: synchronous delivery of notifications to listeners
//! - **StateMachine**: the transition engine and its cancellation checkpoints
//! - **FsmInjector**: builds a machine from a JSON or TOML description
//!
//! # Example
//!
//! ```rust
//! use statebus::bus::{EventBus, CHANGED};
//! use statebus::core::State;
//! use statebus::machine::StateMachine;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut bus: EventBus<()> = EventBus::new();
//! let changes = Rc::new(RefCell::new(Vec::new()));
//! let seen = Rc::clone(&changes);
//! bus.on(CHANGED, move |note, _| {
//!     seen.borrow_mut().push(note.kind().unwrap_or_default().to_string());
//! });
//!
//! // Refuse to leave "ready" for "running"
//! bus.on("ready/exiting", |note, reaction| {
//!     if note.kind() == Some("running") {
//!         reaction.cancel();
//!     }
//! });
//!
//! let mut ready = State::new("ready").unwrap().exiting("ready/exiting");
//! ready.define_transition("start", "running");
//! ready.define_transition("stop", "stopped");
//!
//! let mut machine = StateMachine::new(bus);
//! machine.register_state(ready, true);
//! machine.register_state(State::new("running").unwrap(), false);
//! machine.register_state(State::new("stopped").unwrap(), false);
//!
//! machine.activate().unwrap();
//! assert!(machine.on_action("start", None).unwrap().is_canceled());
//! assert!(machine.on_action("stop", None).unwrap().is_changed());
//!
//! assert_eq!(*changes.borrow(), vec!["ready", "stopped"]);
//! ```

pub mod builder;
pub mod bus;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{BuildError, FsmDescription, FsmInjector};
pub use crate::bus::{EventBus, Guard, Notification, Notifier, Reaction};
pub use crate::core::{State, StateHistory, StateTransition};
pub use crate::machine::{MachineConfig, MachineError, StateMachine, TransitionOutcome};
