//! Construction of state machines from declarative descriptions.
//!
//! A `FsmDescription` is plain data (JSON or TOML). `FsmInjector` turns it
//! into `State`s and registers them with a fresh `StateMachine`, marking the
//! described initial state.

pub mod description;
pub mod error;
pub mod injector;
pub mod macros;

pub use description::{FsmDescription, Format, StateDescription, TransitionDescription};
pub use error::{BuildError, GraphViolation};
pub use injector::FsmInjector;
