//! The transition engine.
//!
//! `StateMachine` owns the registered states, tracks the current one, and
//! runs every transition through the same phases:
//!
//! 1. exiting notification for the current state (may be canceled)
//! 2. entering notification for the target (may be canceled)
//! 3. commit
//! 4. changed notification for the target, then the machine-wide `CHANGED`

mod config;
mod engine;
mod error;
mod outcome;

pub use config::MachineConfig;
pub use engine::StateMachine;
pub use error::MachineError;
pub use outcome::TransitionOutcome;
