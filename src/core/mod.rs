//! Core state graph types.
//!
//! This module contains the plain data of the machine:
//! - `State`: a named node with lifecycle notification names and an
//!   action to target map
//! - `StateHistory`: an immutable record of committed transitions
//!
//! Nothing in here emits notifications; that happens in `machine`.

mod history;
mod state;

pub use history::{StateHistory, StateTransition};
pub use state::State;
