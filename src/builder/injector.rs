//! Builds a populated state machine from a graph description.

use crate::builder::description::{FsmDescription, StateDescription};
use crate::builder::error::BuildError;
use crate::bus::Notifier;
use crate::core::State;
use crate::machine::{MachineError, StateMachine};
use std::cell::OnceCell;
use std::path::Path;
use tracing::debug;

/// Creates and registers the states of a described graph.
///
/// The state list is created from the description on first use and reused
/// afterwards. The machine handed back is populated but not activated;
/// activation is up to the host once the machine is wired to its bus.
///
/// # Example
///
/// ```rust
/// use statebus::builder::{FsmDescription, FsmInjector};
/// use statebus::bus::EventBus;
///
/// let description = FsmDescription::from_json(r#"{
///     "initial": "ready",
///     "states": [
///         { "name": "ready", "transitions": [{ "action": "start", "target": "running" }] },
///         { "name": "running" }
///     ]
/// }"#).unwrap();
///
/// let injector = FsmInjector::new(description);
/// let mut machine = injector.inject_checked::<(), _>(EventBus::new()).unwrap();
///
/// assert!(!machine.is_active());
/// machine.activate().unwrap();
/// machine.on_action("start", None).unwrap();
/// assert_eq!(machine.current_state().unwrap().name(), "running");
/// ```
pub struct FsmInjector {
    description: FsmDescription,
    states: OnceCell<Vec<State>>,
}

impl FsmInjector {
    pub fn new(description: FsmDescription) -> Self {
        Self {
            description,
            states: OnceCell::new(),
        }
    }

    /// Load the description from a `.json` or `.toml` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        Ok(Self::new(FsmDescription::from_file(path)?))
    }

    pub fn description(&self) -> &FsmDescription {
        &self.description
    }

    /// The described states, created on first call.
    pub fn states(&self) -> Result<&[State], BuildError> {
        if let Some(states) = self.states.get() {
            return Ok(states.as_slice());
        }

        let states = self
            .description
            .states
            .iter()
            .map(create_state)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.states.get_or_init(|| states).as_slice())
    }

    /// Whether `name` is the described initial state.
    pub fn is_initial(&self, name: &str) -> bool {
        name == self.description.initial
    }

    /// Register every described state with a new machine.
    ///
    /// Translation is one to one: duplicate state names and repeated actions
    /// follow the registration rules of `StateMachine` and `State`.
    pub fn inject<P, N: Notifier<P>>(
        &self,
        notifier: N,
    ) -> Result<StateMachine<P, N>, BuildError> {
        let mut machine = StateMachine::with_config(notifier, self.description.config.clone());
        for state in self.states()? {
            machine.register_state(state.clone(), self.is_initial(state.name()));
        }

        debug!(
            states = machine.states().count(),
            initial = %self.description.initial,
            "state machine injected"
        );
        Ok(machine)
    }

    /// Validate the description, then `inject`.
    pub fn inject_checked<P, N: Notifier<P>>(
        &self,
        notifier: N,
    ) -> Result<StateMachine<P, N>, BuildError> {
        self.description.check()?;
        self.inject(notifier)
    }
}

fn create_state(description: &StateDescription) -> Result<State, MachineError> {
    let mut state = State::new(description.name.as_str())?
        .entering(description.entering.clone().unwrap_or_default())
        .exiting(description.exiting.clone().unwrap_or_default())
        .changed(description.changed.clone().unwrap_or_default());

    for transition in &description.transitions {
        state.define_transition(transition.action.as_str(), transition.target.as_str());
    }
    Ok(state)
}
