//! Macros for terse state construction.

/// Build a `State` with lifecycle notifications and transitions.
///
/// Expands to `Result<State, MachineError>`, failing only on an empty name.
///
/// # Example
///
/// ```
/// use statebus::state;
///
/// let paused = state!("paused", entering = "freezeDisplay", changed = "pausedChanged";
///     "unsplit" => "running",
///     "stop" => "stopped",
/// )
/// .unwrap();
///
/// assert_eq!(paused.entering_event(), Some("freezeDisplay"));
/// assert_eq!(paused.resolve_target("stop"), Some("stopped"));
/// ```
#[macro_export]
macro_rules! state {
    (
        $name:expr
        $(, $phase:ident = $event:expr)*
        $(; $($action:expr => $target:expr),* $(,)?)?
    ) => {
        $crate::core::State::new($name).map(|state| {
            #[allow(unused_mut)]
            let mut state = state $(.$phase($event))*;
            $($(state.define_transition($action, $target);)*)?
            state
        })
    };
}
