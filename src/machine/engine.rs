//! State machine that drives transitions from action notifications.

use crate::builder::{FsmDescription, StateDescription};
use crate::bus::{DeferredAction, EventBus, Notification, Notifier, ACTION, CANCEL, CHANGED};
use crate::core::{State, StateHistory, StateTransition};
use crate::machine::config::MachineConfig;
use crate::machine::error::MachineError;
use crate::machine::outcome::TransitionOutcome;
use chrono::Utc;
use indexmap::IndexMap;
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

/// Finite state machine driven by action notifications.
///
/// The machine starts inert. `activate` enters the designated initial state,
/// after which every action is resolved against the current state's
/// transition map. All notifications go out through the machine's
/// `Notifier` and are handled synchronously.
///
/// Actions requested by listeners while a transition is in flight are
/// deferred and run, in order, once that transition has completed.
///
/// # Example
///
/// ```rust
/// use statebus::bus::EventBus;
/// use statebus::core::State;
/// use statebus::machine::StateMachine;
///
/// let mut ready = State::new("ready").unwrap();
/// ready.define_transition("start", "running");
/// let mut running = State::new("running").unwrap();
/// running.define_transition("stop", "ready");
///
/// let mut machine: StateMachine<()> = StateMachine::new(EventBus::new());
/// machine.register_state(ready, true);
/// machine.register_state(running, false);
///
/// machine.activate().unwrap();
/// assert_eq!(machine.current_state().map(State::name), Some("ready"));
///
/// machine.on_action("start", None).unwrap();
/// assert_eq!(machine.current_state().map(State::name), Some("running"));
/// ```
pub struct StateMachine<P, N = EventBus<P>> {
    states: IndexMap<String, State>,
    initial: Option<String>,
    current: Option<String>,
    deferred: VecDeque<DeferredAction<P>>,
    notifier: N,
    history: StateHistory,
    config: MachineConfig,
}

impl<P, N: Notifier<P>> StateMachine<P, N> {
    /// Create an inert machine with default configuration.
    pub fn new(notifier: N) -> Self {
        Self::with_config(notifier, MachineConfig::default())
    }

    pub fn with_config(notifier: N, config: MachineConfig) -> Self {
        Self {
            states: IndexMap::new(),
            initial: None,
            current: None,
            deferred: VecDeque::new(),
            notifier,
            history: StateHistory::new(),
            config,
        }
    }

    /// Notifications the machine reacts to in `handle`.
    pub fn interests() -> [&'static str; 2] {
        [ACTION, CANCEL]
    }

    /// Register a state, optionally designating it as the initial state.
    ///
    /// A name that is already registered is left alone and `false` is
    /// returned. Designating an initial state replaces any earlier
    /// designation.
    pub fn register_state(&mut self, state: State, initial: bool) -> bool {
        if self.states.contains_key(state.name()) {
            debug!(state = state.name(), "state already registered, ignoring");
            return false;
        }

        let name = state.name().to_string();
        if initial {
            if let Some(previous) = self.initial.replace(name.clone()) {
                debug!(previous = %previous, state = %name, "replacing initial state");
            }
        }

        trace!(state = %name, initial, "state registered");
        self.states.insert(name, state);
        true
    }

    /// Remove a registered state.
    ///
    /// The current state cannot be removed. Removing the initial state clears
    /// the initial designation.
    pub fn remove_state(&mut self, name: &str) -> Result<Option<State>, MachineError> {
        if self.current.as_deref() == Some(name) {
            return Err(MachineError::StateActive(name.to_string()));
        }

        let removed = self.states.shift_remove(name);
        if removed.is_some() && self.initial.as_deref() == Some(name) {
            debug!(state = name, "initial state removed");
            self.initial = None;
        }
        Ok(removed)
    }

    /// Enter the initial state.
    ///
    /// Without an initial state the machine stays inert and nothing is sent.
    /// On an already active machine this transitions back to the initial
    /// state like any other transition.
    pub fn activate(&mut self) -> Result<TransitionOutcome, MachineError> {
        let Some(initial) = self.initial.clone() else {
            debug!("no initial state, machine stays inert");
            return Ok(TransitionOutcome::Ignored);
        };

        let outcome = self.transition_to(&initial, None, None);
        self.finish(outcome)
    }

    /// Trigger `action` against the current state.
    ///
    /// Unknown actions and actions sent before activation are ignored. An
    /// action whose target is not registered is a configuration error.
    ///
    /// If the action itself went through but a follow-up requested by a
    /// listener failed, the error is `MachineError::Deferred` and carries the
    /// outcome of this action.
    pub fn on_action(
        &mut self,
        action: &str,
        payload: Option<P>,
    ) -> Result<TransitionOutcome, MachineError> {
        match self.dispatch(action, payload) {
            Ok(outcome) => self.finish(outcome),
            Err(err) => {
                self.deferred.clear();
                Err(err)
            }
        }
    }

    /// Accept a cancel request that arrives outside a transition.
    ///
    /// A veto only counts while an exiting or entering notification is being
    /// handled, and listeners express it through `Reaction::cancel`. No
    /// transition is in flight whenever the host can call this, so the request
    /// is logged and has no effect.
    pub fn on_cancel(&mut self) {
        trace!("cancel outside of a transition ignored");
    }

    pub fn current_state(&self) -> Option<&State> {
        self.current.as_deref().and_then(|name| self.states.get(name))
    }

    pub fn initial_state(&self) -> Option<&State> {
        self.initial.as_deref().and_then(|name| self.states.get(name))
    }

    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.get(name)
    }

    /// Mutable access to a registered state, for editing its transitions.
    pub fn state_mut(&mut self, name: &str) -> Option<&mut State> {
        self.states.get_mut(name)
    }

    /// Registered states in registration order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Export the registered graph as a description.
    pub fn describe(&self) -> FsmDescription {
        FsmDescription {
            initial: self.initial.clone().unwrap_or_default(),
            states: self.states.values().map(StateDescription::from).collect(),
            config: self.config.clone(),
        }
    }

    fn dispatch(
        &mut self,
        action: &str,
        payload: Option<P>,
    ) -> Result<TransitionOutcome, MachineError> {
        let Some(current) = self.current_state() else {
            trace!(action, "machine inert, ignoring action");
            return Ok(TransitionOutcome::Ignored);
        };

        let Some(target) = current.resolve_target(action) else {
            trace!(action, state = current.name(), "no transition for action");
            return Ok(TransitionOutcome::Ignored);
        };

        if !self.states.contains_key(target) {
            return Err(MachineError::UnresolvedTarget {
                state: current.name().to_string(),
                action: action.to_string(),
                target: target.to_string(),
            });
        }

        let target = target.to_string();
        Ok(self.transition_to(&target, Some(action), payload))
    }

    /// Run deferred actions, attaching `outcome` to any failure among them.
    fn finish(&mut self, outcome: TransitionOutcome) -> Result<TransitionOutcome, MachineError> {
        match self.drain_deferred() {
            Ok(()) => Ok(outcome),
            Err(source) => Err(MachineError::Deferred {
                outcome,
                source: Box::new(source),
            }),
        }
    }

    fn drain_deferred(&mut self) -> Result<(), MachineError> {
        let limit = self.config.max_deferred_actions;
        let mut processed = 0;

        while let Some(DeferredAction { action, payload }) = self.deferred.pop_front() {
            if processed == limit {
                warn!(limit, "deferred action limit reached, dropping queue");
                self.deferred.clear();
                return Err(MachineError::DeferredOverflow { limit });
            }
            processed += 1;

            debug!(action = %action, "running deferred action");
            if let Err(err) = self.dispatch(&action, payload) {
                self.deferred.clear();
                return Err(err);
            }
        }
        Ok(())
    }

    fn transition_to(
        &mut self,
        next: &str,
        action: Option<&str>,
        payload: Option<P>,
    ) -> TransitionOutcome {
        // Going nowhere?
        let Some(next_state) = self.states.get(next) else {
            return TransitionOutcome::Ignored;
        };
        let from = self.current.clone();
        let to = next_state.name().to_string();
        let body = payload.as_ref();

        let mut canceled = false;

        let exiting = from
            .as_deref()
            .and_then(|name| self.states.get(name))
            .and_then(State::exiting_event);
        if let Some(exiting) = exiting {
            let note = Notification::new(exiting).with_payload(body).with_kind(&to);
            canceled = emit(&mut self.notifier, &mut self.deferred, &note);
        }
        if canceled {
            debug!(from = ?from, to = %to, "transition canceled while exiting");
            return TransitionOutcome::CanceledOnExit { from, to };
        }

        if let Some(entering) = next_state.entering_event() {
            let note = Notification::new(entering).with_payload(body);
            canceled = emit(&mut self.notifier, &mut self.deferred, &note);
        }
        if canceled {
            debug!(from = ?from, to = %to, "transition canceled while entering");
            return TransitionOutcome::CanceledOnEnter { from, to };
        }

        self.current = Some(to.clone());
        if self.config.record_history {
            let transition = StateTransition {
                from: from.clone(),
                to: to.clone(),
                action: action.map(str::to_string),
                timestamp: Utc::now(),
            };
            self.history.push(transition, self.config.history_limit);
        }
        debug!(from = ?from, to = %to, action = ?action, "state changed");

        if let Some(changed) = next_state.changed_event() {
            let note = Notification::new(changed).with_payload(body);
            if emit(&mut self.notifier, &mut self.deferred, &note) {
                trace!(to = %to, "cancel after commit ignored");
            }
        }

        let note = Notification::new(CHANGED)
            .with_state(next_state)
            .with_kind(&to);
        if emit(&mut self.notifier, &mut self.deferred, &note) {
            trace!(to = %to, "cancel after commit ignored");
        }

        TransitionOutcome::Changed { from, to }
    }
}

impl<P: Clone, N: Notifier<P>> StateMachine<P, N> {
    /// Handle a notification addressed to the machine.
    ///
    /// `ACTION` triggers the action named by the notification's kind with a
    /// clone of its payload. `CANCEL` behaves like `on_cancel`. Anything else
    /// is ignored and yields `None`.
    pub fn handle(
        &mut self,
        note: &Notification<'_, P>,
    ) -> Result<Option<TransitionOutcome>, MachineError> {
        match note.name() {
            ACTION => {
                let Some(action) = note.kind() else {
                    trace!("action notification without an action name");
                    return Ok(Some(TransitionOutcome::Ignored));
                };
                self.on_action(action, note.payload().cloned()).map(Some)
            }
            CANCEL => {
                self.on_cancel();
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

/// Send `note` and queue whatever actions the listeners asked for.
/// Returns whether a listener canceled.
fn emit<P, N: Notifier<P>>(
    notifier: &mut N,
    deferred: &mut VecDeque<DeferredAction<P>>,
    note: &Notification<'_, P>,
) -> bool {
    trace!(name = note.name(), kind = ?note.kind(), "sending notification");
    let reaction = notifier.notify(note);
    let canceled = reaction.is_canceled();
    deferred.extend(reaction.into_actions());
    canceled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{Body, Reaction};

    /// Notifier that records every notification and reacts on cue.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, Option<String>)>,
        payloads: Vec<Option<String>>,
        cancel_on: Option<String>,
        follow_up: Option<(String, String)>,
        changed_body: Option<String>,
    }

    impl Notifier<String> for Recorder {
        fn notify(&mut self, note: &Notification<'_, String>) -> Reaction<String> {
            self.seen
                .push((note.name().to_string(), note.kind().map(str::to_string)));
            self.payloads.push(note.payload().cloned());
            if let Body::State(state) = note.body() {
                self.changed_body = Some(state.name().to_string());
            }

            let mut reaction = Reaction::new();
            if self.cancel_on.as_deref() == Some(note.name()) {
                reaction.cancel();
            }
            if let Some((on, action)) = &self.follow_up {
                if on == note.name() {
                    reaction.send_action(action.clone(), None);
                }
            }
            reaction
        }
    }

    fn state(name: &str) -> State {
        State::new(name)
            .unwrap()
            .entering(format!("{name}/entering"))
            .exiting(format!("{name}/exiting"))
            .changed(format!("{name}/changed"))
    }

    fn stopwatch() -> StateMachine<String, Recorder> {
        let mut ready = state("ready");
        ready.define_transition("start", "running");

        let mut running = state("running");
        running.define_transition("split", "paused");
        running.define_transition("stop", "stopped");

        let mut paused = state("paused");
        paused.define_transition("unsplit", "running");
        paused.define_transition("stop", "stopped");

        let mut stopped = state("stopped");
        stopped.define_transition("reset", "ready");

        let mut machine = StateMachine::new(Recorder::default());
        machine.register_state(ready, true);
        machine.register_state(running, false);
        machine.register_state(paused, false);
        machine.register_state(stopped, false);
        machine
    }

    fn active_stopwatch() -> StateMachine<String, Recorder> {
        let mut machine = stopwatch();
        machine.activate().unwrap();
        machine.notifier_mut().seen.clear();
        machine.notifier_mut().payloads.clear();
        machine
    }

    fn names(machine: &StateMachine<String, Recorder>) -> Vec<&str> {
        machine
            .notifier()
            .seen
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }

    fn current(machine: &StateMachine<String, Recorder>) -> Option<&str> {
        machine.current_state().map(State::name)
    }

    #[test]
    fn activation_enters_initial_state() {
        let mut machine = stopwatch();
        assert!(!machine.is_active());

        let outcome = machine.activate().unwrap();

        assert_eq!(
            outcome,
            TransitionOutcome::Changed {
                from: None,
                to: "ready".to_string()
            }
        );
        assert_eq!(current(&machine), Some("ready"));
        assert_eq!(
            names(&machine),
            vec!["ready/entering", "ready/changed", CHANGED]
        );
    }

    #[test]
    fn activation_without_initial_is_inert() {
        let mut machine: StateMachine<String, Recorder> = StateMachine::new(Recorder::default());
        machine.register_state(state("ready"), false);

        let outcome = machine.activate().unwrap();

        assert_eq!(outcome, TransitionOutcome::Ignored);
        assert!(machine.current_state().is_none());
        assert!(machine.notifier().seen.is_empty());
    }

    #[test]
    fn transition_sends_lifecycle_in_order() {
        let mut machine = active_stopwatch();

        machine
            .on_action("start", Some("t0".to_string()))
            .unwrap();

        assert_eq!(current(&machine), Some("running"));
        assert_eq!(
            machine.notifier().seen,
            vec![
                ("ready/exiting".to_string(), Some("running".to_string())),
                ("running/entering".to_string(), None),
                ("running/changed".to_string(), None),
                (CHANGED.to_string(), Some("running".to_string())),
            ]
        );
    }

    #[test]
    fn payload_is_body_of_state_notifications() {
        let mut machine = active_stopwatch();
        machine
            .on_action("start", Some("t0".to_string()))
            .unwrap();

        let payloads = &machine.notifier().payloads;
        assert_eq!(payloads[0].as_deref(), Some("t0"));
        assert_eq!(payloads[1].as_deref(), Some("t0"));
        assert_eq!(payloads[2].as_deref(), Some("t0"));
        assert_eq!(payloads[3], None);
        assert_eq!(machine.notifier().changed_body.as_deref(), Some("running"));
    }

    #[test]
    fn unconfigured_lifecycle_notifications_are_skipped() {
        let mut ready = State::new("ready").unwrap();
        ready.define_transition("start", "running");
        let running = State::new("running").unwrap().changed("running/changed");

        let mut machine: StateMachine<String, Recorder> = StateMachine::new(Recorder::default());
        machine.register_state(ready, true);
        machine.register_state(running, false);
        machine.activate().unwrap();
        machine.on_action("start", None).unwrap();

        assert_eq!(
            names(&machine),
            vec![CHANGED, "running/changed", CHANGED]
        );
    }

    #[test]
    fn cancel_while_exiting_keeps_current_state() {
        let mut machine = active_stopwatch();
        machine.notifier_mut().cancel_on = Some("ready/exiting".to_string());

        let outcome = machine.on_action("start", None).unwrap();

        assert_eq!(
            outcome,
            TransitionOutcome::CanceledOnExit {
                from: Some("ready".to_string()),
                to: "running".to_string()
            }
        );
        assert_eq!(current(&machine), Some("ready"));
        assert_eq!(names(&machine), vec!["ready/exiting"]);
    }

    #[test]
    fn cancel_while_entering_keeps_current_state() {
        let mut machine = active_stopwatch();
        machine.notifier_mut().cancel_on = Some("running/entering".to_string());

        let outcome = machine.on_action("start", None).unwrap();

        assert!(matches!(outcome, TransitionOutcome::CanceledOnEnter { .. }));
        assert_eq!(current(&machine), Some("ready"));
        assert_eq!(names(&machine), vec!["ready/exiting", "running/entering"]);
    }

    #[test]
    fn cancel_after_commit_is_ignored() {
        let mut machine = active_stopwatch();
        machine.notifier_mut().cancel_on = Some("running/changed".to_string());

        let outcome = machine.on_action("start", None).unwrap();

        assert!(outcome.is_changed());
        assert_eq!(current(&machine), Some("running"));
        assert_eq!(names(&machine).last(), Some(&CHANGED));
    }

    #[test]
    fn cancel_does_not_leak_into_next_transition() {
        let mut machine = active_stopwatch();
        machine.notifier_mut().cancel_on = Some("ready/exiting".to_string());
        machine.on_action("start", None).unwrap();

        machine.notifier_mut().cancel_on = None;
        let outcome = machine.on_action("start", None).unwrap();

        assert!(outcome.is_changed());
        assert_eq!(current(&machine), Some("running"));
    }

    #[test]
    fn stray_cancel_has_no_effect() {
        let mut machine = active_stopwatch();

        machine.on_cancel();
        let outcome = machine.on_action("start", None).unwrap();
        assert!(outcome.is_changed());

        assert_eq!(machine.handle(&Notification::cancel()), Ok(None));
        let outcome = machine.on_action("split", None).unwrap();
        assert!(outcome.is_changed());
        assert_eq!(current(&machine), Some("paused"));
    }

    #[test]
    fn unknown_action_is_ignored() {
        let mut machine = active_stopwatch();

        let outcome = machine.on_action("foo", None).unwrap();

        assert_eq!(outcome, TransitionOutcome::Ignored);
        assert_eq!(current(&machine), Some("ready"));
        assert!(machine.notifier().seen.is_empty());
    }

    #[test]
    fn action_before_activation_is_ignored() {
        let mut machine = stopwatch();

        let outcome = machine.on_action("start", None).unwrap();

        assert_eq!(outcome, TransitionOutcome::Ignored);
        assert!(machine.notifier().seen.is_empty());
    }

    #[test]
    fn unresolved_target_is_reported() {
        let mut machine = active_stopwatch();
        machine
            .state_mut("ready")
            .unwrap()
            .define_transition("jump", "nowhere");

        let result = machine.on_action("jump", None);

        assert_eq!(
            result,
            Err(MachineError::UnresolvedTarget {
                state: "ready".to_string(),
                action: "jump".to_string(),
                target: "nowhere".to_string(),
            })
        );
        assert_eq!(current(&machine), Some("ready"));
        assert!(machine.notifier().seen.is_empty());
    }

    #[test]
    fn duplicate_registration_keeps_first_state() {
        let mut machine = stopwatch();

        assert!(!machine.register_state(State::new("ready").unwrap(), false));

        let ready = machine.state("ready").unwrap();
        assert_eq!(ready.entering_event(), Some("ready/entering"));
        assert_eq!(ready.resolve_target("start"), Some("running"));
    }

    #[test]
    fn last_initial_designation_wins() {
        let mut machine = stopwatch();
        machine.register_state(state("idle"), true);

        assert_eq!(machine.initial_state().map(State::name), Some("idle"));

        machine.activate().unwrap();
        assert_eq!(current(&machine), Some("idle"));
    }

    #[test]
    fn duplicate_registration_does_not_move_initial() {
        let mut machine = stopwatch();
        machine.register_state(state("running"), true);

        assert_eq!(machine.initial_state().map(State::name), Some("ready"));
    }

    #[test]
    fn current_state_cannot_be_removed() {
        let mut machine = active_stopwatch();

        assert_eq!(
            machine.remove_state("ready"),
            Err(MachineError::StateActive("ready".to_string()))
        );
        assert!(machine.state("ready").is_some());
    }

    #[test]
    fn removing_initial_clears_designation() {
        let mut machine = stopwatch();

        let removed = machine.remove_state("ready").unwrap();

        assert_eq!(removed.map(|s| s.name().to_string()), Some("ready".to_string()));
        assert!(machine.initial_state().is_none());
        assert_eq!(machine.activate().unwrap(), TransitionOutcome::Ignored);
    }

    #[test]
    fn removing_unknown_state_is_noop() {
        let mut machine = stopwatch();
        assert_eq!(machine.remove_state("foo"), Ok(None));
        assert_eq!(machine.states().count(), 4);
    }

    #[test]
    fn transitions_can_change_after_registration() {
        let mut machine = active_stopwatch();
        let ready = machine.state_mut("ready").unwrap();
        ready.remove_transition("start");
        ready.define_transition("start", "stopped");

        machine.on_action("start", None).unwrap();

        assert_eq!(current(&machine), Some("stopped"));
    }

    #[test]
    fn listener_actions_run_after_transition() {
        let mut machine = active_stopwatch();
        machine.notifier_mut().follow_up =
            Some(("running/entering".to_string(), "split".to_string()));

        let outcome = machine.on_action("start", None).unwrap();

        assert_eq!(outcome.target(), Some("running"));
        assert_eq!(current(&machine), Some("paused"));
        assert_eq!(
            names(&machine),
            vec![
                "ready/exiting",
                "running/entering",
                "running/changed",
                CHANGED,
                "running/exiting",
                "paused/entering",
                "paused/changed",
                CHANGED,
            ]
        );
    }

    #[test]
    fn runaway_listener_actions_are_bounded() {
        let mut ping = State::new("ping").unwrap().changed("ping/changed");
        ping.define_transition("flip", "pong");
        let mut pong = State::new("pong").unwrap().changed("ping/changed");
        pong.define_transition("flip", "ping");

        let config = MachineConfig {
            max_deferred_actions: 5,
            ..MachineConfig::default()
        };
        let mut machine: StateMachine<String, Recorder> =
            StateMachine::with_config(Recorder::default(), config);
        machine.register_state(ping, true);
        machine.register_state(pong, false);
        machine.notifier_mut().follow_up = Some(("ping/changed".to_string(), "flip".to_string()));

        let result = machine.activate();

        assert_eq!(
            result,
            Err(MachineError::Deferred {
                outcome: TransitionOutcome::Changed {
                    from: None,
                    to: "ping".to_string(),
                },
                source: Box::new(MachineError::DeferredOverflow { limit: 5 }),
            })
        );
        assert!(machine.deferred.is_empty());
        // activation plus five deferred flips
        assert_eq!(machine.history().len(), 6);
    }

    #[test]
    fn failing_follow_up_keeps_primary_outcome() {
        let mut machine = active_stopwatch();
        machine
            .state_mut("running")
            .unwrap()
            .define_transition("lap", "lapping");
        machine.notifier_mut().follow_up =
            Some(("running/entering".to_string(), "lap".to_string()));

        let result = machine.on_action("start", None);

        let (outcome, source) = match result {
            Err(MachineError::Deferred { outcome, source }) => (outcome, source),
            other => panic!("expected a deferred failure, got {other:?}"),
        };
        assert_eq!(
            outcome,
            TransitionOutcome::Changed {
                from: Some("ready".to_string()),
                to: "running".to_string(),
            }
        );
        assert!(matches!(
            *source,
            MachineError::UnresolvedTarget { ref target, .. } if target == "lapping"
        ));
        assert_eq!(current(&machine), Some("running"));
        assert!(machine.deferred.is_empty());
    }

    #[test]
    fn history_is_bounded_by_limit() {
        let mut ping = State::new("ping").unwrap();
        ping.define_transition("flip", "pong");
        let mut pong = State::new("pong").unwrap();
        pong.define_transition("flip", "ping");

        let config = MachineConfig {
            history_limit: 3,
            ..MachineConfig::default()
        };
        let mut machine: StateMachine<String, Recorder> =
            StateMachine::with_config(Recorder::default(), config);
        machine.register_state(ping, true);
        machine.register_state(pong, false);
        machine.activate().unwrap();
        for _ in 0..1000 {
            machine.on_action("flip", None).unwrap();
        }

        let history = machine.history();
        assert_eq!(history.len(), 3);
        // the activation record is long gone
        assert!(history.transitions().iter().all(|t| !t.is_activation()));
        assert_eq!(history.get_path(), vec!["pong", "ping", "pong", "ping"]);
    }

    #[test]
    fn history_records_committed_transitions_only() {
        let mut machine = active_stopwatch();
        machine.on_action("start", None).unwrap();
        machine.notifier_mut().cancel_on = Some("paused/entering".to_string());
        machine.on_action("split", None).unwrap();

        let history = machine.history();
        assert_eq!(history.get_path(), vec!["ready", "running"]);
        assert!(history.transitions()[0].is_activation());
        assert_eq!(history.transitions()[1].action.as_deref(), Some("start"));
    }

    #[test]
    fn history_can_be_disabled() {
        let config = MachineConfig {
            record_history: false,
            ..MachineConfig::default()
        };
        let mut machine: StateMachine<String, Recorder> =
            StateMachine::with_config(Recorder::default(), config);
        machine.register_state(state("ready"), true);
        machine.activate().unwrap();

        assert!(machine.history().is_empty());
    }

    #[test]
    fn handle_routes_action_notifications() {
        let mut machine = active_stopwatch();
        let payload = "t1".to_string();

        let outcome = machine
            .handle(&Notification::action("start", Some(&payload)))
            .unwrap();

        assert!(outcome.is_some_and(|o| o.is_changed()));
        assert_eq!(current(&machine), Some("running"));
        assert_eq!(machine.notifier().payloads[0].as_deref(), Some("t1"));
    }

    #[test]
    fn handle_ignores_other_notifications() {
        let mut machine = active_stopwatch();

        assert_eq!(machine.handle(&Notification::cancel()), Ok(None));
        assert_eq!(machine.handle(&Notification::new("something/else")), Ok(None));
        assert_eq!(
            machine.handle(&Notification::new(ACTION)),
            Ok(Some(TransitionOutcome::Ignored))
        );
        assert_eq!(current(&machine), Some("ready"));
    }

    #[test]
    fn interests_are_action_and_cancel() {
        assert_eq!(StateMachine::<String, Recorder>::interests(), [ACTION, CANCEL]);
    }

    #[test]
    fn describe_exports_graph() {
        let machine = stopwatch();
        let description = machine.describe();

        assert_eq!(description.initial, "ready");
        assert_eq!(description.states.len(), 4);
        assert_eq!(description.states[1].name, "running");
        assert_eq!(description.states[1].transitions.len(), 2);
    }
}
