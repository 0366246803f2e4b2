//! Synchronous publish/subscribe delivery.

use super::guard::Guard;
use super::notification::Notification;
use tracing::trace;

/// An action a listener asked for while a transition was in flight.
///
/// The machine runs it after the current transition has completed.
#[derive(Clone, Debug, PartialEq)]
pub struct DeferredAction<P> {
    pub action: String,
    pub payload: Option<P>,
}

/// What the listeners of one notification asked the machine to do.
///
/// Every emission gets a fresh `Reaction`. It is the only channel through
/// which a listener can veto the transition in flight.
#[derive(Debug)]
pub struct Reaction<P> {
    canceled: bool,
    actions: Vec<DeferredAction<P>>,
}

impl<P> Reaction<P> {
    pub fn new() -> Self {
        Self {
            canceled: false,
            actions: Vec::new(),
        }
    }

    /// Veto the transition in flight.
    ///
    /// Honored when reacting to an exiting or entering notification.
    /// Ignored for notifications sent after the commit.
    pub fn cancel(&mut self) {
        self.canceled = true;
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// Request an action once the current transition is over.
    pub fn send_action(&mut self, action: impl Into<String>, payload: Option<P>) {
        self.actions.push(DeferredAction {
            action: action.into(),
            payload,
        });
    }

    pub fn actions(&self) -> &[DeferredAction<P>] {
        &self.actions
    }

    pub fn into_actions(self) -> Vec<DeferredAction<P>> {
        self.actions
    }
}

impl<P> Default for Reaction<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the machine sends its notifications.
///
/// Delivery must be synchronous: every interested listener has run by the
/// time `notify` returns.
pub trait Notifier<P> {
    fn notify(&mut self, note: &Notification<'_, P>) -> Reaction<P>;
}

type Handler<P> = Box<dyn FnMut(&Notification<'_, P>, &mut Reaction<P>)>;

/// Handle returned by `EventBus::subscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription<P> {
    id: SubscriptionId,
    interests: Vec<String>,
    handler: Handler<P>,
}

/// In-process notification bus.
///
/// Listeners subscribe to a fixed list of notification names and are called
/// in registration order.
///
/// # Example
///
/// ```rust
/// use statebus::bus::{EventBus, Notification, Notifier};
///
/// let mut bus: EventBus<()> = EventBus::new();
/// bus.on("running/exiting", |note, reaction| {
///     if note.kind() == Some("stopped") {
///         reaction.cancel();
///     }
/// });
///
/// let reaction = bus.notify(&Notification::new("running/exiting").with_kind("stopped"));
/// assert!(reaction.is_canceled());
/// ```
pub struct EventBus<P> {
    subscriptions: Vec<Subscription<P>>,
    next_id: u64,
}

impl<P: 'static> EventBus<P> {
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }

    /// Subscribe `handler` to every notification named in `interests`.
    pub fn subscribe<I, S, F>(&mut self, interests: I, handler: F) -> SubscriptionId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(&Notification<'_, P>, &mut Reaction<P>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let interests: Vec<String> = interests.into_iter().map(Into::into).collect();
        trace!(?id, ?interests, "listener subscribed");

        self.subscriptions.push(Subscription {
            id,
            interests,
            handler: Box::new(handler),
        });
        id
    }

    /// Subscribe `handler` to a single notification.
    pub fn on<F>(&mut self, name: impl Into<String>, handler: F) -> SubscriptionId
    where
        F: FnMut(&Notification<'_, P>, &mut Reaction<P>) + 'static,
    {
        self.subscribe([name.into()], handler)
    }

    /// Cancel transitions whenever `guard` rejects a `name` notification.
    pub fn guard(&mut self, name: impl Into<String>, guard: Guard<P>) -> SubscriptionId {
        self.on(name, move |note, reaction| {
            if !guard.check(note) {
                trace!(name = note.name(), kind = ?note.kind(), "guard rejected transition");
                reaction.cancel();
            }
        })
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        self.subscriptions.len() != before
    }

    /// Whether any listener is interested in `name`.
    pub fn has_interest(&self, name: &str) -> bool {
        self.subscriptions
            .iter()
            .any(|subscription| subscription.interests.iter().any(|i| i == name))
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl<P: 'static> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: 'static> Notifier<P> for EventBus<P> {
    fn notify(&mut self, note: &Notification<'_, P>) -> Reaction<P> {
        let mut reaction = Reaction::new();
        for subscription in &mut self.subscriptions {
            if subscription.interests.iter().any(|i| i == note.name()) {
                (subscription.handler)(note, &mut reaction);
            }
        }
        reaction
    }
}
