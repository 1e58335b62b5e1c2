use std::fmt;

use danger_noodle_core::{Event, EventKind};

/// Handle returned by [`EventChannel::subscribe`], used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Event)>;

struct Subscription {
    id: SubscriptionId,
    kind: Option<EventKind>,
    callback: Callback,
}

/// Named-event publish/subscribe channel.
///
/// Callbacks run synchronously in subscription order.
#[derive(Default)]
pub struct EventChannel {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventChannel {
    /// Creates a channel without subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for every event of `kind`.
    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&Event) + 'static,
    {
        self.insert(Some(kind), Box::new(callback))
    }

    /// Registers `callback` for every event regardless of kind.
    pub fn subscribe_all<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Event) + 'static,
    {
        self.insert(None, Box::new(callback))
    }

    /// Removes a subscription, returning `false` when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        self.subscriptions.len() != before
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Reports whether nobody is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Delivers `event` to every matching subscriber.
    pub fn publish(&mut self, event: &Event) {
        let kind = event.kind();
        for subscription in &mut self.subscriptions {
            if subscription.kind.map_or(true, |wanted| wanted == kind) {
                (subscription.callback)(event);
            }
        }
    }

    fn insert(&mut self, kind: Option<EventKind>, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, kind, callback });
        id
    }
}

impl fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscriptions", &self.subscriptions.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
