//! Local multicast event aggregate.
//!
//! Implementations hold one `EventAggregate` per native event; the generated
//! consumer holds one per channel-backed event and relays incoming broadcasts
//! into it. Tokens identify individual subscriptions for removal.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifies one subscription within an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

/// Shared callback type; `&A` is the event's parameter tuple.
pub type EventHandler<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// Token-based multicast list.
///
/// `raise` snapshots the current subscribers and calls them outside the
/// lock, so a handler may subscribe or unsubscribe without deadlocking.
pub struct EventAggregate<A> {
    subscribers: Mutex<Vec<(SubscriptionToken, EventHandler<A>)>>,
    next_token: AtomicU64,
}

impl<A> EventAggregate<A> {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_token: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self, handler: EventHandler<A>) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((token, handler));
        token
    }

    /// Convenience over [`subscribe`](Self::subscribe) for plain closures.
    pub fn subscribe_fn(&self, f: impl Fn(&A) + Send + Sync + 'static) -> SubscriptionToken {
        self.subscribe(Arc::new(f))
    }

    /// Returns false when the token was not (or no longer) subscribed.
    pub fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(t, _)| *t != token);
        subscribers.len() != before
    }

    pub fn raise(&self, args: &A) {
        let snapshot: Vec<EventHandler<A>> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();
        for handler in snapshot {
            handler(args);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.lock().is_empty()
    }
}

impl<A> Default for EventAggregate<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_subscribe_and_raise() {
        let aggregate = EventAggregate::<(i32,)>::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_a = Arc::clone(&seen);
        aggregate.subscribe_fn(move |(value,)| {
            seen_a.fetch_add(*value as usize, Ordering::SeqCst);
        });
        let seen_b = Arc::clone(&seen);
        aggregate.subscribe_fn(move |(value,)| {
            seen_b.fetch_add(*value as usize, Ordering::SeqCst);
        });

        aggregate.raise(&(5,));
        assert_eq!(seen.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_unsubscribe_removes_only_that_token() {
        let aggregate = EventAggregate::<()>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_a = Arc::clone(&count);
        let token = aggregate.subscribe_fn(move |()| {
            count_a.fetch_add(1, Ordering::SeqCst);
        });
        let count_b = Arc::clone(&count);
        aggregate.subscribe_fn(move |()| {
            count_b.fetch_add(1, Ordering::SeqCst);
        });

        assert!(aggregate.unsubscribe(token));
        assert!(!aggregate.unsubscribe(token));

        aggregate.raise(&());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(aggregate.len(), 1);
    }

    #[test]
    fn test_handler_may_unsubscribe_itself_during_raise() {
        let aggregate = Arc::new(EventAggregate::<()>::new());
        let token_slot = Arc::new(Mutex::new(None::<SubscriptionToken>));

        let aggregate_inner = Arc::clone(&aggregate);
        let token_inner = Arc::clone(&token_slot);
        let token = aggregate.subscribe_fn(move |()| {
            if let Some(token) = *token_inner.lock() {
                aggregate_inner.unsubscribe(token);
            }
        });
        *token_slot.lock() = Some(token);

        aggregate.raise(&());
        assert!(aggregate.is_empty());
    }
}
