//! Channel registry.
//!
//! One slot per channel name; a slot holds at most one type-erased call
//! handler plus the current broadcast subscribers. The typed facades in
//! [`crate::gate`] do all erasure and recovery; the hub itself never touches
//! argument types. User callbacks are always invoked outside the map guard.

use dashmap::DashMap;
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::gate::{CallGateProvider, CallGateSubscriber, GateSubscriptionId};

/// Holds an `Arc<dyn Fn...>` of the channel's concrete arity.
pub(crate) type ErasedCallable = Box<dyn Any + Send + Sync>;

#[derive(Default)]
pub(crate) struct ChannelSlot {
    pub(crate) handler: Option<ErasedCallable>,
    pub(crate) subscribers: Vec<(GateSubscriptionId, ErasedCallable)>,
}

/// Clonable handle to the channel registry. All clones share one registry.
#[derive(Clone, Default)]
pub struct ChannelHub {
    inner: Arc<HubInner>,
}

#[derive(Default)]
struct HubInner {
    channels: DashMap<String, ChannelSlot>,
    next_subscription: AtomicU64,
}

impl ChannelHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Server-side gate for `channel`. Creating the gate does not bind
    /// anything; registration happens through the gate.
    pub fn get_ipc_provider<A, R>(&self, channel: impl Into<String>) -> CallGateProvider<A, R>
    where
        A: Send + Sync + 'static,
        R: Send + Sync + 'static,
    {
        CallGateProvider::new(self.clone(), channel.into())
    }

    /// Client-side gate for `channel`.
    pub fn get_ipc_subscriber<A, R>(&self, channel: impl Into<String>) -> CallGateSubscriber<A, R>
    where
        A: Send + Sync + 'static,
        R: Send + Sync + 'static,
    {
        CallGateSubscriber::new(self.clone(), channel.into())
    }

    pub fn has_provider(&self, channel: &str) -> bool {
        self.inner
            .channels
            .get(channel)
            .map_or(false, |slot| slot.handler.is_some())
    }

    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.inner
            .channels
            .get(channel)
            .map_or(0, |slot| slot.subscribers.len())
    }

    pub fn channel_count(&self) -> usize {
        self.inner.channels.len()
    }

    pub(crate) fn with_slot<T>(&self, channel: &str, f: impl FnOnce(&mut ChannelSlot) -> T) -> T {
        let mut slot = self.inner.channels.entry(channel.to_string()).or_default();
        f(slot.value_mut())
    }

    pub(crate) fn read_slot<T>(&self, channel: &str, f: impl FnOnce(Option<&ChannelSlot>) -> T) -> T {
        match self.inner.channels.get(channel) {
            Some(slot) => f(Some(slot.value())),
            None => f(None),
        }
    }

    pub(crate) fn next_subscription_id(&self) -> GateSubscriptionId {
        GateSubscriptionId::new(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed))
    }
}
