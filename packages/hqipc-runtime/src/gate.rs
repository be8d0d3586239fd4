//! Typed call gates.
//!
//! A gate is a cheap facade (hub handle + channel name) over one named
//! channel. `A` is the ordered parameter tuple, `R` the return slot; void
//! returns use `()` and the action-shaped variants. Both sides must name the
//! same channel with the same arity — a mismatch surfaces as
//! [`GateError::TypeMismatch`] at call time, never as silent corruption.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{GateError, GateResult};
use crate::hub::ChannelHub;

/// Identifies one broadcast subscription on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GateSubscriptionId(u64);

impl GateSubscriptionId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

type CallHandler<A, R> = Arc<dyn Fn(A) -> R + Send + Sync>;
type BroadcastHandler<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// Server side of a channel: owns the handler registration and broadcasts.
pub struct CallGateProvider<A, R> {
    hub: ChannelHub,
    channel: String,
    _marker: PhantomData<fn(A) -> R>,
}

impl<A, R> CallGateProvider<A, R>
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    pub(crate) fn new(hub: ChannelHub, channel: String) -> Self {
        Self {
            hub,
            channel,
            _marker: PhantomData,
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Binds `f` as the channel's handler. Last registration wins.
    pub fn register_func(&self, f: impl Fn(A) -> R + Send + Sync + 'static) {
        let handler: CallHandler<A, R> = Arc::new(f);
        self.hub.with_slot(&self.channel, |slot| {
            if slot.handler.is_some() {
                tracing::debug!(channel = %self.channel, "replacing existing channel handler");
            }
            slot.handler = Some(Box::new(handler));
        });
    }

    pub fn unregister(&self) {
        self.hub.with_slot(&self.channel, |slot| {
            slot.handler = None;
        });
    }

    /// Broadcasts `args` to the subscribers registered at this moment.
    /// Fire-and-forget; subscribers of a different arity are skipped.
    pub fn send_message(&self, args: A) {
        let mut snapshot: Vec<BroadcastHandler<A>> = Vec::new();
        self.hub.read_slot(&self.channel, |slot| {
            if let Some(slot) = slot {
                for (_, erased) in &slot.subscribers {
                    match erased.downcast_ref::<BroadcastHandler<A>>() {
                        Some(handler) => snapshot.push(Arc::clone(handler)),
                        None => {
                            tracing::warn!(channel = %self.channel, "skipping subscriber with mismatched arity");
                        }
                    }
                }
            }
        });
        for handler in snapshot {
            handler(&args);
        }
    }
}

impl<A> CallGateProvider<A, ()>
where
    A: Send + Sync + 'static,
{
    /// Void-shaped registration variant.
    pub fn register_action(&self, f: impl Fn(A) + Send + Sync + 'static) {
        self.register_func(f);
    }
}

impl<A, R> Clone for CallGateProvider<A, R> {
    fn clone(&self) -> Self {
        Self {
            hub: self.hub.clone(),
            channel: self.channel.clone(),
            _marker: PhantomData,
        }
    }
}

/// Client side of a channel: synchronous invocation and broadcast
/// subscription.
pub struct CallGateSubscriber<A, R> {
    hub: ChannelHub,
    channel: String,
    _marker: PhantomData<fn(A) -> R>,
}

impl<A, R> CallGateSubscriber<A, R>
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    pub(crate) fn new(hub: ChannelHub, channel: String) -> Self {
        Self {
            hub,
            channel,
            _marker: PhantomData,
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Calls the registered handler and blocks until it returns.
    pub fn invoke_func(&self, args: A) -> GateResult<R> {
        let handler = self.hub.read_slot(&self.channel, |slot| {
            let slot = slot.ok_or_else(|| GateError::NoProvider(self.channel.clone()))?;
            let erased = slot
                .handler
                .as_ref()
                .ok_or_else(|| GateError::NoProvider(self.channel.clone()))?;
            erased
                .downcast_ref::<CallHandler<A, R>>()
                .cloned()
                .ok_or_else(|| GateError::TypeMismatch(self.channel.clone()))
        })?;
        // The handler runs outside the registry guard, so it may itself use
        // the hub.
        Ok(handler(args))
    }

    pub fn subscribe(&self, handler: impl Fn(&A) + Send + Sync + 'static) -> GateSubscriptionId {
        let id = self.hub.next_subscription_id();
        let erased: BroadcastHandler<A> = Arc::new(handler);
        self.hub.with_slot(&self.channel, |slot| {
            slot.subscribers.push((id, Box::new(erased)));
        });
        id
    }

    pub fn unsubscribe(&self, id: GateSubscriptionId) -> bool {
        self.hub.with_slot(&self.channel, |slot| {
            let before = slot.subscribers.len();
            slot.subscribers.retain(|(sid, _)| *sid != id);
            slot.subscribers.len() != before
        })
    }
}

impl<A> CallGateSubscriber<A, ()>
where
    A: Send + Sync + 'static,
{
    /// Void-shaped invocation variant.
    pub fn invoke_action(&self, args: A) -> GateResult<()> {
        self.invoke_func(args)
    }
}

impl<A, R> Clone for CallGateSubscriber<A, R> {
    fn clone(&self) -> Self {
        Self {
            hub: self.hub.clone(),
            channel: self.channel.clone(),
            _marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_register_and_invoke_func() {
        let hub = ChannelHub::new();
        hub.get_ipc_provider::<(i32, i32), i32>("Math.Add")
            .register_func(|(a, b)| a + b);

        let gate = hub.get_ipc_subscriber::<(i32, i32), i32>("Math.Add");
        assert_eq!(gate.invoke_func((2, 3)), Ok(5));
    }

    #[test]
    fn test_invoke_without_provider() {
        let hub = ChannelHub::new();
        let gate = hub.get_ipc_subscriber::<(), ()>("Ghost.Channel");
        assert_eq!(
            gate.invoke_action(()),
            Err(GateError::NoProvider("Ghost.Channel".to_string()))
        );
    }

    #[test]
    fn test_invoke_after_unregister() {
        let hub = ChannelHub::new();
        let provider = hub.get_ipc_provider::<(i32,), i32>("Math.Neg");
        provider.register_func(|(v,)| -v);
        provider.unregister();

        let gate = hub.get_ipc_subscriber::<(i32,), i32>("Math.Neg");
        assert_eq!(
            gate.invoke_func((1,)),
            Err(GateError::NoProvider("Math.Neg".to_string()))
        );
    }

    #[test]
    fn test_arity_mismatch_is_an_error() {
        let hub = ChannelHub::new();
        hub.get_ipc_provider::<(i32,), i32>("Math.Id")
            .register_func(|(v,)| v);

        let wrong = hub.get_ipc_subscriber::<(String,), i32>("Math.Id");
        assert_eq!(
            wrong.invoke_func(("x".to_string(),)),
            Err(GateError::TypeMismatch("Math.Id".to_string()))
        );
    }

    #[test]
    fn test_last_registration_wins() {
        let hub = ChannelHub::new();
        let provider = hub.get_ipc_provider::<(), i32>("Gen.Value");
        provider.register_func(|()| 1);
        provider.register_func(|()| 2);

        let gate = hub.get_ipc_subscriber::<(), i32>("Gen.Value");
        assert_eq!(gate.invoke_func(()), Ok(2));
    }

    #[test]
    fn test_action_variant() {
        let hub = ChannelHub::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_inner = Arc::clone(&calls);
        hub.get_ipc_provider::<(String, String), ()>("Log.Write")
            .register_action(move |(a, b)| {
                assert_eq!(a.len() + b.len(), 5);
                calls_inner.fetch_add(1, Ordering::SeqCst);
            });

        let gate = hub.get_ipc_subscriber::<(String, String), ()>("Log.Write");
        assert_eq!(gate.invoke_action(("ab".to_string(), "cde".to_string())), Ok(()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_broadcast_reaches_current_subscribers_only() {
        let hub = ChannelHub::new();
        let provider = hub.get_ipc_provider::<(i32,), ()>("Evt.Tick");
        let gate = hub.get_ipc_subscriber::<(i32,), ()>("Evt.Tick");

        let sum = Arc::new(AtomicUsize::new(0));
        let sum_inner = Arc::clone(&sum);
        let id = gate.subscribe(move |(v,)| {
            sum_inner.fetch_add(*v as usize, Ordering::SeqCst);
        });

        provider.send_message((10,));
        assert!(gate.unsubscribe(id));
        provider.send_message((100,));

        assert_eq!(sum.load(Ordering::SeqCst), 10);
        assert_eq!(hub.subscriber_count("Evt.Tick"), 0);
    }
}
