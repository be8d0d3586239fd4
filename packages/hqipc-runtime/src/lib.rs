//! In-process named-channel substrate for HQIPC stubs.
//!
//! Generated providers and consumers talk to each other through named, typed
//! channels: one channel carries exactly one method's calls or one event's
//! broadcasts. The hub owns the registry; the call gates are thin typed
//! facades over it.
//!
//! - `ChannelHub`: clonable registry handle, one slot per channel name
//! - `CallGateProvider<A, R>`: server side — register a handler, broadcast
//! - `CallGateSubscriber<A, R>`: client side — invoke, subscribe
//! - `EventAggregate<A>`: local multicast list used for native events
//!
//! Calls are synchronous: the invoking side blocks until the registered
//! handler returns. Broadcasts are fire-and-forget to the subscribers
//! registered at publish time, with no ordering guarantee. No serialization
//! and no cross-process framing happen here; channels are plain in-process
//! bindings.

pub mod error;
pub mod event;
pub mod gate;
pub mod hub;

pub use error::{GateError, GateResult};
pub use event::{EventAggregate, EventHandler, SubscriptionToken};
pub use gate::{CallGateProvider, CallGateSubscriber, GateSubscriptionId};
pub use hub::ChannelHub;
