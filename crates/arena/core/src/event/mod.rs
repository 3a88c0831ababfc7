//! Priority-ordered publish/subscribe for battle events.
//!
//! Every component communicates its side effects by broadcasting an
//! [`EventContext`] on the battle's [`EventBus`]. Event identifiers are plain
//! strings so content can define new events without touching the engine; the
//! ones the engine itself emits live in [`names`].

mod bus;
mod context;
pub mod names;

pub use bus::{Dispatch, EventBus, EventListener, ListenerHandle, Reaction};
pub use context::{EventContext, Payload, PayloadValue};
pub use names::keys;
