//! Listener registry and synchronous dispatch.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::context::{EventContext, Payload};
use crate::actor::ActorId;

/// A deferred state change requested by a listener.
///
/// Listeners only get a shared view of the event. Anything they want to change
/// in the battle is expressed as a reaction, which the battle applies in
/// listener order before the broadcast returns.
#[derive(Clone, Debug, PartialEq)]
pub enum Reaction {
    /// Add `amount` to a named resource of `actor` (clamped by the meter).
    GainResource {
        actor: ActorId,
        resource: String,
        amount: f64,
    },
    /// Append a line to the battle narration.
    Narrate(String),
}

/// Something that wants to hear about a named event.
///
/// Any `Fn(&EventContext, &mut Vec<Reaction>)` closure is a listener.
pub trait EventListener: Send + Sync {
    fn on_event(&self, ctx: &EventContext, reactions: &mut Vec<Reaction>);
}

impl<F> EventListener for F
where
    F: Fn(&EventContext, &mut Vec<Reaction>) + Send + Sync,
{
    fn on_event(&self, ctx: &EventContext, reactions: &mut Vec<Reaction>) {
        self(ctx, reactions)
    }
}

/// Shared handle to a registered listener. Identity (for
/// [`EventBus::unregister`]) is pointer identity of the handle.
pub type ListenerHandle = Arc<dyn EventListener>;

struct Registration {
    priority: i32,
    listener: ListenerHandle,
}

/// Result of a broadcast: the dispatched context and everything listeners asked for.
#[derive(Debug)]
pub struct Dispatch {
    pub context: EventContext,
    pub reactions: Vec<Reaction>,
}

/// Per-battle event registry.
///
/// Listeners with higher priority run first; equal priorities keep
/// registration order. Dispatch iterates a snapshot of the listener list taken
/// when the broadcast starts.
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<String, Vec<Registration>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for every future broadcast of `event_name`.
    pub fn register(
        &mut self,
        event_name: impl Into<String>,
        listener: ListenerHandle,
        priority: i32,
    ) {
        let registrations = self.listeners.entry(event_name.into()).or_default();
        let index = registrations
            .iter()
            .position(|existing| existing.priority < priority)
            .unwrap_or(registrations.len());
        registrations.insert(index, Registration { priority, listener });
    }

    /// Remove `listener` from `event_name`. Returns false if it was not registered.
    pub fn unregister(&mut self, event_name: &str, listener: &ListenerHandle) -> bool {
        let Some(registrations) = self.listeners.get_mut(event_name) else {
            return false;
        };
        let before = registrations.len();
        registrations.retain(|existing| !Arc::ptr_eq(&existing.listener, listener));
        before != registrations.len()
    }

    /// Build a context and dispatch it to every listener of `event_name`.
    pub fn broadcast(
        &self,
        event_name: &str,
        source: Option<ActorId>,
        targets: Vec<ActorId>,
        payload: Payload,
    ) -> Dispatch {
        self.dispatch(
            EventContext::new(event_name)
                .with_source(source)
                .with_targets(targets)
                .with_payload(payload),
        )
    }

    /// Dispatch an already-built context.
    pub fn dispatch(&self, context: EventContext) -> Dispatch {
        let snapshot: Vec<ListenerHandle> = self
            .listeners
            .get(context.name())
            .map(|registrations| {
                registrations
                    .iter()
                    .map(|registration| Arc::clone(&registration.listener))
                    .collect()
            })
            .unwrap_or_default();

        let mut reactions = Vec::new();
        for listener in &snapshot {
            listener.on_event(&context, &mut reactions);
        }

        trace!(
            target: "arena::bus",
            event = context.name(),
            listeners = snapshot.len(),
            reactions = reactions.len(),
            "dispatched"
        );

        Dispatch { context, reactions }
    }

    /// Drop every listener. Used at battle teardown so no actor ids leak into
    /// the next fight.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.listeners.get(event_name).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(Vec::is_empty)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(&str, usize)> = self
            .listeners
            .iter()
            .map(|(name, registrations)| (name.as_str(), registrations.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}
