use tracing::trace;

use super::Battle;
use crate::actor::ActorId;
use crate::event::{EventContext, Payload, Reaction};

impl Battle {
    /// Broadcast on the battle bus and apply every listener reaction before
    /// returning the dispatched context.
    pub fn broadcast(
        &mut self,
        event_name: &str,
        source: Option<ActorId>,
        targets: Vec<ActorId>,
        payload: Payload,
    ) -> EventContext {
        self.emit(
            EventContext::new(event_name)
                .with_source(source)
                .with_targets(targets)
                .with_payload(payload),
        )
    }

    pub(super) fn emit(&mut self, context: EventContext) -> EventContext {
        let dispatch = self.bus.dispatch(context);
        for reaction in dispatch.reactions {
            self.apply_reaction(reaction);
        }
        dispatch.context
    }

    fn apply_reaction(&mut self, reaction: Reaction) {
        match reaction {
            Reaction::GainResource {
                actor,
                resource,
                amount,
            } => {
                if let Some(owner) = self.roster.actor_mut(actor) {
                    owner.resources_mut().add(&resource, amount);
                    trace!(
                        target: "arena::battle",
                        actor = %actor,
                        resource = %resource,
                        amount,
                        "resource gained"
                    );
                }
            }
            Reaction::Narrate(line) => self.log.push(line),
        }
    }
}
