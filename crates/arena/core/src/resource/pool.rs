use std::collections::BTreeMap;
use std::sync::Arc;

use super::meter::Resource;
use crate::actor::ActorId;
use crate::event::{EventContext, EventListener, ListenerHandle, Reaction};

/// Resource name → amount a skill consumes.
pub type ResourceCost = BTreeMap<String, f64>;

/// All meters of one actor, keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourcePool {
    resources: BTreeMap<String, Resource>,
}

impl ResourcePool {
    pub fn new(resources: impl IntoIterator<Item = Resource>) -> Self {
        Self {
            resources: resources
                .into_iter()
                .map(|resource| (resource.name.clone(), resource))
                .collect(),
        }
    }

    /// True iff every named resource exists and holds at least the requested amount.
    pub fn can_pay(&self, cost: &ResourceCost) -> bool {
        cost.iter().all(|(name, amount)| {
            self.resources
                .get(name)
                .is_some_and(|resource| resource.value >= *amount)
        })
    }

    /// Subtract `cost` and clamp. Performs no sufficiency check: callers gate
    /// on [`can_pay`](Self::can_pay). Unknown names are skipped.
    pub fn pay(&mut self, cost: &ResourceCost) {
        for (name, amount) in cost {
            if let Some(resource) = self.resources.get_mut(name) {
                resource.add(-amount);
            }
        }
    }

    pub fn on_turn_start(&mut self) {
        self.resources.values_mut().for_each(Resource::turn_start);
    }

    pub fn on_turn_end(&mut self) {
        self.resources.values_mut().for_each(Resource::clamp);
    }

    /// Flat gain with clamp. No-op for an unknown name.
    pub fn add(&mut self, name: &str, amount: f64) {
        if let Some(resource) = self.resources.get_mut(name) {
            resource.add(amount);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.get(name).map(|resource| resource.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }

    /// First resource named in `cost` that this pool does not have.
    pub fn first_missing<'a>(&self, cost: &'a ResourceCost) -> Option<&'a str> {
        cost.keys()
            .map(String::as_str)
            .find(|name| !self.contains(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    pub fn summary(&self) -> BTreeMap<String, f64> {
        self.resources
            .iter()
            .map(|(name, resource)| (name.clone(), resource.value))
            .collect()
    }

    /// One bus listener per configured event gain, bound to `owner`.
    pub fn gain_listeners(&self, owner: ActorId) -> Vec<(String, ListenerHandle)> {
        self.resources
            .values()
            .flat_map(|resource| {
                resource.gain_on_events.iter().map(move |(event, amount)| {
                    let listener: ListenerHandle = Arc::new(ResourceGainListener {
                        owner,
                        resource: resource.name.clone(),
                        amount: *amount,
                    });
                    (event.clone(), listener)
                })
            })
            .collect()
    }
}

/// Requests a flat resource gain whenever its event fires with the owner as source.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceGainListener {
    pub owner: ActorId,
    pub resource: String,
    pub amount: f64,
}

impl EventListener for ResourceGainListener {
    fn on_event(&self, ctx: &EventContext, reactions: &mut Vec<Reaction>) {
        if ctx.source() == Some(self.owner) {
            reactions.push(Reaction::GainResource {
                actor: self.owner,
                resource: self.resource.clone(),
                amount: self.amount,
            });
        }
    }
}
