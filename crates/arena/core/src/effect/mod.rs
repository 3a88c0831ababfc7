//! Timed, stackable stat modifiers attached to one actor.
//!
//! The [`EffectController`] owns the bookkeeping (stacks, durations, the exact
//! bonus each effect contributed) and reports what happened as
//! [`EffectEvent`]s. Broadcasting those events and running tick/expire
//! [`EffectHook`]s is the battle's job.

mod controller;
mod instance;

pub use controller::{EffectController, EffectEvent, EffectSummary};
pub use instance::{EffectHook, EffectInstance};
