//! Named per-actor meters (mana, fury, ...) and their economy.
//!
//! A [`ResourcePool`] gates skills through [`ResourcePool::can_pay`], regenerates
//! and decays at turn start, and converts configured events into flat gains via
//! [`ResourceGainListener`]s registered on the battle bus.

mod meter;
mod pool;

pub use meter::Resource;
pub use pool::{ResourceCost, ResourceGainListener, ResourcePool};
