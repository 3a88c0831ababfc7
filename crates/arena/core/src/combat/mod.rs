//! Damage formulas.
//!
//! Everything here is a pure function of its inputs. The battle supplies the
//! battlefield modifier and the critical roll so the same inputs always give
//! the same result.

mod damage;

pub use damage::{DamageRoll, compute_damage, mitigation, tag_modifier};
