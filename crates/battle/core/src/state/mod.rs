//! Battle participants and the modifiers they carry.
//!
//! A [`Combatant`] is handed to the battle fully constructed by the caller and
//! handed back in its final state; the battle only mutates it in place.
mod combatant;
pub mod status;

pub use combatant::{Combatant, CombatantRef, CombatantView, Role, Side};
pub use status::{EffectChannel, StatusEffect, StatusEffects, StatusKind};
