//! Combatant statistics.
//!
//! Stats are split by how they change:
//!
//! 1. **Core** ([`CoreStats`]): attack, defense, magic, agility. Only grow
//!    through a level up.
//! 2. **Resources** ([`ResourceMeter`]): hp and mp pools, mutated every turn.
//! 3. **Progression** ([`Progression`], [`Bounty`]): level, experience, gold,
//!    and what an enemy drops when the battle is won.

pub mod core;
pub mod progression;
pub mod resources;

pub use self::core::CoreStats;
pub use progression::{Bounty, LevelUp, Progression};
pub use resources::{ResourceKind, ResourceMeter};
