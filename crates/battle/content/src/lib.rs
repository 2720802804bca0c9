//! Data-driven battle content and loaders.
//!
//! This crate holds the static content a battle is staged from and the
//! loaders that read it from RON/TOML files:
//! - Enemy templates (`bestiary.ron`)
//! - Hero presets (`party.ron`)
//! - Story encounters and exploration regions (`encounters.ron`)
//! - Battle tunables (`config.toml`)
//!
//! Every file has a built-in default compiled into the crate, so a client
//! runs without a data directory. Templates are turned into fresh
//! [`battle_core::Combatant`]s on demand and never appear in battle state.

pub mod specs;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use specs::{EncounterSpec, EnemyTemplate, HeroPreset, RegionSpec};

#[cfg(feature = "loaders")]
pub use loaders::{
    Bestiary, BestiaryLoader, ConfigLoader, Content, ContentFactory, EncounterLoader,
    EncounterTable, LoadResult, PartyLoader, PartyRoster, StagedBattle,
};
