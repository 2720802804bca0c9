//! Content loaders for reading battle data from files.
//!
//! Each loader parses one file format into the records in [`crate::specs`]
//! (or into [`battle_core::BattleConfig`] directly). [`ContentFactory`] ties
//! them to a data directory and to the built-in defaults.

pub mod bestiary;
pub mod config;
pub mod encounters;
pub mod factory;
pub mod party;

pub use bestiary::{Bestiary, BestiaryLoader};
pub use config::ConfigLoader;
pub use encounters::{EncounterLoader, EncounterTable, StagedBattle};
pub use factory::{Content, ContentFactory};
pub use party::{PartyLoader, PartyRoster};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
