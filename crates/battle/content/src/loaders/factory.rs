//! Content factory for building battle content from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, Combatant, RngOracle};
use tracing::{debug, info};

use crate::loaders::{
    Bestiary, BestiaryLoader, ConfigLoader, EncounterLoader, EncounterTable, LoadResult,
    PartyLoader, PartyRoster, StagedBattle,
};

const EMBEDDED_CONFIG: &str = include_str!("../../data/config.toml");
const EMBEDDED_BESTIARY: &str = include_str!("../../data/bestiary.ron");
const EMBEDDED_PARTY: &str = include_str!("../../data/party.ron");
const EMBEDDED_ENCOUNTERS: &str = include_str!("../../data/encounters.ron");

/// Content factory that loads battle content from a data directory or from
/// the built-in defaults.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── bestiary.ron
/// ├── party.ron
/// └── encounters.ron
/// ```
///
/// A file missing from the directory falls back to its built-in default, so
/// a directory may override only some of them.
pub struct ContentFactory {
    data_dir: Option<PathBuf>,
}

impl ContentFactory {
    /// Creates a content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Content factory backed only by the built-in data.
    pub fn embedded() -> Self {
        Self { data_dir: None }
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        match self.override_path("config.toml") {
            Some(path) => ConfigLoader::load(&path),
            None => ConfigLoader::parse(EMBEDDED_CONFIG),
        }
    }

    /// Load enemy templates from `bestiary.ron`.
    pub fn load_bestiary(&self) -> LoadResult<Bestiary> {
        match self.override_path("bestiary.ron") {
            Some(path) => BestiaryLoader::load(&path),
            None => BestiaryLoader::parse(EMBEDDED_BESTIARY),
        }
    }

    /// Load hero presets from `party.ron`.
    pub fn load_party(&self) -> LoadResult<PartyRoster> {
        match self.override_path("party.ron") {
            Some(path) => PartyLoader::load(&path),
            None => PartyLoader::parse(EMBEDDED_PARTY),
        }
    }

    /// Load encounters and regions from `encounters.ron`.
    pub fn load_encounters(&self) -> LoadResult<EncounterTable> {
        match self.override_path("encounters.ron") {
            Some(path) => EncounterLoader::load(&path),
            None => EncounterLoader::parse(EMBEDDED_ENCOUNTERS),
        }
    }

    /// Loads every file and cross-checks encounter references.
    pub fn load_all(&self) -> LoadResult<Content> {
        let content = Content {
            config: self.load_config()?,
            bestiary: self.load_bestiary()?,
            party: self.load_party()?,
            encounters: self.load_encounters()?,
        };
        content.encounters.validate(&content.bestiary)?;

        info!(
            enemies = content.bestiary.len(),
            source = %self.describe(),
            "content loaded"
        );
        Ok(content)
    }

    /// Returns the data directory path, if any.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    fn override_path(&self, file: &str) -> Option<PathBuf> {
        let path = self.data_dir.as_ref()?.join(file);
        if path.is_file() {
            Some(path)
        } else {
            debug!(file, "no override on disk, using built-in content");
            None
        }
    }

    fn describe(&self) -> String {
        match &self.data_dir {
            Some(dir) => dir.display().to_string(),
            None => "built-in".to_string(),
        }
    }
}

impl Default for ContentFactory {
    fn default() -> Self {
        Self::embedded()
    }
}

/// Everything a client needs to stage battles.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: BattleConfig,
    pub bestiary: Bestiary,
    pub party: PartyRoster,
    pub encounters: EncounterTable,
}

impl Content {
    /// Builds the party named by `party_ids`.
    pub fn party<S: AsRef<str>>(&self, party_ids: &[S]) -> LoadResult<Vec<Combatant>> {
        self.party.assemble(party_ids)
    }

    /// Spawns the enemy roster for an encounter or region id.
    pub fn stage(&self, encounter: &str, rng: &mut impl RngOracle) -> LoadResult<StagedBattle> {
        self.encounters.stage(encounter, &self.bestiary, rng)
    }
}
