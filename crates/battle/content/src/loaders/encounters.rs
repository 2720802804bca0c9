//! Story encounter and exploration region loader.

use std::collections::BTreeMap;
use std::path::Path;

use battle_core::{Combatant, RngOracle};
use serde::Deserialize;
use tracing::debug;

use crate::loaders::{Bestiary, LoadResult, read_file};
use crate::specs::{EncounterSpec, RegionSpec};

/// Named encounters and regions.
///
/// Encounter and region ids share one namespace so a single id selects
/// either.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EncounterTable {
    #[serde(default)]
    pub encounters: BTreeMap<String, EncounterSpec>,
    #[serde(default)]
    pub regions: BTreeMap<String, RegionSpec>,
}

/// An enemy roster ready to hand to a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedBattle {
    pub id: String,
    pub preamble: String,
    pub enemies: Vec<Combatant>,
}

impl EncounterTable {
    /// Resolves `id` into fresh enemies.
    ///
    /// A story encounter spawns its fixed roster and draws nothing. A region
    /// draws one candidate from `rng`.
    pub fn stage(
        &self,
        id: &str,
        bestiary: &Bestiary,
        rng: &mut impl RngOracle,
    ) -> LoadResult<StagedBattle> {
        if let Some(spec) = self.encounters.get(id) {
            let enemies = spec
                .enemies
                .iter()
                .map(|enemy| bestiary.spawn(enemy))
                .collect::<LoadResult<Vec<_>>>()?;
            return Ok(StagedBattle {
                id: id.to_string(),
                preamble: spec.preamble.clone(),
                enemies,
            });
        }

        if let Some(region) = self.regions.get(id) {
            let pick = rng
                .pick_index(region.candidates.len())
                .ok_or_else(|| anyhow::anyhow!("region '{}' has no candidates", id))?;
            let enemy = bestiary.spawn(&region.candidates[pick])?;
            debug!(region = %region.name, enemy = %enemy.name, "region encounter drawn");
            return Ok(StagedBattle {
                id: id.to_string(),
                preamble: format!("You enter {}. {} appears!", region.name, enemy.name),
                enemies: vec![enemy],
            });
        }

        anyhow::bail!("unknown encounter or region '{}' (known: {})", id, self.ids())
    }

    /// Checks every referenced enemy id against `bestiary`.
    pub fn validate(&self, bestiary: &Bestiary) -> LoadResult<()> {
        for (id, spec) in &self.encounters {
            if spec.enemies.is_empty() {
                anyhow::bail!("encounter '{}' lists no enemies", id);
            }
            if self.regions.contains_key(id) {
                anyhow::bail!("'{}' is both an encounter and a region", id);
            }
            for enemy in &spec.enemies {
                if !bestiary.contains(enemy) {
                    anyhow::bail!("encounter '{}' references unknown enemy '{}'", id, enemy);
                }
            }
        }
        for (id, region) in &self.regions {
            if region.candidates.is_empty() {
                anyhow::bail!("region '{}' has no candidates", id);
            }
            for enemy in &region.candidates {
                if !bestiary.contains(enemy) {
                    anyhow::bail!("region '{}' references unknown enemy '{}'", id, enemy);
                }
            }
        }
        Ok(())
    }

    pub fn ids(&self) -> String {
        self.encounters
            .keys()
            .chain(self.regions.keys())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Loader for encounters from RON files.
///
/// RON format: `(encounters: { "id": EncounterSpec }, regions: { "id": RegionSpec })`
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EncounterTable> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse encounters RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::BestiaryLoader;
    use battle_core::SequenceRng;

    fn bestiary() -> Bestiary {
        BestiaryLoader::parse(
            r#"{
                "slime": (
                    name: "Green Slime",
                    stats: (attack: 5, defense: 2, magic: 2, agility: 1),
                    hp_max: 25,
                    bounty: (exp: 25, gold: 30),
                ),
                "goblin": (
                    name: "Small Goblin",
                    stats: (attack: 8, defense: 3, magic: 1, agility: 4),
                    hp_max: 40,
                    level: 2,
                    bounty: (exp: 50, gold: 60),
                ),
            }"#,
        )
        .unwrap()
    }

    fn table() -> EncounterTable {
        EncounterLoader::parse(
            r#"(
                encounters: {
                    "pair": (preamble: "Two shapes move.", enemies: ["slime", "goblin"]),
                },
                regions: {
                    "forest": (name: "the Dark Forest", candidates: ["slime", "goblin"]),
                },
            )"#,
        )
        .unwrap()
    }

    #[test]
    fn fixed_encounter_draws_nothing() {
        let mut rng = SequenceRng::new(vec![7]);
        let staged = table().stage("pair", &bestiary(), &mut rng).unwrap();

        assert_eq!(staged.enemies.len(), 2);
        assert_eq!(staged.enemies[1].name, "Small Goblin");
        assert_eq!(staged.preamble, "Two shapes move.");
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn region_draws_one_candidate() {
        // 3 % 2 = 1 -> goblin
        let mut rng = SequenceRng::new(vec![3]);
        let staged = table().stage("forest", &bestiary(), &mut rng).unwrap();

        assert_eq!(staged.enemies.len(), 1);
        assert_eq!(staged.enemies[0].name, "Small Goblin");
        assert!(staged.preamble.contains("the Dark Forest"));
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn validate_catches_dangling_references() {
        let mut table = table();
        table.regions.insert(
            "cave".into(),
            RegionSpec {
                name: "the Orc Cave".into(),
                candidates: vec!["orc".into()],
            },
        );

        let err = table.validate(&bestiary()).unwrap_err().to_string();
        assert!(err.contains("orc"));
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut rng = SequenceRng::new(vec![0]);
        let err = table().stage("castle", &bestiary(), &mut rng).unwrap_err();
        assert!(err.to_string().contains("pair, forest"));
    }
}
