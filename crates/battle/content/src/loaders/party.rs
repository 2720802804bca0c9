//! Hero preset loader.

use std::collections::BTreeMap;
use std::path::Path;

use battle_core::Combatant;

use crate::loaders::{LoadResult, read_file};
use crate::specs::HeroPreset;

/// Hero presets keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartyRoster {
    presets: BTreeMap<String, HeroPreset>,
}

impl PartyRoster {
    pub fn get(&self, id: &str) -> Option<&HeroPreset> {
        self.presets.get(id)
    }

    /// Builds a party in the order given. Duplicate ids are rejected since
    /// each preset is a named character.
    pub fn assemble<S: AsRef<str>>(&self, ids: &[S]) -> LoadResult<Vec<Combatant>> {
        if ids.is_empty() {
            anyhow::bail!("a party needs at least one member");
        }

        let mut party = Vec::with_capacity(ids.len());
        for (position, id) in ids.iter().enumerate() {
            let id = id.as_ref();
            if ids[..position].iter().any(|earlier| earlier.as_ref() == id) {
                anyhow::bail!("party member '{}' listed twice", id);
            }
            let preset = self.get(id).ok_or_else(|| {
                anyhow::anyhow!("unknown party preset '{}' (known: {})", id, self.ids())
            })?;
            party.push(preset.build());
        }
        Ok(party)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeroPreset)> {
        self.presets.iter().map(|(id, p)| (id.as_str(), p))
    }

    fn ids(&self) -> String {
        self.presets.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Loader for hero presets from RON files.
///
/// RON format: `{ "id": HeroPreset, ... }`
pub struct PartyLoader;

impl PartyLoader {
    pub fn load(path: &Path) -> LoadResult<PartyRoster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PartyRoster> {
        let presets: BTreeMap<String, HeroPreset> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse party RON: {}", e))?;

        for (id, preset) in &presets {
            if preset.hp_max == 0 || preset.mp_max == 0 {
                anyhow::bail!("party preset '{}' needs hp_max and mp_max of at least 1", id);
            }
        }

        Ok(PartyRoster { presets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{ItemKind, Role, SkillId};

    const PRESETS: &str = r#"{
        "hero": (
            name: "Raka",
            role: "warrior",
            stats: (attack: 10, defense: 5, magic: 8, agility: 7),
            hp_max: 100,
            mp_max: 50,
            skills: [Heal],
            inventory: { HealthPotion: 2 },
        ),
        "archer": (
            name: "Santoso",
            role: "archer",
            stats: (attack: 9, defense: 4, magic: 7, agility: 9),
            hp_max: 90,
            mp_max: 60,
        ),
    }"#;

    #[test]
    fn assembles_in_requested_order() {
        let roster = PartyLoader::parse(PRESETS).unwrap();
        let party = roster.assemble(&["archer", "hero"]).unwrap();

        assert_eq!(party[0].name, "Santoso");
        assert!(party[0].role.is(Role::ARCHER));
        assert_eq!(party[1].inventory.count(ItemKind::HealthPotion), 2);
        assert!(party[1].can_use(SkillId::Heal));
    }

    #[test]
    fn rejects_unknown_duplicate_and_empty() {
        let roster = PartyLoader::parse(PRESETS).unwrap();

        assert!(roster.assemble(&["bard"]).is_err());
        assert!(roster.assemble(&["hero", "hero"]).is_err());
        assert!(roster.assemble::<&str>(&[]).is_err());
    }
}
