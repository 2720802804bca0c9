//! Enemy template loader.

use std::collections::BTreeMap;
use std::path::Path;

use battle_core::Combatant;

use crate::loaders::{LoadResult, read_file};
use crate::specs::EnemyTemplate;

/// Enemy templates keyed by bestiary id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bestiary {
    templates: BTreeMap<String, EnemyTemplate>,
}

impl Bestiary {
    pub fn get(&self, id: &str) -> Option<&EnemyTemplate> {
        self.templates.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Fresh enemy for `id`.
    pub fn spawn(&self, id: &str) -> LoadResult<Combatant> {
        self.get(id)
            .map(EnemyTemplate::spawn)
            .ok_or_else(|| anyhow::anyhow!("unknown enemy '{}' (known: {})", id, self.ids()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnemyTemplate)> {
        self.templates.iter().map(|(id, t)| (id.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn ids(&self) -> String {
        self.templates.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Loader for the bestiary from RON files.
///
/// RON format: `{ "id": EnemyTemplate, ... }`
pub struct BestiaryLoader;

impl BestiaryLoader {
    pub fn load(path: &Path) -> LoadResult<Bestiary> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Bestiary> {
        let templates: BTreeMap<String, EnemyTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bestiary RON: {}", e))?;

        for (id, template) in &templates {
            if template.hp_max == 0 {
                anyhow::bail!("enemy '{}' has hp_max 0", id);
            }
        }

        Ok(Bestiary { templates })
    }
}
