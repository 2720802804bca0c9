//! Serializable content records.
//!
//! These mirror the data files one to one. They are templates: each call to
//! [`EnemyTemplate::spawn`] or [`HeroPreset::build`] yields an independent
//! [`Combatant`] at full hp/mp.

use battle_core::{Bounty, Combatant, CoreStats, Inventory, Role, SkillId};
use serde::{Deserialize, Serialize};

/// Enemy blueprint from the bestiary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub stats: CoreStats,
    pub hp_max: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    /// Exp and gold granted to the party when this enemy's battle is won.
    pub bounty: Bounty,
}

impl EnemyTemplate {
    pub fn spawn(&self) -> Combatant {
        Combatant::enemy(self.name.clone(), self.stats, self.hp_max, self.bounty)
            .with_level(self.level)
    }
}

/// Player character preset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPreset {
    pub name: String,
    pub role: Role,
    pub stats: CoreStats,
    pub hp_max: u32,
    pub mp_max: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    /// Learned on top of the role baseline.
    #[serde(default)]
    pub skills: Vec<SkillId>,
    #[serde(default)]
    pub inventory: Inventory,
}

impl HeroPreset {
    pub fn build(&self) -> Combatant {
        Combatant::new(
            self.name.clone(),
            self.role.clone(),
            self.stats,
            self.hp_max,
            self.mp_max,
        )
        .with_skills(self.skills.iter().copied())
        .with_inventory(self.inventory.clone())
        .with_level(self.level)
    }
}

/// Fixed story encounter: every listed enemy joins the fight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSpec {
    #[serde(default)]
    pub preamble: String,
    /// Bestiary ids, in roster order.
    pub enemies: Vec<String>,
}

/// Exploration region: one candidate is drawn per visit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSpec {
    pub name: String,
    /// Bestiary ids.
    pub candidates: Vec<String>,
}

fn default_level() -> u32 {
    1
}
