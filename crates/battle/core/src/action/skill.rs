//! Static skill table.
//!
//! [`SkillId`] is a closed set; [`SkillCatalog::definition`] matches it
//! exhaustively so a new skill cannot be added without a cost, arity and
//! formula.

use crate::state::Role;
use crate::stats::CoreStats;

/// Identifier of a skill. Parsed and displayed in kebab-case
/// (`"power-strike"`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SkillId {
    BasicSlash,
    PowerStrike,
    MagicBolt,
    PoisonStrike,
    Heal,
    RangedShot,
    RangedMultiShot,
}

/// Which stat a formula scales from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalingStat {
    Attack,
    Magic,
}

/// `floor(stat * numerator / denominator) + uniform(roll_min, roll_max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Formula {
    pub stat: ScalingStat,
    pub numerator: u32,
    pub denominator: u32,
    pub roll_min: i32,
    pub roll_max: i32,
}

impl Formula {
    pub const fn flat(stat: ScalingStat, roll_min: i32, roll_max: i32) -> Self {
        Self::scaled(stat, 1, 1, roll_min, roll_max)
    }

    pub const fn scaled(
        stat: ScalingStat,
        numerator: u32,
        denominator: u32,
        roll_min: i32,
        roll_max: i32,
    ) -> Self {
        Self {
            stat,
            numerator,
            denominator,
            roll_min,
            roll_max,
        }
    }

    /// The deterministic part of the formula.
    pub fn scaled_stat(&self, stats: &CoreStats) -> i64 {
        let stat = match self.stat {
            ScalingStat::Attack => stats.attack,
            ScalingStat::Magic => stats.magic,
        };
        (stat as u64 * self.numerator as u64 / self.denominator.max(1) as u64) as i64
    }
}

/// Who a skill resolves against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetArity {
    SingleEnemy,
    AllEnemies,
    /// The caster only (heal).
    User,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    Damage(Formula),
    Heal(Formula),
}

/// One row of the skill table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: &'static str,
    pub mp_cost: u32,
    pub arity: TargetArity,
    pub effect: SkillEffect,
    /// Role tag required to use the skill, if any.
    pub required_role: Option<&'static str>,
}

impl SkillDefinition {
    pub fn usable_by(&self, role: &Role) -> bool {
        self.required_role.is_none_or(|required| role.is(required))
    }

    /// True when the skill can only resolve with a live enemy present.
    pub const fn needs_enemy(&self) -> bool {
        matches!(
            self.arity,
            TargetArity::SingleEnemy | TargetArity::AllEnemies
        )
    }
}

/// Static skill table and role baselines.
pub struct SkillCatalog;

impl SkillCatalog {
    pub const fn definition(id: SkillId) -> SkillDefinition {
        use ScalingStat::{Attack, Magic};

        let (name, mp_cost, arity, effect, required_role) = match id {
            SkillId::BasicSlash => (
                "Slash",
                0,
                TargetArity::SingleEnemy,
                SkillEffect::Damage(Formula::flat(Attack, -3, 5)),
                None,
            ),
            SkillId::PowerStrike => (
                "Power Strike",
                10,
                TargetArity::SingleEnemy,
                SkillEffect::Damage(Formula::scaled(Attack, 3, 2, 0, 10)),
                None,
            ),
            SkillId::MagicBolt => (
                "Magic Bolt",
                15,
                TargetArity::SingleEnemy,
                SkillEffect::Damage(Formula::flat(Magic, 5, 15)),
                None,
            ),
            SkillId::PoisonStrike => (
                "Poison Strike",
                12,
                TargetArity::SingleEnemy,
                SkillEffect::Damage(Formula::flat(Attack, 5, 12)),
                None,
            ),
            SkillId::Heal => (
                "Heal",
                20,
                TargetArity::User,
                SkillEffect::Heal(Formula::flat(Magic, 10, 20)),
                None,
            ),
            SkillId::RangedShot => (
                "Arrow Shot",
                0,
                TargetArity::SingleEnemy,
                SkillEffect::Damage(Formula::flat(Attack, 3, 8)),
                Some(Role::ARCHER),
            ),
            SkillId::RangedMultiShot => (
                "Multi Shot",
                15,
                TargetArity::AllEnemies,
                SkillEffect::Damage(Formula::scaled(Attack, 13, 10, 2, 6)),
                Some(Role::ARCHER),
            ),
        };

        SkillDefinition {
            id,
            name,
            mp_cost,
            arity,
            effect,
            required_role,
        }
    }

    pub fn all() -> impl Iterator<Item = SkillDefinition> {
        use strum::IntoEnumIterator;
        SkillId::iter().map(Self::definition)
    }

    /// Skills granted by a role without being learned.
    ///
    /// Every fighting role can slash and power strike; archers also shoot.
    pub fn role_baseline(role: &Role) -> &'static [SkillId] {
        if role.is(Role::WARRIOR) {
            &[SkillId::BasicSlash, SkillId::PowerStrike]
        } else if role.is(Role::ARCHER) {
            &[SkillId::BasicSlash, SkillId::PowerStrike, SkillId::RangedShot]
        } else {
            &[SkillId::BasicSlash]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn mp_costs_match_the_menu() {
        let costs: Vec<(SkillId, u32)> = SkillCatalog::all().map(|d| (d.id, d.mp_cost)).collect();
        assert_eq!(
            costs,
            vec![
                (SkillId::BasicSlash, 0),
                (SkillId::PowerStrike, 10),
                (SkillId::MagicBolt, 15),
                (SkillId::PoisonStrike, 12),
                (SkillId::Heal, 20),
                (SkillId::RangedShot, 0),
                (SkillId::RangedMultiShot, 15),
            ]
        );
    }

    #[test]
    fn scaled_formulas_floor() {
        let stats = CoreStats::new(11, 0, 9, 0);
        let power = Formula::scaled(ScalingStat::Attack, 3, 2, 0, 10);
        let multi = Formula::scaled(ScalingStat::Attack, 13, 10, 2, 6);
        assert_eq!(power.scaled_stat(&stats), 16);
        assert_eq!(multi.scaled_stat(&stats), 14);
        assert_eq!(Formula::flat(ScalingStat::Magic, 5, 15).scaled_stat(&stats), 9);
    }

    #[test]
    fn ranged_skills_require_archer() {
        let multi = SkillCatalog::definition(SkillId::RangedMultiShot);
        assert!(multi.usable_by(&Role::new("archer")));
        assert!(!multi.usable_by(&Role::warrior()));
        assert!(SkillCatalog::definition(SkillId::Heal).usable_by(&Role::warrior()));
    }

    #[test]
    fn archers_power_strike_without_learning_it() {
        let baseline = SkillCatalog::role_baseline(&Role::archer());
        assert_eq!(
            baseline,
            &[SkillId::BasicSlash, SkillId::PowerStrike, SkillId::RangedShot]
        );
        assert!(SkillCatalog::role_baseline(&Role::warrior()).contains(&SkillId::PowerStrike));
    }

    #[test]
    fn ids_parse_from_kebab_case() {
        assert_eq!(SkillId::from_str("ranged-multi-shot"), Ok(SkillId::RangedMultiShot));
        assert_eq!(SkillId::PowerStrike.to_string(), "power-strike");
        assert!(SkillId::from_str("fireball").is_err());
    }
}
