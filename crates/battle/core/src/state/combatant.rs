use std::collections::BTreeSet;
use std::fmt;

use crate::action::{SkillCatalog, SkillId};
use crate::config::GrowthRules;
use crate::env::Inventory;
use crate::stats::{Bounty, CoreStats, LevelUp, Progression, ResourceMeter};

use super::status::{StatusEffect, StatusEffects};

// ============================================================================
// Role
// ============================================================================

/// Free-form capability tag ("warrior", "archer", ...).
///
/// Compared case-insensitively. The role decides the baseline skill set and
/// gates role-restricted skills; nothing else branches on it.
#[derive(Clone, Debug, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Role(String);

impl Role {
    pub const WARRIOR: &'static str = "warrior";
    pub const ARCHER: &'static str = "archer";
    pub const MONSTER: &'static str = "monster";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn warrior() -> Self {
        Self::new(Self::WARRIOR)
    }

    pub fn archer() -> Self {
        Self::new(Self::ARCHER)
    }

    pub fn monster() -> Self {
        Self::new(Self::MONSTER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive match against a tag.
    pub fn is(&self, tag: &str) -> bool {
        self.0.eq_ignore_ascii_case(tag)
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.is(&other.0)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Roster addressing
// ============================================================================

/// Which roster a combatant belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Party,
    Enemies,
}

/// Stable address of a combatant: roster side plus roster index.
///
/// Roster entries are never removed mid-battle, so a reference stays valid
/// for the whole encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantRef {
    pub side: Side,
    pub index: usize,
}

impl CombatantRef {
    pub const fn party(index: usize) -> Self {
        Self {
            side: Side::Party,
            index,
        }
    }

    pub const fn enemy(index: usize) -> Self {
        Self {
            side: Side::Enemies,
            index,
        }
    }
}

// ============================================================================
// Combatant
// ============================================================================

/// Any battle participant, player-controlled or enemy-controlled.
///
/// Invariants:
/// - `hp.current == 0` marks the combatant defeated; hp never goes below 0
/// - mp never goes below 0 and is only deducted in full
/// - stats only grow through [`Combatant::gain_exp`]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    pub role: Role,
    pub stats: CoreStats,
    pub hp: ResourceMeter,
    pub mp: ResourceMeter,
    /// Explicitly learned skills. The role baseline is added on top.
    pub skills: BTreeSet<SkillId>,
    pub status: StatusEffects,
    pub inventory: Inventory,
    pub progression: Progression,
    /// Drops granted to the party when the battle is won. `None` for heroes.
    pub bounty: Option<Bounty>,
}

impl Combatant {
    /// Raw damage is reduced by `defense / DEFENSE_DIVISOR` before scaling.
    pub const DEFENSE_DIVISOR: u32 = 2;

    /// Incoming damage is never scaled below this percentage, however many
    /// incoming-damage debuffs are stacked.
    pub const MIN_REDUCTION_PERCENT: u32 = 10;

    /// Creates a combatant at full hp/mp with no learned skills beyond its
    /// role baseline.
    pub fn new(
        name: impl Into<String>,
        role: Role,
        stats: CoreStats,
        hp_max: u32,
        mp_max: u32,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            stats,
            hp: ResourceMeter::full(hp_max),
            mp: ResourceMeter::full(mp_max),
            skills: BTreeSet::new(),
            status: StatusEffects::empty(),
            inventory: Inventory::default(),
            progression: Progression::default(),
            bounty: None,
        }
    }

    /// Player character with the default starting stats (100 hp, 50 mp).
    pub fn hero(name: impl Into<String>, role: Role) -> Self {
        Self::new(name, role, CoreStats::default(), 100, 50)
    }

    /// Enemy with a reward drop. Enemies spend no mp, so their pool is empty.
    pub fn enemy(name: impl Into<String>, stats: CoreStats, hp_max: u32, bounty: Bounty) -> Self {
        let mut enemy = Self::new(name, Role::monster(), stats, hp_max, 0);
        enemy.bounty = Some(bounty);
        enemy
    }

    pub fn with_skills(mut self, skills: impl IntoIterator<Item = SkillId>) -> Self {
        self.skills.extend(skills);
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.progression.level = level.max(1);
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_depleted()
    }

    // ------------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------------

    /// Applies raw damage after defense mitigation and incoming reductions.
    ///
    /// ```text
    /// mitigated = max(1, raw - defense / 2)
    /// actual    = max(1, mitigated * reduction_percent / 100)
    /// ```
    ///
    /// Returns the damage dealt, which may exceed the hp that was left.
    /// A raw value of 0 deals nothing.
    pub fn take_damage(&mut self, raw: u32) -> u32 {
        if raw == 0 {
            return 0;
        }

        let mitigated = raw
            .saturating_sub(self.stats.defense / Self::DEFENSE_DIVISOR)
            .max(1);
        let actual =
            ((mitigated as u64 * self.damage_reduction_percent() as u64 / 100) as u32).max(1);

        self.hp.drain(actual);
        actual
    }

    /// Deducts exactly `amount` mp, or nothing.
    pub fn spend_mp(&mut self, amount: u32) -> bool {
        self.mp.spend(amount)
    }

    /// Returns the hp actually restored (clamped at the maximum).
    pub fn restore_hp(&mut self, amount: u32) -> u32 {
        self.hp.restore(amount)
    }

    /// Returns the mp actually restored (clamped at the maximum).
    pub fn restore_mp(&mut self, amount: u32) -> u32 {
        self.mp.restore(amount)
    }

    /// Refills hp and mp.
    pub fn restore_full(&mut self) {
        self.hp.refill();
        self.mp.refill();
    }

    // ------------------------------------------------------------------------
    // Status effects
    // ------------------------------------------------------------------------

    pub fn apply_status(&mut self, effect: StatusEffect) {
        self.status.push(effect);
    }

    /// Outgoing damage scale in percent: `100 + Σ outgoing buffs`, never
    /// negative.
    pub fn damage_out_percent(&self) -> u32 {
        (100 + self.status.outgoing_bonus_percent()).max(0) as u32
    }

    /// Incoming damage scale in percent: `100 - Σ incoming debuffs`, floored
    /// at [`Self::MIN_REDUCTION_PERCENT`].
    pub fn damage_reduction_percent(&self) -> u32 {
        let percent = 100 - self.status.incoming_reduction_percent();
        (percent.max(Self::MIN_REDUCTION_PERCENT as i32)) as u32
    }

    /// Advances all effects by one round. Must run once per round.
    pub fn tick_status_effects(&mut self) -> Vec<StatusEffect> {
        self.status.tick()
    }

    // ------------------------------------------------------------------------
    // Skills
    // ------------------------------------------------------------------------

    /// Skills this combatant may use: role baseline ∪ learned, minus anything
    /// restricted to another role.
    pub fn capabilities(&self) -> BTreeSet<SkillId> {
        SkillCatalog::role_baseline(&self.role)
            .iter()
            .copied()
            .chain(self.skills.iter().copied())
            .filter(|id| SkillCatalog::definition(*id).usable_by(&self.role))
            .collect()
    }

    pub fn can_use(&self, skill: SkillId) -> bool {
        self.capabilities().contains(&skill)
    }

    // ------------------------------------------------------------------------
    // Progression
    // ------------------------------------------------------------------------

    /// Adds experience; on a level up, grows stats and restores hp/mp.
    pub fn gain_exp(&mut self, amount: u32, rules: &GrowthRules) -> Option<LevelUp> {
        let level_up = self.progression.add_exp(amount, rules)?;

        self.hp.raise_maximum(rules.hp_max);
        self.mp.raise_maximum(rules.mp_max);
        self.stats.attack += rules.attack;
        self.stats.defense += rules.defense;
        self.stats.magic += rules.magic;
        self.stats.agility += rules.agility;
        self.restore_full();

        Some(level_up)
    }

    pub fn gain_gold(&mut self, amount: u32) {
        self.progression.add_gold(amount);
    }

    /// Read-only snapshot for presentation layers.
    pub fn view(&self) -> CombatantView {
        CombatantView {
            name: self.name.clone(),
            role: self.role.clone(),
            level: self.progression.level,
            hp: self.hp,
            mp: self.mp,
            attack: self.stats.attack,
            damage_out_percent: self.damage_out_percent(),
            damage_reduction_percent: self.damage_reduction_percent(),
            effects: self.status.iter().copied().collect(),
        }
    }
}

/// Snapshot of a combatant shown alongside a decision request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantView {
    pub name: String,
    pub role: Role,
    pub level: u32,
    pub hp: ResourceMeter,
    pub mp: ResourceMeter,
    pub attack: u32,
    pub damage_out_percent: u32,
    pub damage_reduction_percent: u32,
    pub effects: Vec<StatusEffect>,
}

impl CombatantView {
    pub fn is_alive(&self) -> bool {
        !self.hp.is_depleted()
    }

    /// Outgoing damage scale as a factor (`1.2` under rage).
    pub fn damage_out_multiplier(&self) -> f32 {
        self.damage_out_percent as f32 / 100.0
    }

    /// Incoming damage scale as a factor (`0.85` when weakened).
    pub fn damage_reduction_multiplier(&self) -> f32 {
        self.damage_reduction_percent as f32 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EffectChannel;

    fn dummy(defense: u32) -> Combatant {
        Combatant::new("Dummy", Role::warrior(), CoreStats::new(10, defense, 8, 7), 60, 20)
    }

    #[test]
    fn take_damage_subtracts_half_defense() {
        let mut target = dummy(6);
        assert_eq!(target.take_damage(15), 12);
        assert_eq!(target.hp.current, 48);
    }

    #[test]
    fn take_damage_always_removes_at_least_one() {
        let mut target = dummy(40);
        assert_eq!(target.take_damage(3), 1);

        for _ in 0..5 {
            target.apply_status(StatusEffect::debuff(EffectChannel::IncomingDamage, 50, 3));
        }
        assert_eq!(target.damage_reduction_percent(), 10);
        assert_eq!(target.take_damage(25), 1);
    }

    #[test]
    fn take_damage_converges_to_zero_and_stays() {
        let mut target = dummy(0);
        for _ in 0..10 {
            target.take_damage(25);
        }
        assert_eq!(target.hp.current, 0);
        assert!(!target.is_alive());
        target.take_damage(25);
        assert_eq!(target.hp.current, 0);
    }

    #[test]
    fn overkill_reports_full_damage_and_empties_hp() {
        let mut target = dummy(0);
        target.hp = ResourceMeter::new(7, 60);

        assert_eq!(target.take_damage(30), 30);
        assert_eq!(target.hp, ResourceMeter::new(0, 60));
    }

    #[test]
    fn incoming_debuff_scales_damage_down() {
        let mut target = dummy(0);
        target.apply_status(StatusEffect::debuff(EffectChannel::IncomingDamage, 15, 3));
        // 20 * 85 / 100 = 17
        assert_eq!(target.take_damage(20), 17);
    }

    #[test]
    fn outgoing_buffs_stack_additively() {
        let mut attacker = dummy(0);
        assert_eq!(attacker.damage_out_percent(), 100);
        attacker.apply_status(StatusEffect::buff(EffectChannel::OutgoingDamage, 20, 3));
        attacker.apply_status(StatusEffect::buff(EffectChannel::OutgoingDamage, 20, 1));
        assert_eq!(attacker.damage_out_percent(), 140);

        attacker.tick_status_effects();
        assert_eq!(attacker.damage_out_percent(), 120);
    }

    #[test]
    fn view_carries_damage_scales() {
        let mut member = dummy(0);
        member.apply_status(StatusEffect::buff(EffectChannel::OutgoingDamage, 20, 3));
        member.apply_status(StatusEffect::debuff(EffectChannel::IncomingDamage, 15, 3));

        let view = member.view();

        assert_eq!(view.damage_out_percent, 120);
        assert_eq!(view.damage_reduction_percent, 85);
        assert!((view.damage_out_multiplier() - 1.2).abs() < 1e-6);
        assert!((view.damage_reduction_multiplier() - 0.85).abs() < 1e-6);
    }

    #[test]
    fn spend_mp_never_partially_deducts() {
        let mut caster = dummy(0);
        assert!(caster.spend_mp(15));
        assert_eq!(caster.mp.current, 5);
        assert!(!caster.spend_mp(10));
        assert_eq!(caster.mp.current, 5);
    }

    #[test]
    fn level_up_grows_stats_and_restores() {
        let rules = GrowthRules::default();
        let mut hero = Combatant::hero("Arga", Role::warrior());
        hero.take_damage(50);
        hero.spend_mp(30);

        let level_up = hero.gain_exp(100, &rules);

        assert_eq!(level_up, Some(LevelUp { new_level: 2 }));
        assert_eq!(hero.hp, ResourceMeter::full(115));
        assert_eq!(hero.mp, ResourceMeter::full(60));
        assert_eq!(hero.stats, CoreStats::new(13, 7, 10, 8));
        assert_eq!(hero.progression.exp_to_next, 120);
    }

    #[test]
    fn archer_skills_are_gated_by_role() {
        let warrior = Combatant::hero("Arga", Role::warrior())
            .with_skills([SkillId::RangedMultiShot, SkillId::Heal]);
        let caps = warrior.capabilities();
        assert!(caps.contains(&SkillId::BasicSlash));
        assert!(caps.contains(&SkillId::PowerStrike));
        assert!(caps.contains(&SkillId::Heal));
        assert!(!caps.contains(&SkillId::RangedMultiShot));

        let archer =
            Combatant::hero("Lyra", Role::new("Archer")).with_skills([SkillId::RangedMultiShot]);
        assert!(archer.can_use(SkillId::RangedShot));
        assert!(archer.can_use(SkillId::RangedMultiShot));
    }

    #[test]
    fn roles_compare_case_insensitively() {
        assert_eq!(Role::new("ARCHER"), Role::archer());
        assert_ne!(Role::warrior(), Role::archer());
    }
}
