//! Damage calculation and application.
//!
//! # Formula
//!
//! ```text
//! base     = max(1, scaled_stat + uniform(roll_min, roll_max))
//! outgoing = max(1, base * attacker.damage_out_percent / 100)
//! applied  = defender.take_damage(outgoing)
//! ```
//!
//! `take_damage` then subtracts half the defender's defense and applies its
//! incoming-damage reduction, so `applied >= 1` whenever a live target is hit.

use crate::action::{Formula, SkillCatalog, SkillEffect, SkillId};
use crate::env::RngOracle;
use crate::state::Combatant;

/// Result of one damage application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hit {
    /// Damage after the attacker's outgoing modifiers.
    pub outgoing: u32,
    /// Damage the defender actually took.
    pub applied: u32,
    pub remaining_hp: u32,
    /// True when this hit took the defender to 0 hp.
    pub defeated: bool,
}

/// Rolls `formula` for `attacker` and applies outgoing modifiers.
///
/// Consumes exactly one draw (none when the roll range is degenerate).
pub fn roll_outgoing(attacker: &Combatant, formula: &Formula, rng: &mut impl RngOracle) -> u32 {
    let roll = rng.range(formula.roll_min, formula.roll_max) as i64;
    let base = (formula.scaled_stat(&attacker.stats) + roll).max(1) as u64;
    let scaled = base * attacker.damage_out_percent() as u64 / 100;
    scaled.clamp(1, u32::MAX as u64) as u32
}

/// Rolls `formula` for `attacker` and applies the result to `defender`.
pub fn strike(
    attacker: &Combatant,
    formula: &Formula,
    defender: &mut Combatant,
    rng: &mut impl RngOracle,
) -> Hit {
    let outgoing = roll_outgoing(attacker, formula, rng);
    apply_raw(defender, outgoing)
}

/// Applies a precomputed raw amount (bombs bypass outgoing modifiers).
pub fn apply_raw(defender: &mut Combatant, raw: u32) -> Hit {
    let was_alive = defender.is_alive();
    let applied = defender.take_damage(raw);
    Hit {
        outgoing: raw,
        applied,
        remaining_hp: defender.hp.current,
        defeated: was_alive && !defender.is_alive(),
    }
}

/// Resolves a damage skill from `attacker` against `defender`.
///
/// Returns `None` for skills that deal no damage (heal).
pub fn resolve(
    attacker: &Combatant,
    skill: SkillId,
    defender: &mut Combatant,
    rng: &mut impl RngOracle,
) -> Option<Hit> {
    match SkillCatalog::definition(skill).effect {
        SkillEffect::Damage(formula) => Some(strike(attacker, &formula, defender, rng)),
        SkillEffect::Heal(_) => None,
    }
}

/// Heal amount for `caster`: the formula roll, never below zero.
///
/// Outgoing damage modifiers do not apply to heals.
pub fn heal_amount(caster: &Combatant, formula: &Formula, rng: &mut impl RngOracle) -> u32 {
    let roll = rng.range(formula.roll_min, formula.roll_max) as i64;
    (formula.scaled_stat(&caster.stats) + roll).max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, SequenceRng};
    use crate::state::{EffectChannel, Role, StatusEffect};
    use crate::stats::{Bounty, CoreStats};

    fn hero() -> Combatant {
        Combatant::new("Arga", Role::warrior(), CoreStats::new(10, 5, 8, 7), 100, 50)
    }

    fn thug() -> Combatant {
        Combatant::enemy("Scar", CoreStats::new(12, 6, 3, 0), 60, Bounty::new(80, 150))
    }

    #[test]
    fn basic_slash_is_attack_plus_roll_minus_half_defense() {
        // raw draw 5 over span 9 from -3 => +2
        let mut rng = SequenceRng::new(vec![5]);
        let mut enemy = thug();

        let hit = resolve(&hero(), SkillId::BasicSlash, &mut enemy, &mut rng);

        // (10 + 2) - 6/2 = 9
        assert_eq!(
            hit,
            Some(Hit {
                outgoing: 12,
                applied: 9,
                remaining_hp: 51,
                defeated: false
            })
        );
    }

    #[test]
    fn power_strike_floors_the_scale() {
        // 10 * 3 / 2 = 15, draw 4 => +4
        let mut rng = SequenceRng::new(vec![4]);
        let outgoing = roll_outgoing(
            &hero(),
            &Formula::scaled(crate::action::ScalingStat::Attack, 3, 2, 0, 10),
            &mut rng,
        );
        assert_eq!(outgoing, 19);
    }

    #[test]
    fn rage_scales_outgoing_damage() {
        let mut attacker = hero();
        attacker.apply_status(StatusEffect::buff(EffectChannel::OutgoingDamage, 20, 3));
        let mut rng = SequenceRng::new(vec![8]);
        let formula = SkillCatalog::definition(SkillId::BasicSlash).effect;
        let SkillEffect::Damage(formula) = formula else {
            panic!("slash deals damage");
        };
        // (10 + 5) * 120 / 100 = 18
        assert_eq!(roll_outgoing(&attacker, &formula, &mut rng), 18);
    }

    #[test]
    fn weak_attacker_still_deals_one() {
        let mut attacker = hero();
        attacker.stats.attack = 0;
        let mut defender = thug();
        defender.stats.defense = 50;

        let mut rng = PcgRng::new(11);
        for _ in 0..50 {
            defender.restore_full();
            let hit = resolve(&attacker, SkillId::BasicSlash, &mut defender, &mut rng);
            assert!(hit.is_some_and(|h| h.applied >= 1));
        }
    }

    #[test]
    fn defeated_flag_only_on_the_killing_blow() {
        let mut enemy = thug();
        enemy.hp.current = 3;

        let first = apply_raw(&mut enemy, 40);
        assert!(first.defeated);
        assert_eq!(first.remaining_hp, 0);

        let second = apply_raw(&mut enemy, 40);
        assert!(!second.defeated);
    }

    fn formula_of(skill: SkillId) -> Formula {
        match SkillCatalog::definition(skill).effect {
            SkillEffect::Damage(formula) | SkillEffect::Heal(formula) => formula,
        }
    }

    #[test]
    fn magic_bolt_scales_from_magic() {
        // span 11 from 5, draw 3 => +8; 8 + 8 = 16, minus 6 / 2
        let mut rng = SequenceRng::new(vec![3]);
        let mut enemy = thug();

        let hit = resolve(&hero(), SkillId::MagicBolt, &mut enemy, &mut rng);

        assert_eq!(hit.map(|h| (h.outgoing, h.applied)), Some((16, 13)));
        assert_eq!(enemy.hp.current, 47);
    }

    #[test]
    fn poison_strike_adds_five_to_twelve() {
        // span 8 from 5, draw 2 => +7; 10 + 7 = 17, minus 3
        let mut rng = SequenceRng::new(vec![2]);
        let mut enemy = thug();

        let hit = resolve(&hero(), SkillId::PoisonStrike, &mut enemy, &mut rng);

        assert_eq!(hit.map(|h| (h.outgoing, h.applied)), Some((17, 14)));
    }

    #[test]
    fn arrow_shot_adds_three_to_eight() {
        let archer = Combatant::new("Lyra", Role::archer(), CoreStats::new(9, 4, 7, 9), 90, 60);
        // span 6 from 3, draw 1 => +4; 9 + 4 = 13, minus 3
        let mut rng = SequenceRng::new(vec![1]);
        let mut enemy = thug();

        let hit = resolve(&archer, SkillId::RangedShot, &mut enemy, &mut rng);

        assert_eq!(hit.map(|h| (h.outgoing, h.applied)), Some((13, 10)));
    }

    #[test]
    fn heal_is_magic_plus_ten_to_twenty() {
        // span 11 from 10: draw 0 => 8 + 10, draw 10 => 8 + 20, draw 5 => 8 + 15
        let mut rng = SequenceRng::new(vec![0, 10, 5]);
        let formula = formula_of(SkillId::Heal);

        assert_eq!(heal_amount(&hero(), &formula, &mut rng), 18);
        assert_eq!(heal_amount(&hero(), &formula, &mut rng), 28);
        assert_eq!(heal_amount(&hero(), &formula, &mut rng), 23);
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn heal_ignores_outgoing_buffs() {
        let mut caster = hero();
        caster.apply_status(StatusEffect::buff(EffectChannel::OutgoingDamage, 50, 3));
        let mut rng = SequenceRng::new(vec![5]);

        assert_eq!(heal_amount(&caster, &formula_of(SkillId::Heal), &mut rng), 23);
    }

    #[test]
    fn heal_is_not_a_damage_skill() {
        let mut rng = SequenceRng::new(vec![0]);
        let mut enemy = thug();
        assert_eq!(resolve(&hero(), SkillId::Heal, &mut enemy, &mut rng), None);
        assert_eq!(enemy.hp.current, 60);
        assert_eq!(rng.consumed(), 0);
    }
}
