//! Enemy decisions.
//!
//! Each live enemy, in roster order:
//! 1. picks a target uniformly among live party members,
//! 2. picks basic-slash or power-strike by weight,
//! 3. if power-strike was picked, fires it only when a d100 roll exceeds the
//!    configured gate, falling back to basic-slash otherwise.
//!
//! Enemies spend no mp. Draw order is target, weight, gate (if any), damage.

use tracing::debug;

use crate::action::{SkillId, targeting};
use crate::combat;
use crate::config::EnemyTactics;
use crate::env::RngOracle;
use crate::state::{Combatant, CombatantRef};

use super::{ActionProvider, Battle, BattleEvent, BattlePhase};

/// What one enemy will do this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyPlan {
    /// Party roster index.
    pub target: usize,
    pub skill: SkillId,
}

/// Plans an enemy action. `None` when no party member is alive.
pub fn plan_enemy_action(
    party: &[Combatant],
    tactics: &EnemyTactics,
    rng: &mut impl RngOracle,
) -> Option<EnemyPlan> {
    let live = targeting::live_indices(party);
    let target = live[rng.pick_index(live.len())?];
    let skill = choose_enemy_skill(tactics, rng);
    Some(EnemyPlan { target, skill })
}

/// Weighted basic/power choice with the power-strike gate applied.
pub fn choose_enemy_skill(tactics: &EnemyTactics, rng: &mut impl RngOracle) -> SkillId {
    let total = tactics.basic_weight.saturating_add(tactics.power_weight);
    if total == 0 {
        return SkillId::BasicSlash;
    }

    if rng.next_u32() % total < tactics.basic_weight {
        return SkillId::BasicSlash;
    }

    if rng.roll_d100() > tactics.power_strike_gate {
        SkillId::PowerStrike
    } else {
        SkillId::BasicSlash
    }
}

impl<'a, R: RngOracle> Battle<'a, R> {
    pub(super) fn enemy_phase<P: ActionProvider>(&mut self, provider: &mut P) {
        for index in 0..self.enemies.len() {
            if !self.enemies[index].is_alive() {
                continue;
            }
            let Some(plan) = plan_enemy_action(self.party, &self.config.enemy, self.rng) else {
                break;
            };

            let actor = CombatantRef::enemy(index);
            let target = CombatantRef::party(plan.target);
            debug!(
                enemy = %self.enemies[index].name,
                skill = %plan.skill,
                target = %self.party[plan.target].name,
                "enemy action"
            );
            self.emit(
                provider,
                BattleEvent::EnemyAttacked {
                    actor,
                    name: self.enemies[index].name.clone(),
                    skill: plan.skill,
                    target,
                    target_name: self.party[plan.target].name.clone(),
                },
            );

            if let Some(hit) = combat::resolve(
                &self.enemies[index],
                plan.skill,
                &mut self.party[plan.target],
                self.rng,
            ) {
                self.report_hit(target, hit, provider);
            }
        }

        self.phase = BattlePhase::TickingEffects;
    }
}
