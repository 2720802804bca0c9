//! Party turns: decision, validation, target acquisition and resolution.

use tracing::{debug, warn};

use crate::action::{
    self, ActionError, Decision, DecisionRequest, SkillCatalog, SkillEffect, SkillId,
    TargetArity, TargetPlan, TargetRequest, targeting,
};
use crate::combat::{self, Hit};
use crate::env::{ItemEffect, ItemKind, ItemTarget, RngOracle};
use crate::error::CombatError;
use crate::state::{Combatant, CombatantRef};
use crate::stats::ResourceKind;

use super::{ActionProvider, Battle, BattleEvent, BattlePhase, Outcome, outcome};

/// How a validated decision ended.
enum Resolution {
    Completed,
    /// Target selection was cancelled; `refunded_mp` went back to the actor.
    Cancelled { refunded_mp: u32 },
}

impl<'a, R: RngOracle> Battle<'a, R> {
    pub(super) fn party_turn<P: ActionProvider>(&mut self, index: usize, provider: &mut P) {
        if outcome::all_defeated(self.enemies) {
            self.finish(Outcome::Won, provider);
            return;
        }
        if index >= self.party.len() {
            self.phase = BattlePhase::AwaitingEnemyActions;
            return;
        }
        if !self.party[index].is_alive() {
            debug!(name = %self.party[index].name, "skipping defeated party member");
            self.phase = BattlePhase::AwaitingPartyAction(index + 1);
            return;
        }

        let actor = CombatantRef::party(index);
        let name = self.party[index].name.clone();
        self.emit(provider, BattleEvent::TurnStarted { actor, name });

        loop {
            let request = self.decision_request(index);
            let decision = provider.provide_decision(&request);

            match self.perform(index, decision, provider) {
                Ok(Resolution::Completed) => break,
                Ok(Resolution::Cancelled { refunded_mp }) => {
                    debug!(%decision, refunded_mp, "action cancelled");
                    self.emit(
                        provider,
                        BattleEvent::ActionCancelled {
                            actor,
                            decision,
                            refunded_mp,
                        },
                    );
                }
                Err(error) => {
                    warn!(%decision, code = error.error_code(), %error, "decision rejected");
                    self.emit(
                        provider,
                        BattleEvent::ActionRejected {
                            actor,
                            decision: Some(decision),
                            error,
                        },
                    );
                }
            }
        }

        if outcome::all_defeated(self.enemies) {
            self.finish(Outcome::Won, provider);
        } else {
            self.phase = BattlePhase::AwaitingPartyAction(index + 1);
        }
    }

    fn decision_request(&self, index: usize) -> DecisionRequest {
        DecisionRequest {
            actor: CombatantRef::party(index),
            round: self.round,
            party: self.party.iter().map(Combatant::view).collect(),
            enemies: self.enemies.iter().map(Combatant::view).collect(),
            options: action::menu_for(&self.party[index], self.enemies),
        }
    }

    fn perform<P: ActionProvider>(
        &mut self,
        index: usize,
        decision: Decision,
        provider: &mut P,
    ) -> Result<Resolution, ActionError> {
        action::validate(&self.party[index], decision, self.enemies)?;

        match decision {
            Decision::Skill(skill) => self.use_skill(index, skill, provider),
            Decision::Item(item) => self.use_item(index, item, provider),
        }
    }

    /// Spends mp up front and refunds it in full if targeting does not
    /// complete.
    fn use_skill<P: ActionProvider>(
        &mut self,
        index: usize,
        skill: SkillId,
        provider: &mut P,
    ) -> Result<Resolution, ActionError> {
        let def = SkillCatalog::definition(skill);
        let cost = def.mp_cost;

        if !self.party[index].spend_mp(cost) {
            return Err(ActionError::InsufficientResource {
                resource: ResourceKind::Mp,
                required: cost,
                available: self.party[index].mp.current,
            });
        }

        let targets = match def.arity {
            TargetArity::SingleEnemy => {
                match self.acquire_target(index, Decision::Skill(skill), provider) {
                    Ok(Some(target)) => vec![target],
                    Ok(None) => {
                        self.party[index].restore_mp(cost);
                        return Ok(Resolution::Cancelled { refunded_mp: cost });
                    }
                    Err(error) => {
                        self.party[index].restore_mp(cost);
                        return Err(error);
                    }
                }
            }
            TargetArity::AllEnemies => targeting::all_live(self.enemies),
            TargetArity::User => Vec::new(),
        };

        let actor = CombatantRef::party(index);
        self.emit(
            provider,
            BattleEvent::SkillUsed {
                actor,
                name: self.party[index].name.clone(),
                skill,
                mp_spent: cost,
            },
        );

        match def.effect {
            SkillEffect::Damage(formula) => {
                for target in targets {
                    let hit = combat::strike(
                        &self.party[index],
                        &formula,
                        &mut self.enemies[target],
                        self.rng,
                    );
                    self.report_hit(CombatantRef::enemy(target), hit, provider);
                }
            }
            SkillEffect::Heal(formula) => {
                let amount = combat::heal_amount(&self.party[index], &formula, self.rng);
                let restored = self.party[index].restore_hp(amount);
                self.emit(
                    provider,
                    BattleEvent::Healed {
                        target: actor,
                        name: self.party[index].name.clone(),
                        amount,
                        restored,
                    },
                );
            }
        }

        Ok(Resolution::Completed)
    }

    /// Consumes one unit only once the item actually resolves.
    fn use_item<P: ActionProvider>(
        &mut self,
        index: usize,
        item: ItemKind,
        provider: &mut P,
    ) -> Result<Resolution, ActionError> {
        let enemy_target = match item.target() {
            ItemTarget::SingleEnemy => {
                match self.acquire_target(index, Decision::Item(item), provider)? {
                    Some(target) => Some(target),
                    None => return Ok(Resolution::Cancelled { refunded_mp: 0 }),
                }
            }
            ItemTarget::User | ItemTarget::AllEnemies => None,
        };

        if !self.party[index].inventory.consume(item) {
            return Err(ActionError::ItemNotAvailable(item));
        }

        let actor = CombatantRef::party(index);
        self.emit(
            provider,
            BattleEvent::ItemUsed {
                actor,
                name: self.party[index].name.clone(),
                item,
                remaining: self.party[index].inventory.count(item),
            },
        );

        match item.effect() {
            ItemEffect::RestoreHp(amount) => {
                let restored = self.party[index].restore_hp(amount);
                self.emit(
                    provider,
                    BattleEvent::Healed {
                        target: actor,
                        name: self.party[index].name.clone(),
                        amount,
                        restored,
                    },
                );
            }
            ItemEffect::ApplyStatus(effect) => {
                let (target, holder) = match enemy_target {
                    Some(enemy) => (CombatantRef::enemy(enemy), &mut self.enemies[enemy]),
                    None => (actor, &mut self.party[index]),
                };
                holder.apply_status(effect);
                let name = holder.name.clone();
                self.emit(
                    provider,
                    BattleEvent::StatusApplied {
                        target,
                        name,
                        effect,
                    },
                );
            }
            ItemEffect::Blast { min, max } => {
                for target in targeting::all_live(self.enemies) {
                    let raw = self.rng.range(min, max).max(0) as u32;
                    let hit = combat::apply_raw(&mut self.enemies[target], raw);
                    self.report_hit(CombatantRef::enemy(target), hit, provider);
                }
            }
        }

        Ok(Resolution::Completed)
    }

    /// `Ok(None)` means the provider cancelled.
    fn acquire_target<P: ActionProvider>(
        &mut self,
        index: usize,
        source: Decision,
        provider: &mut P,
    ) -> Result<Option<usize>, ActionError> {
        match targeting::plan(self.enemies) {
            TargetPlan::Unavailable => Err(ActionError::NoValidTarget),
            TargetPlan::Automatic(target) => Ok(Some(target)),
            TargetPlan::Choose(candidates) => {
                let request = TargetRequest {
                    actor: CombatantRef::party(index),
                    source,
                    candidates,
                };
                let choice = provider.provide_target(&request);
                request.resolve(choice)
            }
        }
    }

    /// Emits damage and, for a killing blow, defeat.
    pub(super) fn report_hit<P: ActionProvider>(
        &mut self,
        target: CombatantRef,
        hit: Hit,
        provider: &mut P,
    ) {
        let name = self.combatant(target).name.clone();
        debug!(%name, damage = hit.applied, remaining = hit.remaining_hp, "damage dealt");
        self.emit(
            provider,
            BattleEvent::DamageDealt {
                target,
                name: name.clone(),
                amount: hit.applied,
                remaining_hp: hit.remaining_hp,
            },
        );

        if hit.defeated {
            debug!(%name, "combatant defeated");
            self.emit(provider, BattleEvent::Defeated { target, name });
        }
    }

    fn combatant(&self, target: CombatantRef) -> &Combatant {
        match target.side {
            crate::state::Side::Party => &self.party[target.index],
            crate::state::Side::Enemies => &self.enemies[target.index],
        }
    }
}
