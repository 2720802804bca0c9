//! Turn controller.
//!
//! [`Battle`] borrows both rosters mutably for the duration of one encounter
//! and drives them through [`BattlePhase`] until a terminal state. Party
//! decisions come from an [`ActionProvider`]; every random draw comes from
//! the single [`RngOracle`] handle passed in.
//!
//! Nothing inside the loop is fatal: rejected or cancelled decisions are
//! reported as events and the same actor is asked again.

pub mod enemy;
mod errors;
mod events;
pub mod outcome;
mod party;
mod phase;
mod provider;

pub use enemy::{EnemyPlan, choose_enemy_skill, plan_enemy_action};
pub use errors::SetupError;
pub use events::BattleEvent;
pub use outcome::{Outcome, RewardShare};
pub use phase::BattlePhase;
pub use provider::{ActionProvider, AutoProvider};

use tracing::{debug, info};

use crate::config::BattleConfig;
use crate::env::RngOracle;
use crate::state::{Combatant, CombatantRef, StatusEffect};

/// Final summary returned by [`Battle::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleReport {
    pub outcome: Outcome,
    /// Rounds started, including the last one.
    pub rounds: u32,
    /// Per-member share on a win.
    pub rewards: Option<RewardShare>,
    pub events: Vec<BattleEvent>,
}

/// One encounter between a party and an enemy roster.
pub struct Battle<'a, R: RngOracle> {
    party: &'a mut [Combatant],
    enemies: &'a mut [Combatant],
    rng: &'a mut R,
    config: &'a BattleConfig,
    preamble: Option<String>,
    phase: BattlePhase,
    round: u32,
    started: bool,
    rewards: Option<RewardShare>,
    log: Vec<BattleEvent>,
}

impl<'a, R: RngOracle> Battle<'a, R> {
    /// Validates the rosters and prepares round 1.
    ///
    /// Every combatant needs `hp_max >= 1`; party members also need
    /// `mp_max >= 1`. Enemies spend no mp and may have an empty pool.
    pub fn new(
        party: &'a mut [Combatant],
        enemies: &'a mut [Combatant],
        rng: &'a mut R,
        config: &'a BattleConfig,
    ) -> Result<Self, SetupError> {
        if party.is_empty() {
            return Err(SetupError::EmptyParty);
        }
        if enemies.is_empty() {
            return Err(SetupError::EmptyEnemyRoster);
        }
        for member in party.iter() {
            if member.hp.maximum == 0 {
                return Err(SetupError::invalid(&member.name, "hp_max must be at least 1"));
            }
            if member.mp.maximum == 0 {
                return Err(SetupError::invalid(&member.name, "mp_max must be at least 1"));
            }
        }
        for enemy in enemies.iter() {
            if enemy.hp.maximum == 0 {
                return Err(SetupError::invalid(&enemy.name, "hp_max must be at least 1"));
            }
        }

        Ok(Self {
            party,
            enemies,
            rng,
            config,
            preamble: None,
            phase: BattlePhase::AwaitingPartyAction(0),
            round: 0,
            started: false,
            rewards: None,
            log: Vec::new(),
        })
    }

    /// Narrative text echoed in [`BattleEvent::BattleStarted`].
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        let text = preamble.into();
        self.preamble = (!text.is_empty()).then_some(text);
        self
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Rounds started so far. Diagnostic only.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn log(&self) -> &[BattleEvent] {
        &self.log
    }

    pub fn party(&self) -> &[Combatant] {
        self.party
    }

    pub fn enemies(&self) -> &[Combatant] {
        self.enemies
    }

    /// Runs until a terminal state and returns the report.
    pub fn run<P: ActionProvider>(mut self, provider: &mut P) -> BattleReport {
        let span = tracing::info_span!(
            "battle",
            party = self.party.len(),
            enemies = self.enemies.len()
        );
        let _guard = span.enter();

        loop {
            if let Some(outcome) = self.step(provider).outcome() {
                return BattleReport {
                    outcome,
                    rounds: self.round,
                    rewards: self.rewards,
                    events: self.log,
                };
            }
        }
    }

    /// Advances the battle by one phase and returns the new phase.
    ///
    /// A party phase includes every re-prompt for that actor, so one step
    /// always resolves exactly one action (or skips a defeated member).
    /// Stepping a finished battle is a no-op.
    pub fn step<P: ActionProvider>(&mut self, provider: &mut P) -> BattlePhase {
        if !self.started {
            self.start(provider);
        }

        match self.phase {
            BattlePhase::AwaitingPartyAction(index) => self.party_turn(index, provider),
            BattlePhase::AwaitingEnemyActions => self.enemy_phase(provider),
            BattlePhase::TickingEffects => self.tick_effects(provider),
            BattlePhase::CheckingOutcome => self.check_outcome(provider),
            BattlePhase::Won | BattlePhase::Lost => {}
        }

        self.phase
    }

    fn start<P: ActionProvider>(&mut self, provider: &mut P) {
        self.started = true;
        let event = BattleEvent::BattleStarted {
            preamble: self.preamble.clone(),
            party: self.party.iter().map(|c| c.name.clone()).collect(),
            enemies: self.enemies.iter().map(|c| c.name.clone()).collect(),
        };
        info!("battle started");
        self.emit(provider, event);
        self.begin_round(provider);
    }

    fn begin_round<P: ActionProvider>(&mut self, provider: &mut P) {
        self.round += 1;
        info!(round = self.round, "round started");
        self.emit(provider, BattleEvent::RoundStarted { round: self.round });
        self.phase = BattlePhase::AwaitingPartyAction(0);
    }

    /// Ticks every combatant in both rosters exactly once.
    fn tick_effects<P: ActionProvider>(&mut self, provider: &mut P) {
        let mut expired: Vec<(CombatantRef, String, Vec<StatusEffect>)> = Vec::new();

        for (index, member) in self.party.iter_mut().enumerate() {
            let effects = member.tick_status_effects();
            if !effects.is_empty() {
                expired.push((CombatantRef::party(index), member.name.clone(), effects));
            }
        }
        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            let effects = enemy.tick_status_effects();
            if !effects.is_empty() {
                expired.push((CombatantRef::enemy(index), enemy.name.clone(), effects));
            }
        }

        for (target, name, effects) in expired {
            debug!(%name, count = effects.len(), "status effects expired");
            self.emit(
                provider,
                BattleEvent::EffectsExpired {
                    target,
                    name,
                    effects,
                },
            );
        }

        self.phase = BattlePhase::CheckingOutcome;
    }

    fn check_outcome<P: ActionProvider>(&mut self, provider: &mut P) {
        match outcome::evaluate(self.party, self.enemies) {
            Some(result) => self.finish(result, provider),
            None => self.begin_round(provider),
        }
    }

    /// Enters a terminal state: rewards on a win, then status cleanup.
    fn finish<P: ActionProvider>(&mut self, result: Outcome, provider: &mut P) {
        self.phase = result.into();
        info!(outcome = %result, rounds = self.round, "battle ended");
        self.emit(
            provider,
            BattleEvent::BattleEnded {
                outcome: result,
                rounds: self.round,
            },
        );

        if result == Outcome::Won {
            let share = outcome::reward_share(self.party.len(), self.enemies);
            let level_ups = outcome::distribute(self.party, share, &self.config.growth);
            self.rewards = Some(share);
            info!(exp = share.exp, gold = share.gold, "rewards granted");
            self.emit(
                provider,
                BattleEvent::RewardsGranted {
                    share,
                    recipients: self.party.len(),
                },
            );

            for (index, level_up) in level_ups {
                let name = self.party[index].name.clone();
                info!(%name, level = level_up.new_level, "level up");
                self.emit(
                    provider,
                    BattleEvent::LeveledUp {
                        target: CombatantRef::party(index),
                        name,
                        level: level_up.new_level,
                    },
                );
            }
        }

        for combatant in self.party.iter_mut().chain(self.enemies.iter_mut()) {
            combatant.status.clear();
        }
    }

    fn emit<P: ActionProvider>(&mut self, provider: &mut P, event: BattleEvent) {
        provider.observe(&event);
        self.log.push(event);
    }
}
