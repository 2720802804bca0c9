//! Observable battle events.
//!
//! Events carry names alongside [`CombatantRef`]s so a presentation layer can
//! render them without borrowing the rosters, which the battle holds mutably.

use crate::action::{ActionError, Decision, SkillId};
use crate::env::ItemKind;
use crate::state::{CombatantRef, StatusEffect};

use super::outcome::{Outcome, RewardShare};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// First event of every battle. The preamble is echoed, never interpreted.
    BattleStarted {
        preamble: Option<String>,
        party: Vec<String>,
        enemies: Vec<String>,
    },

    RoundStarted {
        round: u32,
    },

    TurnStarted {
        actor: CombatantRef,
        name: String,
    },

    /// A decision failed validation; nothing changed and the actor is asked
    /// again.
    ActionRejected {
        actor: CombatantRef,
        decision: Option<Decision>,
        error: ActionError,
    },

    /// Target selection was cancelled; reserved mp was returned and no item
    /// was consumed.
    ActionCancelled {
        actor: CombatantRef,
        decision: Decision,
        refunded_mp: u32,
    },

    SkillUsed {
        actor: CombatantRef,
        name: String,
        skill: SkillId,
        mp_spent: u32,
    },

    ItemUsed {
        actor: CombatantRef,
        name: String,
        item: ItemKind,
        remaining: u32,
    },

    /// An enemy chose its action and target.
    EnemyAttacked {
        actor: CombatantRef,
        name: String,
        skill: SkillId,
        target: CombatantRef,
        target_name: String,
    },

    DamageDealt {
        target: CombatantRef,
        name: String,
        amount: u32,
        remaining_hp: u32,
    },

    Healed {
        target: CombatantRef,
        name: String,
        /// Amount rolled.
        amount: u32,
        /// Amount that fit under the maximum.
        restored: u32,
    },

    StatusApplied {
        target: CombatantRef,
        name: String,
        effect: StatusEffect,
    },

    Defeated {
        target: CombatantRef,
        name: String,
    },

    EffectsExpired {
        target: CombatantRef,
        name: String,
        effects: Vec<StatusEffect>,
    },

    BattleEnded {
        outcome: Outcome,
        rounds: u32,
    },

    /// Per-member share of the pooled enemy drops.
    RewardsGranted {
        share: RewardShare,
        recipients: usize,
    },

    LeveledUp {
        target: CombatantRef,
        name: String,
        level: u32,
    },
}
