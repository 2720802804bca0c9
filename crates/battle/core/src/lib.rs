//! Deterministic turn-based combat engine.
//!
//! `battle-core` resolves party and enemy actions, skill damage formulas,
//! target selection, timed status effects, mana accounting, and victory or
//! defeat with reward distribution. It owns no I/O: combatants are handed in
//! fully constructed, decisions come from an [`ActionProvider`], and every
//! random draw comes from a caller-supplied [`RngOracle`]. A fixed seed
//! therefore reproduces a whole battle.
//!
//! ```no_run
//! use battle_core::{AutoProvider, Battle, BattleConfig, Combatant, PcgRng, Role};
//! use battle_core::{Bounty, CoreStats};
//!
//! let mut party = vec![Combatant::hero("Arga", Role::warrior())];
//! let mut enemies = vec![Combatant::enemy(
//!     "Scar",
//!     CoreStats::new(12, 6, 3, 0),
//!     60,
//!     Bounty::new(80, 150),
//! )];
//! let mut rng = PcgRng::new(7);
//! let config = BattleConfig::default();
//!
//! let report = Battle::new(&mut party, &mut enemies, &mut rng, &config)
//!     .expect("valid rosters")
//!     .run(&mut AutoProvider);
//! println!("{} after {} rounds", report.outcome, report.rounds);
//! ```
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use action::{
    ActionError, Decision, DecisionRequest, MenuOption, SkillCatalog, SkillDefinition, SkillId,
    TargetCandidate, TargetChoice, TargetRequest, parse_menu_index,
};
pub use config::{BattleConfig, EnemyTactics, GrowthRules};
pub use engine::{
    ActionProvider, AutoProvider, Battle, BattleEvent, BattlePhase, BattleReport, Outcome,
    RewardShare, SetupError,
};
pub use env::{Inventory, ItemKind, PcgRng, RngOracle, SequenceRng, mix_seed};
pub use error::{CombatError, ErrorSeverity};
pub use state::{
    Combatant, CombatantRef, CombatantView, EffectChannel, Role, Side, StatusEffect,
    StatusEffects, StatusKind,
};
pub use stats::{Bounty, CoreStats, LevelUp, Progression, ResourceKind, ResourceMeter};
