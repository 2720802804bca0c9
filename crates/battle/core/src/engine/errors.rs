//! Errors surfaced before a battle is entered.

use crate::error::{CombatError, ErrorSeverity};

/// Rosters that cannot be fought with.
///
/// Returned by [`Battle::new`](super::Battle::new); a battle is never entered
/// with incomplete combatants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("party roster is empty")]
    EmptyParty,

    #[error("enemy roster is empty")]
    EmptyEnemyRoster,

    #[error("combatant {name:?} is invalid: {reason}")]
    InvalidCombatant { name: String, reason: &'static str },
}

impl SetupError {
    pub(crate) fn invalid(name: &str, reason: &'static str) -> Self {
        Self::InvalidCombatant {
            name: name.to_owned(),
            reason,
        }
    }
}

impl CombatError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyParty => "SETUP_EMPTY_PARTY",
            Self::EmptyEnemyRoster => "SETUP_EMPTY_ENEMY_ROSTER",
            Self::InvalidCombatant { .. } => "SETUP_INVALID_COMBATANT",
        }
    }
}
