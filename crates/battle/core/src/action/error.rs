//! Decision errors.
//!
//! Every variant is recovered inside the turn loop: the decision is rejected
//! with no state change and the same actor is asked again.

use crate::env::ItemKind;
use crate::error::{CombatError, ErrorSeverity};
use crate::stats::ResourceKind;

use super::SkillId;

/// Why a party member's decision was not carried out.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Menu input that is not a number or is out of range.
    #[error("invalid selection: {0:?}")]
    InvalidSelection(String),

    /// Skill is outside the actor's capability set.
    #[error("skill {0} is not learned")]
    SkillNotLearned(SkillId),

    /// Skill is restricted to another role.
    #[error("skill {skill} requires the {required} role")]
    RoleMismatch { skill: SkillId, required: String },

    #[error("not enough {resource}: need {required}, have {available}")]
    InsufficientResource {
        resource: ResourceKind,
        required: u32,
        available: u32,
    },

    /// The action needs a live enemy and none is left.
    #[error("no valid target")]
    NoValidTarget,

    #[error("no {} left", .0.display_name())]
    ItemNotAvailable(ItemKind),

    /// The actor is at 0 hp.
    #[error("actor is defeated")]
    ActorDefeated,
}

impl CombatError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            InvalidSelection(_) | SkillNotLearned(_) | RoleMismatch { .. } => {
                ErrorSeverity::Validation
            }
            InsufficientResource { .. } | NoValidTarget | ItemNotAvailable(_) => {
                ErrorSeverity::Recoverable
            }
            ActorDefeated => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            InvalidSelection(_) => "ACTION_INVALID_SELECTION",
            SkillNotLearned(_) => "ACTION_SKILL_NOT_LEARNED",
            RoleMismatch { .. } => "ACTION_ROLE_MISMATCH",
            InsufficientResource { .. } => "ACTION_INSUFFICIENT_RESOURCE",
            NoValidTarget => "ACTION_NO_VALID_TARGET",
            ItemNotAvailable(_) => "ACTION_ITEM_NOT_AVAILABLE",
            ActorDefeated => "ACTION_ACTOR_DEFEATED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_and_codes() {
        let err = ActionError::InsufficientResource {
            resource: ResourceKind::Mp,
            required: 15,
            available: 4,
        };
        assert_eq!(err.to_string(), "not enough MP: need 15, have 4");
        assert_eq!(err.error_code(), "ACTION_INSUFFICIENT_RESOURCE");
        assert!(err.severity().is_recoverable());

        let err = ActionError::ItemNotAvailable(ItemKind::FireBomb);
        assert_eq!(err.to_string(), "no Fire Bomb left");
    }
}
