//! Common error infrastructure for battle-core.
//!
//! Domain errors (e.g. [`ActionError`](crate::action::ActionError),
//! [`SetupError`](crate::engine::SetupError)) live next to the code that
//! produces them. This module only holds the classification shared by the
//! turn loop and by callers deciding how to surface a failure.
//!
//! Nothing inside the turn loop is fatal. A rejected decision is reported as
//! an event and the same actor is asked again; only battle setup can fail
//! outright.

/// How far up a failure has to travel before someone can act on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the same actor can retry with another choice.
    ///
    /// Examples: not enough mp, no live target for a skill
    Recoverable,

    /// Validation error - the input itself was malformed.
    ///
    /// Examples: menu index out of range, skill not learned
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - the battle cannot be entered or continued.
    ///
    /// Examples: empty roster, combatant with zero maximum hp
    Fatal,
}

impl ErrorSeverity {
    /// Lowercase name used in log fields.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the turn loop can recover locally by re-prompting.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates a bug or corrupted input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every error enum in this crate.
///
/// Severity follows recoverability: a wrong menu pick is `Validation` even
/// though it costs the player nothing.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier such as `ACTION_NO_VALID_TARGET`, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_and_validation_are_locally_recoverable() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(ErrorSeverity::Validation.is_recoverable());
        assert!(!ErrorSeverity::Fatal.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
