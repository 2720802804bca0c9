use super::outcome::Outcome;

/// Position of a battle in its turn cycle.
///
/// ```text
/// AwaitingPartyAction(0) → … → AwaitingPartyAction(n) → AwaitingEnemyActions
///     → TickingEffects → CheckingOutcome → AwaitingPartyAction(0) | Won | Lost
/// ```
///
/// Any party action that defeats the last enemy jumps straight to `Won`.
/// Resolution of an action happens inside the step that handles its
/// awaiting phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    /// Party member at this roster index is next to act.
    AwaitingPartyAction(usize),
    AwaitingEnemyActions,
    TickingEffects,
    CheckingOutcome,
    Won,
    Lost,
}

impl BattlePhase {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::Won => Some(Outcome::Won),
            Self::Lost => Some(Outcome::Lost),
            _ => None,
        }
    }
}

impl From<Outcome> for BattlePhase {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => Self::Won,
            Outcome::Lost => Self::Lost,
        }
    }
}
