//! The decision boundary between the battle and its interaction layer.

use crate::action::{Decision, DecisionRequest, TargetChoice, TargetRequest};

use super::BattleEvent;

/// Source of party decisions.
///
/// The battle blocks on these calls; they are a request/response boundary,
/// not a concurrent operation. Invalid answers are rejected and asked again,
/// so an implementation never has to validate on its own.
pub trait ActionProvider {
    /// Choose an action for the party member named in `request`.
    fn provide_decision(&mut self, request: &DecisionRequest) -> Decision;

    /// Choose a target for a single-target action, or cancel it.
    fn provide_target(&mut self, request: &TargetRequest) -> TargetChoice;

    /// Receives every event as it is emitted.
    fn observe(&mut self, _event: &BattleEvent) {}
}

impl<P: ActionProvider + ?Sized> ActionProvider for &mut P {
    fn provide_decision(&mut self, request: &DecisionRequest) -> Decision {
        (**self).provide_decision(request)
    }

    fn provide_target(&mut self, request: &TargetRequest) -> TargetChoice {
        (**self).provide_target(request)
    }

    fn observe(&mut self, event: &BattleEvent) {
        (**self).observe(event)
    }
}

/// Picks the first enabled menu entry and the first target.
///
/// Useful for tests, simulations and as an autopilot fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoProvider;

impl ActionProvider for AutoProvider {
    fn provide_decision(&mut self, request: &DecisionRequest) -> Decision {
        request
            .options
            .iter()
            .find(|option| option.enabled)
            .map(|option| option.decision)
            .unwrap_or(Decision::Skill(crate::action::SkillId::BasicSlash))
    }

    fn provide_target(&mut self, _request: &TargetRequest) -> TargetChoice {
        TargetChoice::Candidate(0)
    }
}
