//! Party decision protocol.
//!
//! For each party turn the battle sends a [`DecisionRequest`] listing the
//! actor's menu. The provider answers with a [`Decision`]; if the decision
//! needs a single enemy target and more than one is alive, a
//! [`TargetRequest`] follows, answered with a [`TargetChoice`] or a cancel.
//!
//! Input from a text menu goes through [`parse_menu_index`], which turns bad
//! input into [`ActionError::InvalidSelection`] instead of failing.
pub mod available;
mod error;
pub mod skill;
pub mod targeting;

use core::fmt;

pub use available::{menu_for, validate};
pub use error::ActionError;
pub use skill::{
    Formula, ScalingStat, SkillCatalog, SkillDefinition, SkillEffect, SkillId, TargetArity,
};
pub use targeting::{TargetCandidate, TargetChoice, TargetPlan, TargetRequest};

use crate::env::ItemKind;
use crate::state::{CombatantRef, CombatantView};

/// A party member's chosen action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    Skill(SkillId),
    Item(ItemKind),
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Skill(id) => f.write_str(SkillCatalog::definition(*id).name),
            Decision::Item(item) => f.write_str(item.display_name()),
        }
    }
}

/// One line of the decision menu.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuOption {
    pub decision: Decision,
    /// Mp cost (skills only; 0 otherwise).
    pub mp_cost: u32,
    /// Units held (items only).
    pub count: Option<u32>,
    /// False when the actor cannot currently pay for it. Selecting a
    /// disabled option is rejected, not hidden.
    pub enabled: bool,
}

/// Everything a provider needs to pick an action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionRequest {
    pub actor: CombatantRef,
    pub round: u32,
    pub party: Vec<CombatantView>,
    pub enemies: Vec<CombatantView>,
    pub options: Vec<MenuOption>,
}

impl DecisionRequest {
    /// The acting party member.
    pub fn actor_view(&self) -> Option<&CombatantView> {
        self.party.get(self.actor.index)
    }

    /// Parses 1-based menu input into a decision.
    ///
    /// `Ok(None)` is returned for `0`, which menus use as "back".
    pub fn parse_input(&self, input: &str) -> Result<Option<Decision>, ActionError> {
        Ok(parse_menu_index(input, self.options.len())?.map(|i| self.options[i].decision))
    }
}

/// Parses a 1-based menu selection out of `len` entries.
///
/// `0` yields `Ok(None)`. Anything non-numeric or beyond `len` is an
/// [`ActionError::InvalidSelection`].
pub fn parse_menu_index(input: &str, len: usize) -> Result<Option<usize>, ActionError> {
    let trimmed = input.trim();
    let value: usize = trimmed
        .parse()
        .map_err(|_| ActionError::InvalidSelection(trimmed.to_owned()))?;

    match value {
        0 => Ok(None),
        n if n <= len => Ok(Some(n - 1)),
        _ => Err(ActionError::InvalidSelection(trimmed.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_menu_index_rejects_garbage() {
        assert_eq!(parse_menu_index("1", 3), Ok(Some(0)));
        assert_eq!(parse_menu_index("0", 3), Ok(None));
        assert_eq!(
            parse_menu_index("4", 3),
            Err(ActionError::InvalidSelection("4".into()))
        );
        assert_eq!(
            parse_menu_index("-1", 3),
            Err(ActionError::InvalidSelection("-1".into()))
        );
        assert!(parse_menu_index("", 3).is_err());
    }

    #[test]
    fn decision_displays_menu_name() {
        assert_eq!(Decision::Skill(SkillId::RangedShot).to_string(), "Arrow Shot");
        assert_eq!(Decision::Item(ItemKind::RagePotion).to_string(), "Rage Potion");
    }
}
