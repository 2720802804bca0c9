//! Target selection against the enemy roster.
//!
//! Only live (hp > 0) entries are ever presented, in stable roster order.
//! Indices in a [`TargetRequest`] refer to that presented subset; the request
//! maps a choice back to a roster index.

use crate::state::{Combatant, CombatantRef};

use super::{ActionError, Decision};

/// Roster indices of live combatants, in roster order.
pub fn live_indices(roster: &[Combatant]) -> Vec<usize> {
    roster
        .iter()
        .enumerate()
        .filter(|(_, combatant)| combatant.is_alive())
        .map(|(index, _)| index)
        .collect()
}

/// Targets of an all-enemies action: every live entry.
pub fn all_live(roster: &[Combatant]) -> Vec<usize> {
    live_indices(roster)
}

/// How a single-target action acquires its target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetPlan {
    /// Nothing is alive.
    Unavailable,
    /// Exactly one live entry; no prompt.
    Automatic(usize),
    /// Two or more live entries; the caller must prompt.
    Choose(Vec<TargetCandidate>),
}

/// Plans single-target acquisition against `roster`.
pub fn plan(roster: &[Combatant]) -> TargetPlan {
    let live = live_indices(roster);
    match live.as_slice() {
        [] => TargetPlan::Unavailable,
        [only] => TargetPlan::Automatic(*only),
        _ => TargetPlan::Choose(
            live.into_iter()
                .map(|index| TargetCandidate::from_roster(index, &roster[index]))
                .collect(),
        ),
    }
}

/// One entry of a target prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetCandidate {
    /// Index into the enemy roster.
    pub index: usize,
    pub name: String,
    pub hp: u32,
    pub hp_max: u32,
}

impl TargetCandidate {
    fn from_roster(index: usize, combatant: &Combatant) -> Self {
        Self {
            index,
            name: combatant.name.clone(),
            hp: combatant.hp.current,
            hp_max: combatant.hp.maximum,
        }
    }
}

/// Answer to a [`TargetRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetChoice {
    /// Zero-based position in [`TargetRequest::candidates`].
    Candidate(usize),
    /// Abandon the action; anything reserved for it is refunded.
    Cancel,
}

/// Prompt for a single target among two or more live enemies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetRequest {
    pub actor: CombatantRef,
    /// The skill or item being aimed.
    pub source: Decision,
    pub candidates: Vec<TargetCandidate>,
}

impl TargetRequest {
    /// Maps a choice to an enemy roster index. `Ok(None)` means cancelled.
    pub fn resolve(&self, choice: TargetChoice) -> Result<Option<usize>, ActionError> {
        match choice {
            TargetChoice::Cancel => Ok(None),
            TargetChoice::Candidate(position) => self
                .candidates
                .get(position)
                .map(|candidate| Some(candidate.index))
                .ok_or_else(|| ActionError::InvalidSelection(format!("target {}", position + 1))),
        }
    }

    /// Parses 1-based menu input; `0` cancels.
    pub fn parse_input(&self, input: &str) -> Result<TargetChoice, ActionError> {
        match super::parse_menu_index(input, self.candidates.len())? {
            None => Ok(TargetChoice::Cancel),
            Some(position) => Ok(TargetChoice::Candidate(position)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkillId;
    use crate::stats::{Bounty, CoreStats};

    fn roster(hps: &[u32]) -> Vec<Combatant> {
        hps.iter()
            .enumerate()
            .map(|(i, hp)| {
                let mut enemy =
                    Combatant::enemy(format!("E{i}"), CoreStats::default(), 40, Bounty::default());
                enemy.hp.current = *hp;
                enemy
            })
            .collect()
    }

    #[test]
    fn single_live_enemy_is_automatic() {
        assert_eq!(plan(&roster(&[0, 12, 0])), TargetPlan::Automatic(1));
        assert_eq!(plan(&roster(&[0, 0])), TargetPlan::Unavailable);
    }

    #[test]
    fn choice_maps_through_live_subset() {
        let TargetPlan::Choose(candidates) = plan(&roster(&[10, 0, 30])) else {
            panic!("expected a prompt");
        };
        let request = TargetRequest {
            actor: CombatantRef::party(0),
            source: Decision::Skill(SkillId::BasicSlash),
            candidates,
        };

        assert_eq!(request.resolve(TargetChoice::Candidate(1)), Ok(Some(2)));
        assert_eq!(request.resolve(TargetChoice::Cancel), Ok(None));
        assert!(matches!(
            request.resolve(TargetChoice::Candidate(2)),
            Err(ActionError::InvalidSelection(_))
        ));
    }

    #[test]
    fn parse_input_treats_zero_as_cancel() {
        let request = TargetRequest {
            actor: CombatantRef::party(0),
            source: Decision::Skill(SkillId::BasicSlash),
            candidates: vec![
                TargetCandidate { index: 0, name: "A".into(), hp: 1, hp_max: 1 },
                TargetCandidate { index: 3, name: "B".into(), hp: 1, hp_max: 1 },
            ],
        };
        assert_eq!(request.parse_input("0"), Ok(TargetChoice::Cancel));
        assert_eq!(request.parse_input(" 2 "), Ok(TargetChoice::Candidate(1)));
        assert!(request.parse_input("3").is_err());
        assert!(request.parse_input("two").is_err());
    }
}
