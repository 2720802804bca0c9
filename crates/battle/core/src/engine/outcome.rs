//! Victory/defeat detection and reward distribution.

use crate::config::GrowthRules;
use crate::state::Combatant;
use crate::stats::LevelUp;

/// Terminal result of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// Every enemy is at 0 hp.
    Won,
    /// Every party member is at 0 hp.
    Lost,
}

/// What each party member receives on a win.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardShare {
    pub exp: u32,
    pub gold: u32,
}

pub fn all_defeated(roster: &[Combatant]) -> bool {
    roster.iter().all(|combatant| !combatant.is_alive())
}

/// Terminal outcome of the current rosters, if any.
///
/// Victory is checked first: the party can only lose during the enemy phase,
/// when at least one enemy is still standing.
pub fn evaluate(party: &[Combatant], enemies: &[Combatant]) -> Option<Outcome> {
    if all_defeated(enemies) {
        Some(Outcome::Won)
    } else if all_defeated(party) {
        Some(Outcome::Lost)
    } else {
        None
    }
}

/// Pools every enemy's drop and splits it evenly (floor) across
/// `party_size`.
///
/// All enemies count, whether or not they were the last to fall.
pub fn reward_share(party_size: usize, enemies: &[Combatant]) -> RewardShare {
    if party_size == 0 {
        return RewardShare::default();
    }

    let (exp, gold) = enemies
        .iter()
        .filter_map(|enemy| enemy.bounty)
        .fold((0u64, 0u64), |(exp, gold), bounty| {
            (exp + bounty.exp as u64, gold + bounty.gold as u64)
        });

    let size = party_size as u64;
    RewardShare {
        exp: (exp / size).min(u32::MAX as u64) as u32,
        gold: (gold / size).min(u32::MAX as u64) as u32,
    }
}

/// Gives `share` to every party member, alive or not.
///
/// Returns the roster index and level-up of each member that levelled.
pub fn distribute(
    party: &mut [Combatant],
    share: RewardShare,
    rules: &GrowthRules,
) -> Vec<(usize, LevelUp)> {
    party
        .iter_mut()
        .enumerate()
        .filter_map(|(index, member)| {
            member.gain_gold(share.gold);
            member
                .gain_exp(share.exp, rules)
                .map(|level_up| (index, level_up))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Role;
    use crate::stats::{Bounty, CoreStats};

    fn enemies() -> Vec<Combatant> {
        vec![
            Combatant::enemy("Slime", CoreStats::new(5, 2, 2, 0), 25, Bounty::new(25, 30)),
            Combatant::enemy("Goblin", CoreStats::new(8, 3, 1, 0), 40, Bounty::new(50, 60)),
        ]
    }

    #[test]
    fn single_member_takes_the_whole_pool() {
        assert_eq!(reward_share(1, &enemies()), RewardShare { exp: 75, gold: 90 });
    }

    #[test]
    fn pool_is_floor_divided() {
        assert_eq!(reward_share(2, &enemies()), RewardShare { exp: 37, gold: 45 });
    }

    #[test]
    fn defeated_members_are_still_paid() {
        let mut party = vec![
            Combatant::hero("Arga", Role::warrior()),
            Combatant::hero("Lyra", Role::archer()),
        ];
        party[1].hp.current = 0;

        let share = RewardShare { exp: 37, gold: 45 };
        let level_ups = distribute(&mut party, share, &GrowthRules::default());

        assert!(level_ups.is_empty());
        for member in &party {
            assert_eq!(member.progression.exp, 37);
            assert_eq!(member.progression.gold, 45);
        }
        assert_eq!(party[1].hp.current, 0);
    }

    #[test]
    fn evaluate_prefers_victory() {
        let mut party = vec![Combatant::hero("Arga", Role::warrior())];
        let mut foes = enemies();
        assert_eq!(evaluate(&party, &foes), None);

        party[0].hp.current = 0;
        assert_eq!(evaluate(&party, &foes), Some(Outcome::Lost));

        for foe in &mut foes {
            foe.hp.current = 0;
        }
        assert_eq!(evaluate(&party, &foes), Some(Outcome::Won));
    }
}
