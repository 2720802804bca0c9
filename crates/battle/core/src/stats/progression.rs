//! Level, experience and gold, plus enemy reward drops.

use crate::config::GrowthRules;

/// Long-lived progression of a combatant.
///
/// Only the reward collaborator mutates this during a battle (on a win).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub gold: u32,
}

impl Progression {
    pub const fn new(level: u32, exp_to_next: u32) -> Self {
        Self {
            level,
            exp: 0,
            exp_to_next,
            gold: 0,
        }
    }

    /// Level 1 progression using the threshold from `rules`.
    pub const fn starting(rules: &GrowthRules) -> Self {
        Self::new(1, rules.base_exp_to_next)
    }

    /// Adds experience and reports whether the threshold was crossed.
    ///
    /// Crossing the threshold resets `exp` to zero and grows the threshold by
    /// `exp_curve_percent`. At most one level is gained per call; the caller
    /// applies stat growth for the returned [`LevelUp`].
    pub fn add_exp(&mut self, amount: u32, rules: &GrowthRules) -> Option<LevelUp> {
        self.exp = self.exp.saturating_add(amount);
        if self.exp < self.exp_to_next {
            return None;
        }

        self.level += 1;
        self.exp = 0;
        let grown = self.exp_to_next as u64 * rules.exp_curve_percent as u64 / 100;
        self.exp_to_next = (grown.min(u32::MAX as u64) as u32).max(1);

        Some(LevelUp {
            new_level: self.level,
        })
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::starting(&GrowthRules::default())
    }
}

/// Marker returned when a level threshold is crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    pub new_level: u32,
}

/// Experience and gold an enemy drops when the battle is won.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounty {
    pub exp: u32,
    pub gold: u32,
}

impl Bounty {
    pub const fn new(exp: u32, gold: u32) -> Self {
        Self { exp, gold }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_below_threshold_accumulates() {
        let rules = GrowthRules::default();
        let mut progression = Progression::starting(&rules);
        assert_eq!(progression.add_exp(60, &rules), None);
        assert_eq!(progression.exp, 60);
    }

    #[test]
    fn crossing_threshold_levels_once_and_grows_curve() {
        let rules = GrowthRules::default();
        let mut progression = Progression::starting(&rules);

        let level_up = progression.add_exp(250, &rules);

        assert_eq!(level_up, Some(LevelUp { new_level: 2 }));
        assert_eq!(progression.exp, 0);
        assert_eq!(progression.exp_to_next, 120);
    }

    #[test]
    fn gold_saturates() {
        let mut progression = Progression::default();
        progression.gold = u32::MAX - 1;
        progression.add_gold(10);
        assert_eq!(progression.gold, u32::MAX);
    }
}
