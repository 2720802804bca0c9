/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Enemy decision weights.
    pub enemy: EnemyTactics,

    /// Level-up growth applied by the reward collaborator.
    pub growth: GrowthRules,
}

impl BattleConfig {
    pub fn new() -> Self {
        Self {
            enemy: EnemyTactics::default(),
            growth: GrowthRules::default(),
        }
    }

    pub fn with_growth(mut self, growth: GrowthRules) -> Self {
        self.growth = growth;
        self
    }

    pub fn with_enemy_tactics(mut self, enemy: EnemyTactics) -> Self {
        self.enemy = enemy;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Weighted-random enemy action selection.
///
/// The enemy first picks between a basic attack and a power strike by weight.
/// A picked power strike only fires when a d100 roll exceeds
/// `power_strike_gate`; otherwise it degrades to a basic attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyTactics {
    pub basic_weight: u32,
    pub power_weight: u32,
    pub power_strike_gate: u32,
}

impl EnemyTactics {
    pub const DEFAULT_BASIC_WEIGHT: u32 = 2;
    pub const DEFAULT_POWER_WEIGHT: u32 = 1;
    pub const DEFAULT_POWER_STRIKE_GATE: u32 = 40;

    pub const fn new(basic_weight: u32, power_weight: u32, power_strike_gate: u32) -> Self {
        Self {
            basic_weight,
            power_weight,
            power_strike_gate,
        }
    }
}

impl Default for EnemyTactics {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_BASIC_WEIGHT,
            Self::DEFAULT_POWER_WEIGHT,
            Self::DEFAULT_POWER_STRIKE_GATE,
        )
    }
}

/// Stat growth applied on a level up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowthRules {
    /// Experience threshold for level 2.
    pub base_exp_to_next: u32,
    /// Threshold growth per level, in percent of the previous threshold.
    pub exp_curve_percent: u32,
    pub hp_max: u32,
    pub mp_max: u32,
    pub attack: u32,
    pub defense: u32,
    pub magic: u32,
    pub agility: u32,
}

impl GrowthRules {
    pub const DEFAULT_BASE_EXP_TO_NEXT: u32 = 100;
    pub const DEFAULT_EXP_CURVE_PERCENT: u32 = 120;
}

impl Default for GrowthRules {
    fn default() -> Self {
        Self {
            base_exp_to_next: Self::DEFAULT_BASE_EXP_TO_NEXT,
            exp_curve_percent: Self::DEFAULT_EXP_CURVE_PERCENT,
            hp_max: 15,
            mp_max: 10,
            attack: 3,
            defense: 2,
            magic: 2,
            agility: 1,
        }
    }
}
