//! Core stats that feed the damage formulas.

/// Offensive and defensive attributes of a combatant.
///
/// - **attack**: base of every physical skill formula
/// - **defense**: halved and subtracted from incoming raw damage
/// - **magic**: base of magic-bolt and heal
/// - **agility**: carried for callers; no formula reads it yet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreStats {
    pub attack: u32,
    pub defense: u32,
    pub magic: u32,
    pub agility: u32,
}

impl CoreStats {
    pub const fn new(attack: u32, defense: u32, magic: u32, agility: u32) -> Self {
        Self {
            attack,
            defense,
            magic,
            agility,
        }
    }
}

impl Default for CoreStats {
    /// Starting stats of a fresh hero.
    fn default() -> Self {
        Self::new(10, 5, 8, 7)
    }
}
