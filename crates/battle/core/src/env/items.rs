//! Consumable items usable from the battle menu.
//!
//! Items are a closed catalog: every consumer matches on [`ItemKind`]
//! exhaustively. Shops and loot only ever change [`Inventory`] counts.

use std::collections::BTreeMap;

use crate::state::{EffectChannel, StatusEffect};

/// Every consumable the battle knows how to resolve.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    HealthPotion,
    GreaterHealthPotion,
    RagePotion,
    WeakenPotion,
    FireBomb,
    IceBomb,
}

/// Who an item resolves against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemTarget {
    /// The user; never prompts.
    User,
    /// One live enemy chosen through target selection.
    SingleEnemy,
    /// Every live enemy, each resolved independently.
    AllEnemies,
}

/// What an item does once its target is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    RestoreHp(u32),
    ApplyStatus(StatusEffect),
    /// Raw damage rolled uniformly in `[min, max]` per target, before the
    /// target's own mitigation.
    Blast { min: i32, max: i32 },
}

impl ItemKind {
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::HealthPotion => "Health Potion",
            Self::GreaterHealthPotion => "Greater Health Potion",
            Self::RagePotion => "Rage Potion",
            Self::WeakenPotion => "Weaken Potion",
            Self::FireBomb => "Fire Bomb",
            Self::IceBomb => "Ice Bomb",
        }
    }

    pub const fn target(self) -> ItemTarget {
        match self {
            Self::HealthPotion | Self::GreaterHealthPotion | Self::RagePotion => ItemTarget::User,
            Self::WeakenPotion => ItemTarget::SingleEnemy,
            Self::FireBomb | Self::IceBomb => ItemTarget::AllEnemies,
        }
    }

    pub fn effect(self) -> ItemEffect {
        match self {
            Self::HealthPotion => ItemEffect::RestoreHp(30),
            Self::GreaterHealthPotion => ItemEffect::RestoreHp(80),
            Self::RagePotion => {
                ItemEffect::ApplyStatus(StatusEffect::buff(EffectChannel::OutgoingDamage, 20, 3))
            }
            Self::WeakenPotion => {
                ItemEffect::ApplyStatus(StatusEffect::debuff(EffectChannel::IncomingDamage, 15, 3))
            }
            Self::FireBomb | Self::IceBomb => ItemEffect::Blast { min: 30, max: 50 },
        }
    }
}

/// Item counts carried by a combatant, ordered by [`ItemKind`].
///
/// Entries with a zero count are never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    items: BTreeMap<ItemKind, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, item: ItemKind, count: u32) -> Self {
        self.add(item, count);
        self
    }

    pub fn add(&mut self, item: ItemKind, count: u32) {
        if count == 0 {
            return;
        }
        let entry = self.items.entry(item).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    pub fn count(&self, item: ItemKind) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn has(&self, item: ItemKind) -> bool {
        self.count(item) > 0
    }

    /// Removes one unit. Returns false if none was held.
    pub fn consume(&mut self, item: ItemKind) -> bool {
        match self.items.get_mut(&item) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.items.remove(&item);
                true
            }
            None => false,
        }
    }

    /// Held items with their counts, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemKind, u32)> + '_ {
        self.items
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(item, count)| (*item, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl FromIterator<(ItemKind, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (ItemKind, u32)>>(iter: I) -> Self {
        let mut inventory = Self::new();
        for (item, count) in iter {
            inventory.add(item, count);
        }
        inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn consume_removes_entry_at_zero() {
        let mut inventory = Inventory::new().with(ItemKind::FireBomb, 2);
        assert!(inventory.consume(ItemKind::FireBomb));
        assert_eq!(inventory.count(ItemKind::FireBomb), 1);
        assert!(inventory.consume(ItemKind::FireBomb));
        assert!(!inventory.has(ItemKind::FireBomb));
        assert!(!inventory.consume(ItemKind::FireBomb));
        assert!(inventory.is_empty());
    }

    #[test]
    fn zero_counts_are_not_stored() {
        let inventory: Inventory = [(ItemKind::RagePotion, 0), (ItemKind::HealthPotion, 3)]
            .into_iter()
            .collect();
        let held: Vec<_> = inventory.iter().collect();
        assert_eq!(held, vec![(ItemKind::HealthPotion, 3)]);
    }

    #[test]
    fn weaken_potion_targets_one_enemy() {
        assert_eq!(ItemKind::WeakenPotion.target(), ItemTarget::SingleEnemy);
        assert!(matches!(
            ItemKind::WeakenPotion.effect(),
            ItemEffect::ApplyStatus(effect) if effect.magnitude == 15 && effect.remaining == 3
        ));
    }

    #[test]
    fn parses_snake_case_names() {
        assert_eq!(ItemKind::from_str("fire_bomb"), Ok(ItemKind::FireBomb));
        assert_eq!(ItemKind::GreaterHealthPotion.to_string(), "greater_health_potion");
    }
}
