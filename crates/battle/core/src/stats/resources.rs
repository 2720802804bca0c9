//! Resource pools (HP, MP).
//!
//! Both pools share one invariant: `0 <= current <= maximum`. Every mutation
//! goes through a clamping method; nothing writes `current` directly.

/// Enum representing individual resource types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// Health points.
    #[strum(serialize = "HP")]
    Hp,
    /// Magic points (mana).
    #[strum(serialize = "MP")]
    Mp,
}

/// Integer resource meter (health or mana) tracked per combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    /// Creates a meter, clamping `current` to `maximum`.
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// Creates a meter filled to its maximum.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    pub const fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// Removes up to `amount`, stopping at zero.
    ///
    /// Returns the amount actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Removes exactly `amount` or nothing at all.
    ///
    /// Returns false (and leaves the meter untouched) when `current < amount`.
    pub fn spend(&mut self, amount: u32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }

    /// Adds up to `amount`, stopping at the maximum.
    ///
    /// Returns the amount actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.maximum.saturating_sub(self.current));
        self.current += restored;
        restored
    }

    /// Fills the meter to its maximum.
    pub fn refill(&mut self) {
        self.current = self.maximum;
    }

    /// Raises the maximum without touching `current`.
    pub fn raise_maximum(&mut self, amount: u32) {
        self.maximum = self.maximum.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_current_to_maximum() {
        let meter = ResourceMeter::new(150, 100);
        assert_eq!(meter.current, 100);
    }

    #[test]
    fn spend_is_all_or_nothing() {
        let mut mp = ResourceMeter::full(20);
        assert!(mp.spend(15));
        assert_eq!(mp.current, 5);

        assert!(!mp.spend(10));
        assert_eq!(mp.current, 5);

        assert!(mp.spend(5));
        assert!(mp.is_depleted());
    }

    #[test]
    fn drain_stops_at_zero() {
        let mut hp = ResourceMeter::full(10);
        assert_eq!(hp.drain(4), 4);
        assert_eq!(hp.drain(100), 6);
        assert_eq!(hp.drain(3), 0);
        assert_eq!(hp.current, 0);
    }

    #[test]
    fn restore_stops_at_maximum() {
        let mut hp = ResourceMeter::new(90, 100);
        assert_eq!(hp.restore(30), 10);
        assert!(hp.is_full());
        assert_eq!(hp.restore(5), 0);
    }
}
