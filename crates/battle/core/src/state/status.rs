//! Status effect system for combatants.
//!
//! Status effects are timed percentage modifiers on one damage channel.
//!
//! # Round-based Duration
//!
//! Each effect stores the number of rounds it has left. The battle ticks every
//! tracked combatant exactly once per completed round; a tick decrements every
//! effect by one and drops the ones that reach zero. Ticking twice in one
//! round would double-decrement, so only the engine calls [`StatusEffects::tick`].

use core::fmt;

/// Whether an effect helps or hinders its holder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum StatusKind {
    Buff,
    Debuff,
}

/// The damage channel an effect modifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectChannel {
    /// Damage dealt by the holder. Buffs raise it.
    #[strum(serialize = "outgoing damage")]
    OutgoingDamage,

    /// Damage taken by the holder. Debuffs scale it down.
    #[strum(serialize = "incoming damage")]
    IncomingDamage,
}

/// A single timed modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub channel: EffectChannel,
    /// Signed percentage applied on the channel.
    pub magnitude: i32,
    /// Rounds left; always at least 1 while the effect is held.
    pub remaining: u32,
}

impl StatusEffect {
    /// Creates an effect. A zero duration is raised to one round.
    pub fn new(kind: StatusKind, channel: EffectChannel, magnitude: i32, rounds: u32) -> Self {
        Self {
            kind,
            channel,
            magnitude,
            remaining: rounds.max(1),
        }
    }

    pub fn buff(channel: EffectChannel, magnitude: i32, rounds: u32) -> Self {
        Self::new(StatusKind::Buff, channel, magnitude, rounds)
    }

    pub fn debuff(channel: EffectChannel, magnitude: i32, rounds: u32) -> Self {
        Self::new(StatusKind::Debuff, channel, magnitude, rounds)
    }

    /// Short label used by presentation layers.
    pub fn label(&self) -> &'static str {
        match (self.kind, self.channel) {
            (StatusKind::Buff, EffectChannel::OutgoingDamage) => "rage",
            (StatusKind::Buff, EffectChannel::IncomingDamage) => "guard",
            (StatusKind::Debuff, EffectChannel::IncomingDamage) => "weaken",
            (StatusKind::Debuff, EffectChannel::OutgoingDamage) => "sap",
        }
    }
}

impl fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {:+}% {}, {} rounds)",
            self.label(),
            self.kind,
            self.magnitude,
            self.channel,
            self.remaining
        )
    }
}

/// Active status effects on a combatant, in application order.
///
/// Order only matters for display; resolution sums magnitudes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends an effect. Effects of the same kind stack independently.
    pub fn push(&mut self, effect: StatusEffect) {
        self.effects.push(effect);
    }

    /// Sum of buff magnitudes on the outgoing-damage channel.
    pub fn outgoing_bonus_percent(&self) -> i32 {
        self.sum(StatusKind::Buff, EffectChannel::OutgoingDamage)
    }

    /// Sum of debuff magnitudes on the incoming-damage channel.
    pub fn incoming_reduction_percent(&self) -> i32 {
        self.sum(StatusKind::Debuff, EffectChannel::IncomingDamage)
    }

    fn sum(&self, kind: StatusKind, channel: EffectChannel) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind && e.channel == channel)
            .map(|e| e.magnitude)
            .sum()
    }

    /// Advances every effect by one round.
    ///
    /// Builds the retained set instead of removing while iterating. Returns
    /// the effects that expired on this tick.
    pub fn tick(&mut self) -> Vec<StatusEffect> {
        let mut retained = Vec::with_capacity(self.effects.len());
        let mut expired = Vec::new();

        for mut effect in self.effects.drain(..) {
            effect.remaining -= 1;
            if effect.remaining == 0 {
                expired.push(effect);
            } else {
                retained.push(effect);
            }
        }

        self.effects = retained;
        expired
    }

    /// Removes every effect (battle end).
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
