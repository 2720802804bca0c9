//! RNG oracle for reproducible random number generation.
//!
//! Every random draw in a battle (damage variance, enemy targeting, enemy
//! action choice, bomb damage) comes from a single generator handle that the
//! caller passes into the battle. A battle never re-seeds and never reaches for
//! a global generator, so a fixed seed reproduces an entire encounter.

/// RNG oracle for reproducible random number generation.
///
/// Implementations must be deterministic: the same starting state produces
/// the same sequence of draws.
pub trait RngOracle {
    /// Draw the next raw 32-bit value and advance the generator.
    fn next_u32(&mut self) -> u32;

    /// Roll a d100 (1-100 inclusive).
    ///
    /// Used for percentage gates such as the enemy power-strike threshold.
    fn roll_d100(&mut self) -> u32 {
        (self.next_u32() % 100) + 1
    }

    /// Generate a uniform value in range [min, max] inclusive.
    ///
    /// Negative bounds are allowed (basic-slash rolls `-3..=5`).
    fn range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        let offset = (self.next_u32() as u64 % span) as i64;
        (min as i64 + offset) as i32
    }

    /// Pick a uniform index into a collection of `len` elements.
    ///
    /// Returns `None` for an empty collection without consuming a draw.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.next_u32() as usize % len)
    }
}

impl<R: RngOracle + ?Sized> RngOracle for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64 bits of LCG state, 32-bit permuted output. The generator
/// is stateful; each draw advances the state once.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces the same sequence
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits, cheap to clone for look-ahead in tests
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed.
    ///
    /// The seed is avalanched first so that small consecutive seeds do not
    /// produce correlated opening draws.
    pub fn new(seed: u64) -> Self {
        Self {
            state: mix_seed(seed, 0),
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Replays a fixed list of raw draws, cycling when exhausted.
///
/// Useful for fixtures and for reproducing a reported battle draw by draw.
/// With [`RngOracle::range`], a raw value `v` yields `min + v % span`, so a
/// raw value of `k` (with `k < span`) produces `min + k`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceRng {
    draws: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    /// Creates a replaying generator. An empty list always yields 0.
    pub fn new(draws: impl Into<Vec<u32>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RngOracle for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        if self.draws.is_empty() {
            return 0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}

/// Compute a seed for one encounter from a session seed.
///
/// Lets a caller run several battles from one session seed while keeping each
/// battle independently reproducible.
///
/// Constants are the SplitMix64 / FxHash multipliers followed by the murmur3
/// finalizer.
pub fn mix_seed(session_seed: u64, encounter: u64) -> u64 {
    let mut hash = session_seed;

    hash ^= encounter.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;

    hash
}
