//! Default bit source based on PCG32.
//!
//! PCG (Permuted Congruential Generator) is a family of simple, fast,
//! space-efficient, statistically strong generators. The variant here is
//! PCG-XSH-RR: 64 bits of state, 32-bit output, period 2^64, passes TestU01.
//! Since the [`BitSource`] contract is a 64-bit word, each word is formed
//! from two consecutive 32-bit outputs (high half first).
//!
//! Reference: <https://www.pcg-random.org/>
//!
//! # Usage
//!
//! ```rust
//! use randkit::{Pcg32, Random};
//!
//! let mut rng = Random::new(Pcg32::seed_from_u64(12345));
//! let value = rng.bounded_i64(100).unwrap();
//! assert!(value < 100);
//! ```
//!
//! NOT cryptographically secure. Output is fully predictable from the seed,
//! which is the point.

use serde::{Deserialize, Serialize};

use crate::source::{timing_entropy_seed, BitSource};

/// Default increment for single-stream PCG32, from the PCG reference
/// implementation.
const PCG_DEFAULT_INCREMENT: u64 = 1442695040888963407;

/// Multiplier constant for the LCG step (standard for 64-bit state PCG).
const PCG_MULTIPLIER: u64 = 6364136223846793005;

/// The crate's default bit source: a PCG-XSH-RR generator with 64-bit state.
///
/// State is two words, so cloning or serializing a mid-stream generator is
/// cheap; a restored clone continues the identical output stream. Suitable
/// for simulations, games and tests, NOT for anything adversarial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    /// Creates a generator from an explicit state and stream selector.
    ///
    /// The stream (increment) selects one of 2^63 statistically independent
    /// sequences; it is forced odd per the PCG seeding procedure.
    #[must_use]
    pub const fn new(state: u64, stream: u64) -> Self {
        let inc = (stream << 1) | 1;
        // Standard PCG seeding: start from zero, step, add the seed, step.
        let mut pcg = Self { state: 0, inc };
        pcg.state = pcg.state.wrapping_mul(PCG_MULTIPLIER).wrapping_add(pcg.inc);
        pcg.state = pcg.state.wrapping_add(state);
        pcg.state = pcg.state.wrapping_mul(PCG_MULTIPLIER).wrapping_add(pcg.inc);
        pcg
    }

    /// Creates a generator on the default stream from a 64-bit seed.
    #[must_use]
    pub const fn seed_from_u64(seed: u64) -> Self {
        Self::new(seed, PCG_DEFAULT_INCREMENT)
    }

    /// Creates a generator with a seed derived from timing and thread
    /// identity.
    ///
    /// Intentionally non-deterministic; use [`Pcg32::seed_from_u64`] whenever
    /// reproducibility matters.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::seed_from_u64(timing_entropy_seed())
    }

    /// Advances the state and returns the next 32-bit output.
    #[inline]
    #[must_use]
    pub fn next_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state
            .wrapping_mul(PCG_MULTIPLIER)
            .wrapping_add(self.inc);
        // XSH-RR output permutation: xorshift high bits, then random rotate.
        let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Returns the next 64-bit value, combining two 32-bit outputs.
    #[inline]
    #[must_use]
    pub fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }
}

impl BitSource for Pcg32 {
    fn reseed(&mut self, seed: i64) {
        *self = Self::seed_from_u64(seed as u64);
    }

    #[inline]
    fn next_word(&mut self) -> u64 {
        self.next_u64()
    }
}
