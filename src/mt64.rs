//! Mersenne-Twister-compatible bit source (mt19937-64).
//!
//! The 64-bit Mersenne Twister of Nishimura and Matsumoto: 312 words of
//! state, period 2^19937 − 1, natively 64-bit output. It is the drop-in
//! choice when a stream must match other mt19937-64 implementations
//! seeded the same way.
//!
//! Compared to [`Pcg32`](crate::Pcg32) the state is ~2.5 KiB instead of two
//! words, so cloning and serializing are proportionally heavier. Statistical
//! quality is excellent in both; prefer this one for cross-implementation
//! compatibility, the default for everything else.
//!
//! NOT cryptographically secure: observing 312 outputs is enough to
//! reconstruct the entire state.

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::source::{timing_entropy_seed, BitSource};

/// Number of state words.
const NN: usize = 312;

/// Middle word offset used by the twist transformation.
const MM: usize = 156;

/// The twist matrix constant.
const MATRIX_A: u64 = 0xB5026F5AA96619E9;

/// Mask selecting the most significant 33 bits.
const UPPER_MASK: u64 = 0xFFFFFFFF80000000;

/// Mask selecting the least significant 31 bits.
const LOWER_MASK: u64 = 0x000000007FFFFFFF;

/// Multiplier of the state initialization recurrence.
const INIT_MULTIPLIER: u64 = 6364136223846793005;

/// The reference implementation's default seed.
pub const MT_DEFAULT_SEED: u64 = 5489;

/// Mersenne-Twister-compatible bit source (mt19937-64).
///
/// # Example
///
/// ```rust
/// use randkit::{Mt64, Random};
///
/// let mut rng = Random::new(Mt64::seed_from_u64(5489));
/// let word = rng.next_u64();
/// # let _ = word;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mt64 {
    mt: [u64; NN],
    index: usize,
}

impl Mt64 {
    /// Creates a generator seeded with the reference default (5489).
    #[must_use]
    pub fn new() -> Self {
        Self::seed_from_u64(MT_DEFAULT_SEED)
    }

    /// Creates a generator from a 64-bit seed using the reference
    /// initialization recurrence (`init_genrand64`).
    #[must_use]
    pub fn seed_from_u64(seed: u64) -> Self {
        let mut mt = [0u64; NN];
        mt[0] = seed;
        for i in 1..NN {
            mt[i] = INIT_MULTIPLIER
                .wrapping_mul(mt[i - 1] ^ (mt[i - 1] >> 62))
                .wrapping_add(i as u64);
        }
        // index == NN forces a twist before the first output.
        Self { mt, index: NN }
    }

    /// Creates a generator with a seed derived from timing and thread
    /// identity.
    ///
    /// Intentionally non-deterministic; use [`Mt64::seed_from_u64`] whenever
    /// reproducibility matters.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::seed_from_u64(timing_entropy_seed())
    }

    /// Regenerates all 312 state words.
    fn twist(&mut self) {
        for i in 0..NN {
            let x = (self.mt[i] & UPPER_MASK) | (self.mt[(i + 1) % NN] & LOWER_MASK);
            let mut x_a = x >> 1;
            if x & 1 != 0 {
                x_a ^= MATRIX_A;
            }
            self.mt[i] = self.mt[(i + MM) % NN] ^ x_a;
        }
        self.index = 0;
    }

    /// Advances the state and returns the next tempered 64-bit output.
    #[inline]
    #[must_use]
    pub fn next_u64(&mut self) -> u64 {
        if self.index >= NN {
            self.twist();
        }
        let mut x = self.mt[self.index];
        self.index += 1;

        // Tempering, exactly as in the reference implementation.
        x ^= (x >> 29) & 0x5555555555555555;
        x ^= (x << 17) & 0x71D67FFFEDA60000;
        x ^= (x << 37) & 0xFFF7EEE000000000;
        x ^= x >> 43;
        x
    }
}

impl Default for Mt64 {
    fn default() -> Self {
        Self::new()
    }
}

impl BitSource for Mt64 {
    fn reseed(&mut self, seed: i64) {
        *self = Self::seed_from_u64(seed as u64);
    }

    #[inline]
    fn next_word(&mut self) -> u64 {
        self.next_u64()
    }
}

// The 312-word state array exceeds serde's derive support for fixed-size
// arrays, so the impls are written out; the wire shape is
// `{ "mt": [u64; 312], "index": usize }`.

impl Serialize for Mt64 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Mt64", 2)?;
        state.serialize_field("mt", &self.mt[..])?;
        state.serialize_field("index", &self.index)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Mt64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            mt: Vec<u64>,
            index: usize,
        }

        let raw = Raw::deserialize(deserializer)?;
        if raw.mt.len() != NN {
            return Err(D::Error::invalid_length(raw.mt.len(), &"312 state words"));
        }
        if raw.index > NN {
            return Err(D::Error::custom("state index out of range"));
        }
        let mut mt = [0u64; NN];
        mt.copy_from_slice(&raw.mt);
        Ok(Self {
            mt,
            index: raw.index,
        })
    }
}
