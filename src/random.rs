//! The derivation core: every derived draw over one owned [`BitSource`].
//!
//! [`Random`] owns exactly one bit source and turns its raw 64-bit words
//! into the values callers actually want: unbounded and bounded integers,
//! unit-interval floats, permutations, shuffles and byte fills. Each derived
//! operation is a pure mapping over one or more raw words; the source's
//! state is the only state anywhere in this crate.
//!
//! Bias matters here. The bounded draws ([`Random::bounded_i64`],
//! [`Random::bounded_i32`]) use rejection sampling and are exactly uniform
//! for every bound. The modulo draws ([`Random::modulo_u64`],
//! [`Random::modulo_u32`]) are the documented cheaper alternative: a plain
//! `word % n`, slightly biased whenever `n` does not evenly divide the word
//! space. Callers opt into one or the other explicitly; nothing silently
//! substitutes the biased form.
//!
//! # Concurrency
//!
//! `Random` carries no synchronization whatsoever. Invoking any two of its
//! methods concurrently from different threads is a data race and is the
//! caller's responsibility to prevent. Wrap the core in
//! [`SyncRandom`](crate::SyncRandom) instead of sharing it.

use tracing::debug;

use crate::error::RandError;
use crate::pcg::Pcg32;
use crate::source::BitSource;
use crate::RandResult;

/// A derivation core owning one [`BitSource`].
///
/// Reseeding with the same value and issuing the same call sequence yields
/// bit-identical results: the round-trip law every test in this crate
/// leans on.
///
/// # Example
///
/// ```rust
/// use randkit::Random;
///
/// let mut rng = Random::with_seed(42);
/// let die = rng.bounded_i64(6).unwrap() + 1;
/// assert!((1..=6).contains(&die));
/// ```
#[derive(Debug, Clone)]
pub struct Random<S: BitSource = Pcg32> {
    source: S,
}

impl Random<Pcg32> {
    /// Creates a core over the default source, seeded deterministically.
    #[must_use]
    pub fn with_seed(seed: i64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed as u64))
    }

    /// Creates a core over the default source with a timing-derived seed.
    ///
    /// Non-deterministic by design; see [`Pcg32::from_entropy`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(Pcg32::from_entropy())
    }
}

impl<S: BitSource> Random<S> {
    /// Wraps a bit source. The core takes exclusive ownership; there is no
    /// sharing without [`SyncRandom`](crate::SyncRandom).
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Read-only view of the owned source, e.g. to checkpoint its state.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consumes the core and returns the owned source.
    #[must_use]
    pub fn into_source(self) -> S {
        self.source
    }

    /// Resets the source to the deterministic state derived from `seed`.
    pub fn reseed(&mut self, seed: i64) {
        debug!(seed, "reseeding bit source");
        self.source.reseed(seed);
    }

    /// Returns the next raw word as a full-range `u64`.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.source.next_word()
    }

    /// Returns the high half of the next raw word as a full-range `u32`.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.source.next_word() >> 32) as u32
    }

    /// Returns a non-negative `i64`: the next raw word with the top bit
    /// cleared.
    #[inline]
    pub fn next_i64(&mut self) -> i64 {
        (self.source.next_word() & (u64::MAX >> 1)) as i64
    }

    /// Returns a non-negative 31-bit `i32`.
    #[inline]
    pub fn next_i32(&mut self) -> i32 {
        (self.next_u32() & (u32::MAX >> 1)) as i32
    }

    /// Returns a uniform `i64` in `[0, n)`.
    ///
    /// # Errors
    ///
    /// [`RandError::InvalidBound`] when `n <= 0`; no word is consumed.
    ///
    /// Unlike [`Random::modulo_u64`] this is exactly uniform for every `n`:
    /// draws below the rejection threshold are discarded so each residue
    /// class is equally represented.
    pub fn bounded_i64(&mut self, n: i64) -> RandResult<i64> {
        if n <= 0 {
            return Err(RandError::InvalidBound {
                info: format!("bounded_i64 requires n > 0, got {n}"),
            });
        }
        let span = n as u64;
        let threshold = span.wrapping_neg() % span;
        loop {
            let word = self.next_u64();
            if word >= threshold {
                return Ok((word % span) as i64);
            }
        }
    }

    /// Returns a uniform `i32` in `[0, n)`.
    ///
    /// # Errors
    ///
    /// [`RandError::InvalidBound`] when `n <= 0`; no word is consumed.
    pub fn bounded_i32(&mut self, n: i32) -> RandResult<i32> {
        if n <= 0 {
            return Err(RandError::InvalidBound {
                info: format!("bounded_i32 requires n > 0, got {n}"),
            });
        }
        let span = n as u32;
        let threshold = span.wrapping_neg() % span;
        loop {
            let value = self.next_u32();
            if value >= threshold {
                return Ok((value % span) as i32);
            }
        }
    }

    /// Returns a `u64` in `[0, n)` via plain modulo reduction.
    ///
    /// Fast but biased: when `n` does not evenly divide 2^64, low residues
    /// are marginally more likely (at most one part in `2^64 / n`). Use
    /// [`Random::bounded_i64`] where exact uniformity matters.
    ///
    /// # Errors
    ///
    /// [`RandError::InvalidBound`] when `n == 0`; no word is consumed.
    pub fn modulo_u64(&mut self, n: u64) -> RandResult<u64> {
        if n == 0 {
            return Err(RandError::InvalidBound {
                info: "modulo_u64 requires n > 0, got 0".to_owned(),
            });
        }
        Ok(self.next_u64() % n)
    }

    /// Returns a `u32` in `[0, n)` via plain modulo reduction.
    ///
    /// Same bias trade-off as [`Random::modulo_u64`].
    ///
    /// # Errors
    ///
    /// [`RandError::InvalidBound`] when `n == 0`; no word is consumed.
    pub fn modulo_u32(&mut self, n: u32) -> RandResult<u32> {
        if n == 0 {
            return Err(RandError::InvalidBound {
                info: "modulo_u32 requires n > 0, got 0".to_owned(),
            });
        }
        Ok(self.next_u32() % n)
    }

    /// Returns an `f64` in `[0.0, 1.0)`.
    ///
    /// Built from the word's top 53 bits (the full `f64` mantissa) scaled by
    /// 2^-53, so the largest possible result is `(2^53 - 1) / 2^53`, never
    /// exactly 1.0.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns an `f32` in `[0.0, 1.0)`, from 24 mantissa bits scaled by
    /// 2^-24. Never exactly 1.0.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns `n * next_f64()`: a value in `[0.0, n)` for positive `n`.
    #[inline]
    pub fn scaled_f64(&mut self, n: f64) -> f64 {
        n * self.next_f64()
    }

    /// Returns `n * next_f32()`: a value in `[0.0, n)` for positive `n`.
    #[inline]
    pub fn scaled_f32(&mut self, n: f32) -> f32 {
        n * self.next_f32()
    }

    /// Returns a uniformly random permutation of `[0, n)`.
    ///
    /// Every one of the `n!` orderings is equally likely. `n == 0` yields an
    /// empty vector.
    #[must_use]
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..n).collect();
        self.shuffle_slice(&mut perm);
        perm
    }

    /// Runs a backward Fisher–Yates shuffle through a swap callback.
    ///
    /// Iterates `i` from `n - 1` down to 1 and calls `swap(i, j)` with `j`
    /// drawn uniformly from `[0, i]`. The callback owns the storage; this
    /// method only chooses the indices.
    pub fn shuffle<F>(&mut self, n: usize, mut swap: F)
    where
        F: FnMut(usize, usize),
    {
        for i in (1..n).rev() {
            let j = self.index_below(i + 1);
            swap(i, j);
        }
    }

    /// Shuffles a slice in place with the same Fisher–Yates walk as
    /// [`Random::shuffle`].
    pub fn shuffle_slice<T>(&mut self, values: &mut [T]) {
        for i in (1..values.len()).rev() {
            let j = self.index_below(i + 1);
            values.swap(i, j);
        }
    }

    /// Fills every byte of `dest` with random bits and returns `dest.len()`.
    ///
    /// Whole words are copied eight bytes at a time; a final partial chunk
    /// consumes one extra word and discards its unused bytes. Always
    /// succeeds; an empty buffer consumes nothing.
    pub fn fill_bytes(&mut self, dest: &mut [u8]) -> usize {
        let len = dest.len();
        let mut chunks = dest.chunks_exact_mut(8);
        for chunk in chunks.by_ref() {
            chunk.copy_from_slice(&self.next_u64().to_le_bytes());
        }
        let remainder = chunks.into_remainder();
        if !remainder.is_empty() {
            let word = self.next_u64().to_le_bytes();
            if let Some(prefix) = word.get(..remainder.len()) {
                remainder.copy_from_slice(prefix);
            }
        }
        len
    }

    /// Uniform index in `[0, n)` for internal use. `n` must be at least 1,
    /// which every caller guarantees structurally (loop bounds start at 1).
    #[inline]
    pub(crate) fn index_below(&mut self, n: usize) -> usize {
        debug_assert!(n >= 1);
        let span = n as u64;
        let threshold = span.wrapping_neg() % span;
        loop {
            let word = self.next_u64();
            if word >= threshold {
                return (word % span) as usize;
            }
        }
    }
}
