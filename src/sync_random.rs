//! Thread-safe wrapper around the derivation core.
//!
//! [`SyncRandom`] owns a [`Random`] behind a single [`parking_lot::RwLock`]
//! and re-exposes every derived operation with the same semantics. The math
//! never changes, only the synchronization.
//!
//! # Locking discipline
//!
//! One lock, one acquisition per externally invoked call:
//!
//! - Every operation that advances generator state takes the **write** lock
//!   for its whole duration. Since each draw mutates the bit source, that is
//!   every draw; Rust's `&mut` rules turn the strict single-writer variant
//!   into the only expressible safe one.
//! - The **read** path serves side-effect-free queries: [`SyncRandom::snapshot`]
//!   clones the source state without advancing it, so concurrent snapshots
//!   may proceed in parallel with each other.
//! - Composite operations (batch fills, slice shuffles, permutations) lock
//!   once at the outer call and drive the core's own methods through the
//!   held guard. No method here ever calls another public method of `self`,
//!   which is what rules out self-deadlock by construction.
//!
//! Weighted sampling also goes through the write lock. Letting weighted
//! reads skip the lock would be a genuine data race, and safe Rust cannot
//! express one; see DESIGN.md for the trade-off record.
//!
//! # Example
//!
//! ```rust
//! use randkit::SyncRandom;
//! use std::sync::Arc;
//!
//! let rng = Arc::new(SyncRandom::with_seed(7));
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let rng = Arc::clone(&rng);
//!         std::thread::spawn(move || rng.range_i64(0, 100))
//!     })
//!     .collect();
//! for handle in handles {
//!     let value = handle.join().unwrap();
//!     assert!((0..=100).contains(&value));
//! }
//! ```

use parking_lot::RwLock;

use crate::pcg::Pcg32;
use crate::random::Random;
use crate::source::BitSource;
use crate::weighted::Weight;
use crate::RandResult;

/// A [`Random`] safe for concurrent use from multiple threads.
///
/// All methods take `&self`; share the wrapper via `Arc`. Failure semantics
/// are identical to the unwrapped core.
#[derive(Debug)]
pub struct SyncRandom<S: BitSource = Pcg32> {
    inner: RwLock<Random<S>>,
}

impl SyncRandom<Pcg32> {
    /// Creates a wrapper over the default source, seeded deterministically.
    #[must_use]
    pub fn with_seed(seed: i64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed as u64))
    }

    /// Creates a wrapper over the default source with a timing-derived seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(Pcg32::from_entropy())
    }
}

impl<S: BitSource> SyncRandom<S> {
    /// Wraps a bit source behind the lock.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            inner: RwLock::new(Random::new(source)),
        }
    }

    /// Consumes the wrapper and returns the inner core, discarding the lock.
    #[must_use]
    pub fn into_inner(self) -> Random<S> {
        self.inner.into_inner()
    }

    /// Clones the current source state without advancing it (read lock).
    ///
    /// The snapshot resumes the identical stream when wrapped in a new
    /// [`Random`] or [`SyncRandom`].
    #[must_use]
    pub fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.inner.read().source().clone()
    }

    /// Locked variant of [`Random::reseed`].
    pub fn reseed(&self, seed: i64) {
        self.inner.write().reseed(seed);
    }

    /// Locked variant of [`Random::next_u64`].
    pub fn next_u64(&self) -> u64 {
        self.inner.write().next_u64()
    }

    /// Locked variant of [`Random::next_u32`].
    pub fn next_u32(&self) -> u32 {
        self.inner.write().next_u32()
    }

    /// Locked variant of [`Random::next_i64`].
    pub fn next_i64(&self) -> i64 {
        self.inner.write().next_i64()
    }

    /// Locked variant of [`Random::next_i32`].
    pub fn next_i32(&self) -> i32 {
        self.inner.write().next_i32()
    }

    /// Locked variant of [`Random::bounded_i64`].
    pub fn bounded_i64(&self, n: i64) -> RandResult<i64> {
        self.inner.write().bounded_i64(n)
    }

    /// Locked variant of [`Random::bounded_i32`].
    pub fn bounded_i32(&self, n: i32) -> RandResult<i32> {
        self.inner.write().bounded_i32(n)
    }

    /// Locked variant of [`Random::modulo_u64`].
    pub fn modulo_u64(&self, n: u64) -> RandResult<u64> {
        self.inner.write().modulo_u64(n)
    }

    /// Locked variant of [`Random::modulo_u32`].
    pub fn modulo_u32(&self, n: u32) -> RandResult<u32> {
        self.inner.write().modulo_u32(n)
    }

    /// Locked variant of [`Random::next_f64`].
    pub fn next_f64(&self) -> f64 {
        self.inner.write().next_f64()
    }

    /// Locked variant of [`Random::next_f32`].
    pub fn next_f32(&self) -> f32 {
        self.inner.write().next_f32()
    }

    /// Locked variant of [`Random::scaled_f64`].
    pub fn scaled_f64(&self, n: f64) -> f64 {
        self.inner.write().scaled_f64(n)
    }

    /// Locked variant of [`Random::scaled_f32`].
    pub fn scaled_f32(&self, n: f32) -> f32 {
        self.inner.write().scaled_f32(n)
    }

    /// Locked variant of [`Random::permutation`]; the whole permutation is
    /// built under one acquisition.
    #[must_use]
    pub fn permutation(&self, n: usize) -> Vec<usize> {
        self.inner.write().permutation(n)
    }

    /// Locked variant of [`Random::shuffle`]. The callback runs with the
    /// lock held: keep it small and do not touch this wrapper from inside it.
    pub fn shuffle<F>(&self, n: usize, swap: F)
    where
        F: FnMut(usize, usize),
    {
        self.inner.write().shuffle(n, swap);
    }

    /// Locked variant of [`Random::shuffle_slice`].
    pub fn shuffle_slice<T>(&self, values: &mut [T]) {
        self.inner.write().shuffle_slice(values);
    }

    /// Locked variant of [`Random::fill_bytes`].
    pub fn fill_bytes(&self, dest: &mut [u8]) -> usize {
        self.inner.write().fill_bytes(dest)
    }

    /// Locked variant of [`Random::range_i64`].
    pub fn range_i64(&self, low: i64, high: i64) -> i64 {
        self.inner.write().range_i64(low, high)
    }

    /// Locked variant of [`Random::range_i32`].
    pub fn range_i32(&self, low: i32, high: i32) -> i32 {
        self.inner.write().range_i32(low, high)
    }

    /// Locked variant of [`Random::range_u64`].
    pub fn range_u64(&self, low: u64, high: u64) -> u64 {
        self.inner.write().range_u64(low, high)
    }

    /// Locked variant of [`Random::range_u32`].
    pub fn range_u32(&self, low: u32, high: u32) -> u32 {
        self.inner.write().range_u32(low, high)
    }

    /// Locked variant of [`Random::range_f64`].
    pub fn range_f64(&self, low: f64, high: f64) -> f64 {
        self.inner.write().range_f64(low, high)
    }

    /// Locked variant of [`Random::range_f32`].
    pub fn range_f32(&self, low: f32, high: f32) -> f32 {
        self.inner.write().range_f32(low, high)
    }

    /// Locked variant of [`Random::fill_i64`]; the whole batch runs under
    /// one acquisition.
    pub fn fill_i64(&self, values: &mut [i64], low: i64, high: i64) {
        self.inner.write().fill_i64(values, low, high);
    }

    /// Locked variant of [`Random::fill_i32`].
    pub fn fill_i32(&self, values: &mut [i32], low: i32, high: i32) {
        self.inner.write().fill_i32(values, low, high);
    }

    /// Locked variant of [`Random::fill_u64`].
    pub fn fill_u64(&self, values: &mut [u64], low: u64, high: u64) {
        self.inner.write().fill_u64(values, low, high);
    }

    /// Locked variant of [`Random::fill_u32`].
    pub fn fill_u32(&self, values: &mut [u32], low: u32, high: u32) {
        self.inner.write().fill_u32(values, low, high);
    }

    /// Locked variant of [`Random::fill_f64`].
    pub fn fill_f64(&self, values: &mut [f64], low: f64, high: f64) {
        self.inner.write().fill_f64(values, low, high);
    }

    /// Locked variant of [`Random::fill_f32`].
    pub fn fill_f32(&self, values: &mut [f32], low: f32, high: f32) {
        self.inner.write().fill_f32(values, low, high);
    }

    /// Locked variant of [`Random::flip_coin`].
    pub fn flip_coin(&self, p: f64) -> bool {
        self.inner.write().flip_coin(p)
    }

    /// Locked variant of [`Random::weighted_index`].
    pub fn weighted_index<W: Weight>(&self, weights: &[W]) -> RandResult<usize> {
        self.inner.write().weighted_index(weights)
    }

    /// Locked variant of [`Random::weighted_f64`].
    pub fn weighted_f64(&self, weights: &[f64]) -> RandResult<usize> {
        self.inner.write().weighted_f64(weights)
    }

    /// Locked variant of [`Random::weighted_f32`].
    pub fn weighted_f32(&self, weights: &[f32]) -> RandResult<usize> {
        self.inner.write().weighted_f32(weights)
    }

    /// Locked variant of [`Random::weighted_u64`].
    pub fn weighted_u64(&self, weights: &[u64]) -> RandResult<usize> {
        self.inner.write().weighted_u64(weights)
    }

    /// Locked variant of [`Random::weighted_u32`].
    pub fn weighted_u32(&self, weights: &[u32]) -> RandResult<usize> {
        self.inner.write().weighted_u32(weights)
    }

    /// Locked variant of [`Random::weighted_i64`].
    pub fn weighted_i64(&self, weights: &[i64]) -> RandResult<usize> {
        self.inner.write().weighted_i64(weights)
    }

    /// Locked variant of [`Random::weighted_i32`].
    pub fn weighted_i32(&self, weights: &[i32]) -> RandResult<usize> {
        self.inner.write().weighted_i32(weights)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::RandError;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn wrapper_matches_the_unwrapped_core() {
        let locked = SyncRandom::with_seed(42);
        let mut bare = Random::with_seed(42);
        for _ in 0..500 {
            assert_eq!(locked.next_u64(), bare.next_u64());
        }
        for _ in 0..500 {
            assert_eq!(
                locked.range_i64(-10, 10),
                bare.range_i64(-10, 10),
                "wrapper must change synchronization, never the math"
            );
        }
    }

    #[test]
    fn errors_pass_through_unchanged() {
        let locked = SyncRandom::with_seed(42);
        assert!(matches!(
            locked.bounded_i64(-1),
            Err(RandError::InvalidBound { .. })
        ));
        assert_eq!(locked.weighted_f64(&[]), Err(RandError::EmptyWeights));
    }

    #[test]
    fn snapshot_resumes_the_identical_stream() {
        let locked = SyncRandom::with_seed(7);
        for _ in 0..123 {
            let _ = locked.next_u64();
        }
        let mut resumed = Random::new(locked.snapshot());
        for _ in 0..200 {
            assert_eq!(locked.next_u64(), resumed.next_u64());
        }
    }

    #[test]
    fn batch_fill_locks_once_and_fills_everything() {
        let locked = SyncRandom::with_seed(3);
        let mut values = [0i64; 64];
        locked.fill_i64(&mut values, 5, 9);
        for value in values {
            assert!((5..=9).contains(&value));
        }
        locked.fill_i64(&mut [], 5, 9);
    }

    #[test]
    fn concurrent_draws_never_panic_or_escape_bounds() {
        let rng = Arc::new(SyncRandom::with_seed(1234));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let rng = Arc::clone(&rng);
            handles.push(thread::spawn(move || {
                for _ in 0..1_000 {
                    let value = rng.range_i64(-100, 100);
                    assert!((-100..=100).contains(&value));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn into_inner_releases_the_core() {
        let locked = SyncRandom::with_seed(21);
        let _ = locked.next_u64();
        let mut core = locked.into_inner();
        let _ = core.next_u64();
    }
}
