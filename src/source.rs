//! The exchangeable bit-generator contract.
//!
//! Everything in this crate derives its randomness from a [`BitSource`]: an
//! object that can be reset to a deterministic state from a 64-bit seed and
//! that produces raw, uniformly distributed 64-bit words on demand. The
//! derivation layers are agnostic to the source's internal state size and
//! period; swapping the algorithm never changes the meaning of a derived
//! operation, only the underlying stream.
//!
//! Two implementations ship with the crate:
//!
//! - [`Pcg32`](crate::Pcg32): the default general-purpose generator
//! - [`Mt64`](crate::Mt64): a Mersenne-Twister-compatible generator
//!
//! # Determinism
//!
//! A `BitSource` must be a pure state machine: reseeding with the same value
//! and drawing the same number of words yields the same words, on every
//! platform, every run. Non-deterministic construction is available through
//! the sources' `from_entropy` constructors, and only there.

use std::hash::{Hash, Hasher};

use web_time::Instant;

/// A source of raw, uniformly distributed 64-bit words.
///
/// This is a capability interface, not a base class: implementations are
/// selected at construction time and composed into [`Random`] or
/// [`SyncRandom`] by value.
///
/// # Contract
///
/// - `reseed` followed by a fixed sequence of `next_word` calls must produce
///   the same words every time, for every conforming implementation.
/// - Implementations carry no internal synchronization. A source (or any
///   [`Random`] owning one) must not be touched from two threads at once
///   without external locking; [`SyncRandom`] exists to provide exactly that.
///
/// [`Random`]: crate::Random
/// [`SyncRandom`]: crate::SyncRandom
pub trait BitSource {
    /// Resets the generator to the deterministic state derived from `seed`.
    fn reseed(&mut self, seed: i64);

    /// Advances the generator and returns the next raw 64-bit word.
    fn next_word(&mut self) -> u64;
}

/// FNV-1a 64-bit offset basis constant.
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime constant.
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Minimal FNV-1a hasher used to turn thread identity into seed material.
///
/// `DefaultHasher` randomizes its own seed per process, which would stack a
/// second, invisible entropy source on top of the timing entropy below. A
/// fixed algorithm keeps `from_entropy` explainable: all non-determinism
/// comes from timing and thread identity, nothing else.
struct Fnv1a {
    state: u64,
}

impl Fnv1a {
    const fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1a {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u64::from(byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }
}

/// Derives a seed from high-precision timing and thread identity.
///
/// Intentionally non-deterministic; used only by the `from_entropy`
/// constructors. NOT cryptographically secure; sufficient for picking an
/// arbitrary stream, nothing more. Reproducible workloads must seed
/// explicitly instead.
pub(crate) fn timing_entropy_seed() -> u64 {
    let now = Instant::now();

    let thread_hash = {
        let mut hasher = Fnv1a::new();
        std::thread::current().id().hash(&mut hasher);
        hasher.finish()
    };

    // The hashing above takes a handful of nanoseconds, which is exactly the
    // timing jitter being harvested here.
    let timing_hash = {
        let mut hasher = Fnv1a::new();
        now.elapsed().as_nanos().hash(&mut hasher);
        hasher.finish()
    };

    thread_hash
        .wrapping_mul(timing_hash)
        .wrapping_add(0x9e3779b97f4a7c15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_is_stable_across_calls() {
        let mut a = Fnv1a::new();
        let mut b = Fnv1a::new();
        a.write(b"randkit");
        b.write(b"randkit");
        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn fnv1a_distinguishes_inputs() {
        let mut a = Fnv1a::new();
        let mut b = Fnv1a::new();
        a.write(b"stream-a");
        b.write(b"stream-b");
        assert_ne!(a.finish(), b.finish());
    }

    #[test]
    fn entropy_seed_does_not_panic() {
        let _seed = timing_entropy_seed();
    }
}
