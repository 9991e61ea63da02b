//! # randkit
//!
//! A deterministic pseudo-random utility layer over exchangeable 64-bit bit
//! sources.
//!
//! Everything derives from one abstraction: a [`BitSource`] that can be
//! reseeded from a 64-bit value and produces raw uniform 64-bit words. On
//! top of it, [`Random`] derives bounded integers (unbiased or fast-biased,
//! caller's choice), unit-interval floats, inclusive ranges, batch fills,
//! Fisher–Yates permutations and shuffles, byte fills, weighted index
//! selection. [`SyncRandom`] re-exposes the whole surface behind a
//! single lock for concurrent callers.
//!
//! Two sources ship with the crate: [`Pcg32`] (the default) and [`Mt64`]
//! (mt19937-64 compatible). Both are pure state machines: identical seeds
//! yield identical streams, on every platform, every run.
//!
//! ```rust
//! use randkit::{Mt64, Random};
//!
//! let mut rng = Random::with_seed(7);
//! let roll = rng.range_i32(1, 6);
//! assert!((1..=6).contains(&roll));
//!
//! let index = rng.weighted_f64(&[2.0, 2.0, 2.0, 4.0]).unwrap();
//! assert!(index < 4);
//!
//! // Same seed, same stream, whatever the source.
//! let mut a = Random::new(Mt64::seed_from_u64(99));
//! let mut b = Random::new(Mt64::seed_from_u64(99));
//! assert_eq!(a.next_u64(), b.next_u64());
//! ```
//!
//! Not cryptographically secure, by design: reproducibility is the feature.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub use error::RandError;
pub use mt64::{Mt64, MT_DEFAULT_SEED};
pub use pcg::Pcg32;
pub use random::Random;
pub use source::BitSource;
pub use sync_random::SyncRandom;
pub use weighted::Weight;

pub mod error;
pub mod mt64;
pub mod pcg;
pub mod prelude;
pub mod random;
mod range;
pub mod source;
pub mod sync_random;
pub mod weighted;

/// Shorthand for `Result<T, RandError>`, returned by every fallible
/// operation in this crate.
pub type RandResult<T> = Result<T, RandError>;
