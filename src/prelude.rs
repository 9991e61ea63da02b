//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use randkit::prelude::*;
//!
//! let mut rng = Random::with_seed(42);
//! let value = rng.range_i32(1, 6);
//! assert!((1..=6).contains(&value));
//! ```
//!
//! # What's Included
//!
//! - **Cores**: [`Random`], [`SyncRandom`]
//! - **Bit sources**: [`BitSource`], [`Pcg32`], [`Mt64`]
//! - **Weighted sampling**: [`Weight`]
//! - **Error handling**: [`RandError`], [`RandResult`]

// Derivation cores
pub use crate::random::Random;
pub use crate::sync_random::SyncRandom;

// Bit sources
pub use crate::mt64::Mt64;
pub use crate::pcg::Pcg32;
pub use crate::source::BitSource;

// Weighted sampling
pub use crate::weighted::Weight;

// Error handling
pub use crate::{RandError, RandResult};
