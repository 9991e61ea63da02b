//! Weighted index sampling.
//!
//! One algorithm, generic over the weight's numeric type: sum the weights,
//! draw a single uniform value scaled to the total, then walk the sequence
//! subtracting until the draw lands inside an element's slice of the total.
//! The probability of picking index `i` is `w[i] / sum(w)`.
//!
//! Weight families differ only in validation and accumulator:
//!
//! - floating-point and signed weights must be strictly positive and
//!   accumulate in `f64`;
//! - unsigned weights may be zero (a zero-weight index is simply never
//!   picked) and accumulate in `u64`, where an all-zero sequence is the
//!   explicit [`ZeroTotalWeight`](crate::RandError::ZeroTotalWeight) error
//!   rather than a division by zero.
//!
//! The sampler is stateless: it borrows a [`Random`] for exactly one draw
//! and touches nothing else.

use tracing::warn;

use crate::error::RandError;
use crate::random::Random;
use crate::source::BitSource;
use crate::RandResult;

/// Numeric types usable as sampling weights.
///
/// The two associated accumulator views let one generic scan serve every
/// width; implementations route themselves to the floating or unsigned path
/// via [`Weight::UNSIGNED`]. Narrow types widen losslessly (`f32` → `f64`,
/// `u32` → `u64`); signed integers take the floating path after positivity
/// validation, mirroring their conversion semantics.
pub trait Weight: Copy {
    /// `true` when this family accumulates in the unsigned integer domain,
    /// where zero-valued weights are legal.
    const UNSIGNED: bool;

    /// The weight as the floating accumulator type.
    fn as_f64(self) -> f64;

    /// The weight as the unsigned accumulator type.
    fn as_u64(self) -> u64;

    /// `true` when the weight violates the positivity requirement of its
    /// family. Always `false` for unsigned types.
    fn is_non_positive(self) -> bool;
}

impl Weight for f64 {
    const UNSIGNED: bool = false;

    fn as_f64(self) -> f64 {
        self
    }

    fn as_u64(self) -> u64 {
        self as u64
    }

    fn is_non_positive(self) -> bool {
        // NaN fails this comparison too, which is exactly what we want.
        !(self > 0.0)
    }
}

impl Weight for f32 {
    const UNSIGNED: bool = false;

    fn as_f64(self) -> f64 {
        f64::from(self)
    }

    fn as_u64(self) -> u64 {
        self as u64
    }

    fn is_non_positive(self) -> bool {
        !(self > 0.0)
    }
}

impl Weight for i64 {
    const UNSIGNED: bool = false;

    fn as_f64(self) -> f64 {
        self as f64
    }

    fn as_u64(self) -> u64 {
        self as u64
    }

    fn is_non_positive(self) -> bool {
        self <= 0
    }
}

impl Weight for i32 {
    const UNSIGNED: bool = false;

    fn as_f64(self) -> f64 {
        f64::from(self)
    }

    fn as_u64(self) -> u64 {
        self as u64
    }

    fn is_non_positive(self) -> bool {
        self <= 0
    }
}

impl Weight for u64 {
    const UNSIGNED: bool = true;

    fn as_f64(self) -> f64 {
        self as f64
    }

    fn as_u64(self) -> u64 {
        self
    }

    fn is_non_positive(self) -> bool {
        false
    }
}

impl Weight for u32 {
    const UNSIGNED: bool = true;

    fn as_f64(self) -> f64 {
        f64::from(self)
    }

    fn as_u64(self) -> u64 {
        u64::from(self)
    }

    fn is_non_positive(self) -> bool {
        false
    }
}

impl<S: BitSource> Random<S> {
    /// Picks an index with probability proportional to its weight.
    ///
    /// # Errors
    ///
    /// - [`RandError::EmptyWeights`] for an empty slice.
    /// - [`RandError::NonPositiveWeight`] when a positivity-required weight
    ///   is ≤ 0 (or NaN).
    /// - [`RandError::ZeroTotalWeight`] when unsigned weights sum to zero.
    ///
    /// A single-element slice short-circuits to index 0 without consuming a
    /// word. Unsigned totals accumulate with wrapping arithmetic; keeping
    /// the true sum inside `u64` is the caller's contract.
    ///
    /// # Example
    ///
    /// ```rust
    /// use randkit::Random;
    ///
    /// let mut rng = Random::with_seed(7);
    /// let index = rng.weighted_index(&[2.0, 2.0, 2.0, 4.0]).unwrap();
    /// assert!(index < 4);
    /// ```
    pub fn weighted_index<W: Weight>(&mut self, weights: &[W]) -> RandResult<usize> {
        if weights.is_empty() {
            return Err(RandError::EmptyWeights);
        }
        if weights.len() == 1 {
            return Ok(0);
        }
        if W::UNSIGNED {
            self.weighted_unsigned(weights)
        } else {
            self.weighted_float(weights)
        }
    }

    /// Typed entry point for `f64` weights.
    pub fn weighted_f64(&mut self, weights: &[f64]) -> RandResult<usize> {
        self.weighted_index(weights)
    }

    /// Typed entry point for `f32` weights (widened to the `f64` path).
    pub fn weighted_f32(&mut self, weights: &[f32]) -> RandResult<usize> {
        self.weighted_index(weights)
    }

    /// Typed entry point for `u64` weights (zero weights allowed).
    pub fn weighted_u64(&mut self, weights: &[u64]) -> RandResult<usize> {
        self.weighted_index(weights)
    }

    /// Typed entry point for `u32` weights (widened to the `u64` path).
    pub fn weighted_u32(&mut self, weights: &[u32]) -> RandResult<usize> {
        self.weighted_index(weights)
    }

    /// Typed entry point for `i64` weights (validated, then the `f64` path).
    pub fn weighted_i64(&mut self, weights: &[i64]) -> RandResult<usize> {
        self.weighted_index(weights)
    }

    /// Typed entry point for `i32` weights (validated, then the `f64` path).
    pub fn weighted_i32(&mut self, weights: &[i32]) -> RandResult<usize> {
        self.weighted_index(weights)
    }

    /// Floating accumulator path: validate positivity, sum, scan.
    fn weighted_float<W: Weight>(&mut self, weights: &[W]) -> RandResult<usize> {
        let mut total = 0.0_f64;
        for (index, weight) in weights.iter().enumerate() {
            if weight.is_non_positive() {
                return Err(RandError::NonPositiveWeight { index });
            }
            total += weight.as_f64();
        }

        let mut target = self.scaled_f64(total);
        for (index, weight) in weights.iter().enumerate() {
            let weight = weight.as_f64();
            if target < weight {
                return Ok(index);
            }
            target -= weight;
        }

        // Unreachable for valid input; accumulated rounding in the scan can
        // leave a sliver of target mass past the last weight.
        warn!(
            total,
            "weighted scan exhausted by rounding; falling back to last index"
        );
        Ok(weights.len() - 1)
    }

    /// Unsigned accumulator path: sum (wrapping), reject a zero total, scan.
    fn weighted_unsigned<W: Weight>(&mut self, weights: &[W]) -> RandResult<usize> {
        let mut total = 0_u64;
        for weight in weights {
            total = total.wrapping_add(weight.as_u64());
        }
        if total == 0 {
            return Err(RandError::ZeroTotalWeight);
        }

        let mut target = self.next_u64() % total;
        for (index, weight) in weights.iter().enumerate() {
            let weight = weight.as_u64();
            if target < weight {
                return Ok(index);
            }
            target -= weight;
        }

        // Only reachable when a wrapped total undercounts the true sum.
        Ok(weights.len() - 1)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn empty_weights_are_rejected() {
        let mut rng = Random::with_seed(42);
        assert_eq!(rng.weighted_f64(&[]), Err(RandError::EmptyWeights));
        assert_eq!(rng.weighted_u64(&[]), Err(RandError::EmptyWeights));
        assert_eq!(rng.weighted_i32(&[]), Err(RandError::EmptyWeights));
    }

    #[test]
    fn single_weight_short_circuits_without_a_draw() {
        let mut sampled = Random::with_seed(11);
        let mut clean = Random::with_seed(11);
        assert_eq!(sampled.weighted_f64(&[3.5]).unwrap(), 0);
        assert_eq!(sampled.weighted_u64(&[0]).unwrap(), 0);
        assert_eq!(sampled.next_u64(), clean.next_u64());
    }

    #[test]
    fn non_positive_weights_name_the_index() {
        let mut rng = Random::with_seed(42);
        assert_eq!(
            rng.weighted_f64(&[1.0, 2.0, -3.0]),
            Err(RandError::NonPositiveWeight { index: 2 })
        );
        assert_eq!(
            rng.weighted_f64(&[0.0, 2.0]),
            Err(RandError::NonPositiveWeight { index: 0 })
        );
        assert_eq!(
            rng.weighted_i64(&[5, 0, 1]),
            Err(RandError::NonPositiveWeight { index: 1 })
        );
        assert_eq!(
            rng.weighted_i32(&[-1, 1]),
            Err(RandError::NonPositiveWeight { index: 0 })
        );
    }

    #[test]
    fn nan_weights_are_rejected() {
        let mut rng = Random::with_seed(42);
        assert_eq!(
            rng.weighted_f64(&[1.0, f64::NAN]),
            Err(RandError::NonPositiveWeight { index: 1 })
        );
    }

    #[test]
    fn validation_failures_consume_no_words() {
        let mut tainted = Random::with_seed(3);
        let mut clean = Random::with_seed(3);
        let _ = tainted.weighted_f64(&[1.0, -1.0]);
        let _ = tainted.weighted_u64(&[0, 0, 0]);
        let _ = tainted.weighted_f64(&[]);
        assert_eq!(tainted.next_u64(), clean.next_u64());
    }

    #[test]
    fn all_zero_unsigned_weights_are_an_explicit_error() {
        let mut rng = Random::with_seed(42);
        assert_eq!(
            rng.weighted_u64(&[0, 0, 0]),
            Err(RandError::ZeroTotalWeight)
        );
        assert_eq!(rng.weighted_u32(&[0, 0]), Err(RandError::ZeroTotalWeight));
    }

    #[test]
    fn zero_valued_unsigned_weights_are_never_picked() {
        let mut rng = Random::with_seed(42);
        for _ in 0..2_000 {
            let index = rng.weighted_u64(&[0, 7, 0, 3]).unwrap();
            assert!(index == 1 || index == 3, "picked zero-weight index {index}");
        }
    }

    #[test]
    fn indices_stay_in_range_for_every_family() {
        let mut rng = Random::with_seed(42);
        for _ in 0..1_000 {
            assert!(rng.weighted_f64(&[1.0, 2.0, 3.0]).unwrap() < 3);
            assert!(rng.weighted_f32(&[1.0, 2.0, 3.0]).unwrap() < 3);
            assert!(rng.weighted_u64(&[1, 2, 3]).unwrap() < 3);
            assert!(rng.weighted_u32(&[1, 2, 3]).unwrap() < 3);
            assert!(rng.weighted_i64(&[1, 2, 3]).unwrap() < 3);
            assert!(rng.weighted_i32(&[1, 2, 3]).unwrap() < 3);
        }
    }

    #[test]
    fn heavier_weights_win_more_often() {
        let mut rng = Random::with_seed(42);
        let mut counts = [0u32; 3];
        for _ in 0..30_000 {
            counts[rng.weighted_f64(&[1.0, 1.0, 8.0]).unwrap()] += 1;
        }
        // Index 2 carries 80% of the mass; anything close is fine here, the
        // tight tolerance lives in the integration suite.
        assert!(counts[2] > counts[0] * 4);
        assert!(counts[2] > counts[1] * 4);
    }

    #[test]
    fn integer_and_float_weights_agree_on_the_same_stream() {
        // i64 weights ride the f64 path, so identical weights over the same
        // seed must pick identical indices.
        let mut float_rng = Random::with_seed(99);
        let mut int_rng = Random::with_seed(99);
        for _ in 0..1_000 {
            assert_eq!(
                float_rng.weighted_f64(&[2.0, 5.0, 3.0]).unwrap(),
                int_rng.weighted_i64(&[2, 5, 3]).unwrap()
            );
        }
    }
}
