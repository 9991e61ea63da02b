//! Range-bounded generation, batch fills and the biased coin.
//!
//! Integer ranges are inclusive on both ends; reversed bounds are swapped,
//! never an error, so `range_i64(9, 3)` and `range_i64(3, 9)` are the same
//! call. Spans are computed in wrapping unsigned arithmetic, which makes the
//! widest widths safe: `high - low + 1` cannot overflow, and a span covering
//! the entire word space degenerates to the raw word itself.
//!
//! The integer mapping is one modulo reduction of a single raw word: the
//! same fast-but-slightly-biased trade-off as [`Random::modulo_u64`], and
//! documented as such. Floating ranges follow the half-open convention of
//! [`Random::next_f64`]: `low + (high - low) * next_float()`, upper bound
//! exclusive.
//!
//! Batch fills write every element of a caller-sized slice independently;
//! this layer never allocates or resizes caller storage. An empty slice is
//! a no-op.

use crate::random::Random;
use crate::source::BitSource;

impl<S: BitSource> Random<S> {
    /// Returns an `i64` in `[low, high]`. Reversed bounds are swapped.
    pub fn range_i64(&mut self, low: i64, high: i64) -> i64 {
        let (low, high) = if low > high { (high, low) } else { (low, high) };
        let span = (high as u64).wrapping_sub(low as u64).wrapping_add(1);
        if span == 0 {
            // [i64::MIN, i64::MAX]: every word is a valid draw.
            return self.next_u64() as i64;
        }
        // Offset stays within [0, span); the wrapping add is two's-complement
        // reinterpretation, not arithmetic overflow.
        low.wrapping_add((self.next_u64() % span) as i64)
    }

    /// Returns an `i32` in `[low, high]`. Reversed bounds are swapped.
    pub fn range_i32(&mut self, low: i32, high: i32) -> i32 {
        let (low, high) = if low > high { (high, low) } else { (low, high) };
        let span = (i64::from(high) - i64::from(low) + 1) as u64;
        low.wrapping_add((u64::from(self.next_u32()) % span) as i32)
    }

    /// Returns a `u64` in `[low, high]`. Reversed bounds are swapped.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        let (low, high) = if low > high { (high, low) } else { (low, high) };
        let span = high.wrapping_sub(low).wrapping_add(1);
        if span == 0 {
            return self.next_u64();
        }
        low + self.next_u64() % span
    }

    /// Returns a `u32` in `[low, high]`. Reversed bounds are swapped.
    pub fn range_u32(&mut self, low: u32, high: u32) -> u32 {
        let (low, high) = if low > high { (high, low) } else { (low, high) };
        let span = u64::from(high) - u64::from(low) + 1;
        low + (u64::from(self.next_u32()) % span) as u32
    }

    /// Returns an `f64` in `[low, high)`. Reversed bounds are swapped.
    pub fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        let (low, high) = if low > high { (high, low) } else { (low, high) };
        low + (high - low) * self.next_f64()
    }

    /// Returns an `f32` in `[low, high)`. Reversed bounds are swapped.
    pub fn range_f32(&mut self, low: f32, high: f32) -> f32 {
        let (low, high) = if low > high { (high, low) } else { (low, high) };
        low + (high - low) * self.next_f32()
    }

    /// Fills `values` with independent draws from `[low, high]`.
    pub fn fill_i64(&mut self, values: &mut [i64], low: i64, high: i64) {
        for value in values.iter_mut() {
            *value = self.range_i64(low, high);
        }
    }

    /// Fills `values` with independent draws from `[low, high]`.
    pub fn fill_i32(&mut self, values: &mut [i32], low: i32, high: i32) {
        for value in values.iter_mut() {
            *value = self.range_i32(low, high);
        }
    }

    /// Fills `values` with independent draws from `[low, high]`.
    pub fn fill_u64(&mut self, values: &mut [u64], low: u64, high: u64) {
        for value in values.iter_mut() {
            *value = self.range_u64(low, high);
        }
    }

    /// Fills `values` with independent draws from `[low, high]`.
    pub fn fill_u32(&mut self, values: &mut [u32], low: u32, high: u32) {
        for value in values.iter_mut() {
            *value = self.range_u32(low, high);
        }
    }

    /// Fills `values` with independent draws from `[low, high)`.
    pub fn fill_f64(&mut self, values: &mut [f64], low: f64, high: f64) {
        for value in values.iter_mut() {
            *value = self.range_f64(low, high);
        }
    }

    /// Fills `values` with independent draws from `[low, high)`.
    pub fn fill_f32(&mut self, values: &mut [f32], low: f32, high: f32) {
        for value in values.iter_mut() {
            *value = self.range_f32(low, high);
        }
    }

    /// Returns `true` with probability `p`.
    ///
    /// The endpoints are short-circuited before any word is consumed:
    /// `p == 1.0` is always `true` and `p == 0.0` always `false`, so the
    /// boundary cases are immune to floating-point comparison edge effects.
    pub fn flip_coin(&mut self, p: f64) -> bool {
        if p == 1.0 {
            return true;
        }
        if p == 0.0 {
            return false;
        }
        self.next_f64() <= p
    }
}
