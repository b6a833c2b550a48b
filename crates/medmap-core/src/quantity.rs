//! # Quantity Module
//!
//! Provides the `Quantity` type for stock counts that can never go negative.
//!
//! ## Why a Clamped Count?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE NEGATIVE STOCK PROBLEM                                             │
//! │                                                                         │
//! │  Operator clicks "−" on a blood type with 0 units:                      │
//! │    units = 0 + (−1) = −1   ❌ a shelf cannot hold −1 bags               │
//! │                                                                         │
//! │  OUR SOLUTION: clamp every adjustment                                   │
//! │    units = max(0, 0 + (−1)) = 0                                         │
//! │    and, where a line has a total: min(result, total)                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use medmap_core::quantity::Quantity;
//!
//! let units = Quantity::new(3);
//! assert_eq!(units.adjust(-5).get(), 0);
//! assert_eq!(units.adjust(4).get(), 7);
//! assert_eq!(units.adjust_within(20, Quantity::new(10)).get(), 10);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::status::StockLevel;

// =============================================================================
// Quantity Type
// =============================================================================

/// A non-negative whole count of units (bags, cylinders, devices).
///
/// Adjustments saturate at zero and at `u32::MAX`; there is no way to
/// build a negative quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quantity(u32);

impl Quantity {
    #[inline]
    pub const fn new(units: u32) -> Self {
        Quantity(units)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Applies a signed delta, clamping the result to `[0, u32::MAX]`.
    ///
    /// The result is exactly `max(0, self + delta)` for every delta that
    /// keeps the sum in range.
    pub fn adjust(self, delta: i64) -> Self {
        let next = (self.0 as i64).saturating_add(delta);
        Quantity(next.clamp(0, u32::MAX as i64) as u32)
    }

    /// Applies a signed delta, clamping the result to `[0, cap]`.
    pub fn adjust_within(self, delta: i64, cap: Quantity) -> Self {
        self.adjust(delta).min(cap)
    }

    /// Stock level of this quantity against a reorder threshold.
    #[inline]
    pub const fn stock_level(&self, threshold: Quantity) -> StockLevel {
        StockLevel::derive(self.0, threshold.0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::zero()
    }
}

impl From<u32> for Quantity {
    fn from(units: u32) -> Self {
        Quantity(units)
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0.saturating_add(other.0))
    }
}

/// Saturating: `2 - 5 == 0`.
impl Sub for Quantity {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Quantity(self.0.saturating_sub(other.0))
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), |acc, q| acc + q)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_matches_clamped_sum() {
        for prev in [0u32, 1, 5, 18, 67] {
            for delta in [-100i64, -18, -1, 0, 1, 15] {
                let expected = (prev as i64 + delta).max(0) as u32;
                assert_eq!(Quantity::new(prev).adjust(delta).get(), expected);
            }
        }
    }

    #[test]
    fn test_adjust_saturates_high() {
        let q = Quantity::new(u32::MAX - 1);
        assert_eq!(q.adjust(10).get(), u32::MAX);
        assert_eq!(q.adjust(i64::MAX).get(), u32::MAX);
        assert_eq!(Quantity::new(3).adjust(i64::MIN).get(), 0);
    }

    #[test]
    fn test_adjust_within_cap() {
        let cap = Quantity::new(15);
        assert_eq!(Quantity::new(8).adjust_within(3, cap).get(), 11);
        assert_eq!(Quantity::new(8).adjust_within(30, cap).get(), 15);
        assert_eq!(Quantity::new(8).adjust_within(-30, cap).get(), 0);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let a = Quantity::new(2);
        let b = Quantity::new(5);
        assert_eq!((a + b).get(), 7);
        assert_eq!((a - b).get(), 0);
        assert_eq!((b - a).get(), 3);
    }

    #[test]
    fn test_sum() {
        let total: Quantity = [45u32, 12, 38].into_iter().map(Quantity::new).sum();
        assert_eq!(total.get(), 95);
    }

    #[test]
    fn test_stock_level() {
        assert_eq!(Quantity::new(18).stock_level(Quantity::new(20)), StockLevel::Low);
        assert_eq!(Quantity::zero().stock_level(Quantity::new(20)), StockLevel::Out);
    }

    #[test]
    fn test_display() {
        assert_eq!(Quantity::new(24).to_string(), "24");
    }
}
