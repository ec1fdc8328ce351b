//! Completion percentage value object, rounded to one decimal place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A completion percentage on the 0-100 scale, carried to one decimal.
///
/// Values above 100 are possible for numeric trackers whose recorded
/// achievements exceed the budget; classification treats those as complete.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(f64);

impl Percent {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100.0);

    /// Creates a percentage from a raw value, rounding to one decimal.
    pub fn new(value: f64) -> Self {
        Self((value * 10.0).round() / 10.0)
    }

    /// Percentage of `done` out of `total`, or zero when `total` is zero.
    pub fn from_counts(done: usize, total: usize) -> Self {
        if total == 0 {
            Self::ZERO
        } else {
            Self::new(done as f64 / total as f64 * 100.0)
        }
    }

    /// Percentage of `achieved` out of `budget`, or zero when `budget` is zero.
    pub fn from_amounts(achieved: u64, budget: u64) -> Self {
        if budget == 0 {
            Self::ZERO
        } else {
            Self::new(achieved as f64 / budget as f64 * 100.0)
        }
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns true when the percentage is exactly 100.
    pub fn is_exactly_full(&self) -> bool {
        self.0 == 100.0
    }

    /// Returns true when the percentage is 100 or more.
    pub fn is_at_least_full(&self) -> bool {
        self.0 >= 100.0
    }

    /// Returns true when the percentage is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}
