//! Closed integer intervals.
//!
//! An [Interval] is a closed range `[low, high]` of `i64` values. The
//! bounds are checked when the interval is built, so any `Interval`
//! value in circulation satisfies `low <= high` and covers at least one
//! integer.
//!
//! # Examples
//!
//! ```rust
//! use coalesce_types::Interval;
//!
//! let a = Interval::new(10, 14)?;
//! let b = Interval::new(12, 18)?;
//! assert!(a.overlaps(&b));
//! assert_eq!(a.envelope(&b), Interval::new(10, 18)?);
//! assert_eq!(a.len(), 5);
//! # Ok::<(), coalesce_types::IntervalError>(())
//! ```

use std::fmt;

/// Errors returned when building intervals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntervalError {
    #[error("malformed interval {low}-{high}: lower bound is greater than upper bound")]
    Malformed { low: i64, high: i64 },
}

/// A closed range of integers: `[low, high]`.
///
/// Both bounds are included. Ordering is by `low`, then by `high`.
#[derive(
    Clone, Copy, Eq, PartialEq, Hash, Debug, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "Bounds")]
pub struct Interval {
    low: i64,
    high: i64,
}

impl Interval {
    /// Build the interval `[low, high]`.
    ///
    /// Fails with [IntervalError::Malformed] if `low > high`. The
    /// bounds are never swapped.
    pub fn new(low: i64, high: i64) -> Result<Self, IntervalError> {
        if low > high {
            return Err(IntervalError::Malformed { low, high });
        }

        Ok(Interval { low, high })
    }

    /// The interval containing only `point`.
    pub fn single(point: i64) -> Self {
        Interval {
            low: point,
            high: point,
        }
    }

    /// Build an interval from bounds already known to be ordered.
    pub(crate) fn new_unchecked(low: i64, high: i64) -> Self {
        debug_assert!(low <= high, "unordered bounds {low}-{high}");

        Interval { low, high }
    }

    /// The lower bound (inclusive).
    pub fn low(&self) -> i64 {
        self.low
    }

    /// The upper bound (inclusive).
    pub fn high(&self) -> i64 {
        self.high
    }

    /// Number of integers in the interval, `high - low + 1`.
    ///
    /// Never zero. Computed in `u128`, as `[i64::MIN, i64::MAX]` holds
    /// 2^64 integers.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u128 {
        (i128::from(self.high) - i128::from(self.low) + 1) as u128
    }

    /// Returns true if both intervals share at least one integer.
    ///
    /// `[a, b]` and `[c, d]` overlap iff `a <= d && c <= b`. Intervals
    /// that only touch, such as `[1, 5]` and `[6, 10]`, don't overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.low <= other.high && other.low <= self.high
    }

    /// Check whether `point` is within the interval.
    pub fn contains(&self, point: i64) -> bool {
        self.low <= point && point <= self.high
    }

    /// Returns true if every integer of `other` is also in `self`.
    pub fn contains_interval(&self, other: &Interval) -> bool {
        self.low <= other.low && other.high <= self.high
    }

    /// The smallest interval covering both `self` and `other`.
    pub fn envelope(&self, other: &Interval) -> Interval {
        Interval {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
        }
    }
}

impl fmt::Display for Interval {
    /// Formats the interval as `[low, high]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

impl TryFrom<(i64, i64)> for Interval {
    type Error = IntervalError;

    fn try_from((low, high): (i64, i64)) -> Result<Self, Self::Error> {
        Interval::new(low, high)
    }
}

impl From<Interval> for std::ops::RangeInclusive<i64> {
    fn from(value: Interval) -> Self {
        value.low..=value.high
    }
}

/// Unchecked bounds, as read by serde before validation.
#[derive(serde::Deserialize)]
struct Bounds {
    low: i64,
    high: i64,
}

impl TryFrom<Bounds> for Interval {
    type Error = IntervalError;

    fn try_from(value: Bounds) -> Result<Self, Self::Error> {
        Interval::new(value.low, value.high)
    }
}
