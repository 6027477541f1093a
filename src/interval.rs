//! Closed intervals of ordered values.

use std::cmp::{max, min};
use std::fmt;

use crate::instant::Instant;


/// A **closed interval** contains every value from `low` to `high`,
/// including both ends.
///
/// Nothing checks that `low` is not after `high`. Clamping into such an
/// interval gives `low` for everything past `low`, and `high` otherwise;
/// it doesn’t mean anything useful.
#[derive(PartialEq, Eq, Hash, Clone, Copy)]
pub struct ClosedInterval<T> {
    pub low: T,
    pub high: T,
}

impl<T: Ord + Copy> ClosedInterval<T> {

    /// Creates a new interval between the two given values.
    pub fn new(low: T, high: T) -> Self {
        Self { low, high }
    }

    /// Returns whether the given value lies within this interval.
    pub fn contains(&self, value: T) -> bool {
        self.low <= value && value <= self.high
    }

    /// Returns the value in this interval that is closest to the given
    /// one: the value itself if it’s within the interval, or the nearest
    /// end if not.
    pub fn clamp(&self, value: T) -> T {
        max(self.low, min(value, self.high))
    }
}

impl ClosedInterval<Instant> {

    /// The interval containing every instant there is.
    pub fn unbounded() -> Self {
        Self::new(Instant::MIN, Instant::MAX)
    }
}

impl<T: fmt::Debug> fmt::Debug for ClosedInterval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?} ..= {:?}]", self.low, self.high)
    }
}
