//! Elapsed time, independent of any calendar.

use std::ops::{Add, Sub, Mul, Neg};


/// A **duration** is an amount of elapsed time, to the millisecond. It
/// knows nothing of days or months, only of seconds.
///
/// The milliseconds portion is always kept within `0 .. 1000`, so negative
/// durations carry their sign in the seconds: minus half a second is
/// stored as -1 seconds plus 500 milliseconds.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Copy)]
pub struct Duration {
    seconds: i64,
    milliseconds: i16,
}

impl Duration {

    /// No time at all.
    pub const fn zero() -> Self {
        Self { seconds: 0, milliseconds: 0 }
    }

    /// A whole number of seconds.
    pub const fn of(seconds: i64) -> Self {
        Self { seconds, milliseconds: 0 }
    }

    /// A number of seconds plus a number of milliseconds.
    ///
    /// Milliseconds outside `0 .. 1000` are carried over into the seconds.
    pub fn of_ms(seconds: i64, milliseconds: i16) -> Self {
        let carry = (milliseconds as i64).div_euclid(1000);
        Self {
            seconds: seconds + carry,
            milliseconds: (milliseconds as i64).rem_euclid(1000) as i16,
        }
    }

    /// Create a new duration that’s the given number of whole hours long.
    pub fn hours(hours: i64) -> Self {
        Self::of(hours * 60 * 60)
    }

    /// Create a new duration that’s the given number of 86,400-second days
    /// long. This is *not* a calendar day: use a `Calendar` for that.
    pub fn days(days: i64) -> Self {
        Self::of(days * 86400)
    }

    /// The whole seconds and the leftover milliseconds. The milliseconds
    /// are never the *total* length in milliseconds.
    pub fn lengths(self) -> (i64, i16) {
        let Self { seconds, milliseconds } = self;
        (seconds, milliseconds)
    }

    /// Returns the length of this duration regardless of its direction.
    pub fn abs(self) -> Self {
        if self.seconds < 0 { -self } else { self }
    }

    /// Whether this duration points backwards along the timeline.
    pub fn is_negative(self) -> bool {
        self.seconds < 0
    }
}

impl Add<Duration> for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let ms = self.milliseconds + rhs.milliseconds;
        if ms >= 1000 {
            Self::of_ms(self.seconds + rhs.seconds + 1, ms - 1000)
        }
        else {
            Self::of_ms(self.seconds + rhs.seconds, ms)
        }
    }
}

impl Sub<Duration> for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let ms = self.milliseconds - rhs.milliseconds;
        if ms < 0 {
            Self::of_ms(self.seconds - rhs.seconds - 1, ms + 1000)
        }
        else {
            Self::of_ms(self.seconds - rhs.seconds, ms)
        }
    }
}

impl Mul<i64> for Duration {
    type Output = Self;

    fn mul(self, amount: i64) -> Self {
        let ms = self.milliseconds as i64 * amount;
        Self {
            seconds: self.seconds * amount + ms.div_euclid(1000),
            milliseconds: ms.rem_euclid(1000) as i16,
        }
    }
}

impl Neg for Duration {
    type Output = Self;

    fn neg(self) -> Self {
        Self::zero() - self
    }
}
