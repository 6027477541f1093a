//! Points on the timeline.

use std::fmt;
use std::ops::{Add, Sub};

use crate::duration::Duration;
use crate::system::sys_time;


/// An **instant** is a moment on the timeline, counted in seconds and
/// milliseconds from the Unix epoch. It has no time zone: the same instant
/// is a different wall-clock time in different places.
///
/// Internally, this is represented by a 64-bit integer of seconds, and a
/// 16-bit integer of milliseconds that is always within `0 .. 1000`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Instant {
    seconds: i64,
    milliseconds: i16,
}

impl Instant {

    /// The earliest instant that can be represented.
    pub const MIN: Self = Self { seconds: i64::MIN, milliseconds: 0 };

    /// The latest instant that can be represented.
    pub const MAX: Self = Self { seconds: i64::MAX, milliseconds: 999 };

    /// The instant the given number of whole seconds after the epoch.
    pub fn at(seconds: i64) -> Self {
        Self::at_ms(seconds, 0)
    }

    /// The instant the given number of seconds and milliseconds after
    /// the epoch.
    ///
    /// Milliseconds outside `0 .. 1000` are carried over into the seconds.
    pub fn at_ms(seconds: i64, milliseconds: i16) -> Self {
        let ms = milliseconds as i64;
        Self {
            seconds: seconds + ms.div_euclid(1000),
            milliseconds: ms.rem_euclid(1000) as i16,
        }
    }

    /// What the computer’s clock says it is now.
    pub fn now() -> Self {
        let (seconds, milliseconds) = sys_time();
        Self::at_ms(seconds, milliseconds)
    }

    /// Midnight UTC on the 1st of January, 1970.
    pub fn at_epoch() -> Self {
        Self::at(0)
    }

    /// Whole seconds since the epoch.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// The millisecond of the second, from 0 to 999.
    pub fn milliseconds(&self) -> i16 {
        self.milliseconds
    }

    /// Moves this instant along the timeline by the given duration,
    /// returning `None` if the result cannot be represented.
    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        let (seconds, milliseconds) = duration.lengths();
        let mut ms = self.milliseconds + milliseconds;
        let mut carry = 0;
        if ms >= 1000 {
            ms -= 1000;
            carry = 1;
        }

        let seconds = self.seconds.checked_add(seconds)?.checked_add(carry)?;
        Some(Self { seconds, milliseconds: ms })
    }

    /// Moves this instant backwards along the timeline by the given
    /// duration, returning `None` if the result cannot be represented.
    pub fn checked_sub(self, duration: Duration) -> Option<Self> {
        let (seconds, milliseconds) = duration.lengths();
        let mut ms = self.milliseconds - milliseconds;
        let mut borrow = 0;
        if ms < 0 {
            ms += 1000;
            borrow = 1;
        }

        let seconds = self.seconds.checked_sub(seconds)?.checked_sub(borrow)?;
        Some(Self { seconds, milliseconds: ms })
    }

    /// Returns the signed length of time from `earlier` to this instant,
    /// or `None` if it does not fit in a `Duration`.
    pub fn checked_duration_since(self, earlier: Self) -> Option<Duration> {
        let seconds = self.seconds.checked_sub(earlier.seconds)?;
        Some(Duration::of(seconds) + Duration::of_ms(0, self.milliseconds) - Duration::of_ms(0, earlier.milliseconds))
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instant({}s/{}ms)", self.seconds, self.milliseconds)
    }
}

impl Add<Duration> for Instant {
    type Output = Self;

    fn add(self, duration: Duration) -> Self {
        let (seconds, milliseconds) = duration.lengths();
        Self::at_ms(self.seconds + seconds, self.milliseconds + milliseconds)
    }
}

impl Sub<Duration> for Instant {
    type Output = Self;

    fn sub(self, duration: Duration) -> Self {
        let (seconds, milliseconds) = duration.lengths();
        Self::at_ms(self.seconds - seconds, self.milliseconds - milliseconds)
    }
}

impl Sub<Instant> for Instant {
    type Output = Duration;

    fn sub(self, earlier: Self) -> Duration {
        Duration::of_ms(self.seconds - earlier.seconds, self.milliseconds - earlier.milliseconds)
    }
}
