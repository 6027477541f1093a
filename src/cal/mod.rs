//! ISO-8601 date and time calculations, which use years, months, days,
//! hours, minutes, and seconds, and the calendars that turn instants into
//! them.

pub(crate) mod datetime;
pub mod calendar;
#[cfg(feature="parse")] pub mod parse;
pub mod zone;
pub mod zoneinfo;

use self::datetime::{LocalDateTime, Month};
use crate::duration::Duration;
use crate::instant::Instant;


/// Values that can say which day of the calendar they fall on.
pub trait DatePiece {

    /// The year, as written: 2014 is 2014.
    fn year(&self) -> i64;

    /// The month of the year.
    fn month(&self) -> Month;

    /// The day of the month, from 1 to 31.
    fn day(&self) -> i8;

    /// The day of the year, from 1 to 366.
    fn yearday(&self) -> i16;
}


/// Values that can say what a clock would show.
pub trait TimePiece {

    /// The hour of the day, from 0 to 23.
    fn hour(&self) -> i8;

    fn minute(&self) -> i8;

    fn second(&self) -> i8;

    fn millisecond(&self) -> i16;
}


/// A **calendar** knows how instants on the timeline map onto the days
/// and hours that people use, under some set of rules about time zones
/// and daylight-saving time.
///
/// Every operation returns `None` when the calendar can’t answer for the
/// given instant, usually because the result would fall off the end of
/// the range of dates the calendar can represent.
pub trait Calendar {

    /// Decomposes an instant into the date and time a wall clock would
    /// show at that moment.
    fn local(&self, instant: Instant) -> Option<LocalDateTime>;

    /// Returns the first instant of the day containing the given instant.
    fn start_of_day(&self, instant: Instant) -> Option<Instant>;

    /// Moves an instant by a number of calendar days, keeping the time of
    /// day the same where possible. A day here is not necessarily 24 hours
    /// long.
    fn add_days(&self, instant: Instant, days: i64) -> Option<Instant>;

    /// Moves an instant by a number of elapsed hours.
    fn add_hours(&self, instant: Instant, hours: i64) -> Option<Instant> {
        let seconds = hours.checked_mul(60 * 60)?;
        instant.checked_add(Duration::of(seconds))
    }
}

impl<'a, C: Calendar + ?Sized> Calendar for &'a C {
    fn local(&self, instant: Instant) -> Option<LocalDateTime> {
        (**self).local(instant)
    }

    fn start_of_day(&self, instant: Instant) -> Option<Instant> {
        (**self).start_of_day(instant)
    }

    fn add_days(&self, instant: Instant, days: i64) -> Option<Instant> {
        (**self).add_days(instant, days)
    }

    fn add_hours(&self, instant: Instant, hours: i64) -> Option<Instant> {
        (**self).add_hours(instant, hours)
    }
}
