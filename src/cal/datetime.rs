//! Dates, times, datetimes, and months, without any time zone.
//!
//! These are *wall-clock* values: a `LocalDateTime` says what a calendar
//! and a clock on the wall would read, and only becomes an `Instant` once
//! it is paired with an offset from UTC.

use std::error::Error as ErrorTrait;
use std::fmt;

use crate::cal::{DatePiece, TimePiece};

use self::Month::*;


/// Number of days in one full cycle of the Gregorian calendar.
const DAYS_IN_400Y: i64 = 365 * 400 + 97;

/// Number of seconds in a day. Leap seconds are ignored.
pub(crate) const SECONDS_IN_DAY: i64 = 86400;

/// Number of days between **1st January, 1970** and **1st March, 2000**.
///
/// Counting years from March puts the leap day at the very end of each
/// year, and 2000 starts a 400-year cycle, so the arithmetic below only
/// has to deal with whole cycles and a leftover.
const EPOCH_DIFFERENCE: i64 = 30 * 365 + 7 + 31 + 29;


/// A single year.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Year(pub i64);

impl Year {

    /// Returns whether this year is a leap year.
    pub fn is_leap_year(self) -> bool {
        self.0.rem_euclid(4) == 0
            && (self.0.rem_euclid(100) != 0 || self.0.rem_euclid(400) == 0)
    }

    fn length(self) -> i64 {
        if self.is_leap_year() { 366 } else { 365 }
    }
}


/// A **local date** is a day-long span on the timeline, *without a time
/// zone*.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct LocalDate {
    year:    i64,
    month:   Month,
    day:     i8,
    yearday: i16,
}

/// A **local time** is a time on the timeline that recurs once a day,
/// *without a time zone*.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct LocalTime {
    hour:   i8,
    minute: i8,
    second: i8,
    millisecond: i16,
}

/// A **local date-time** is a date and a time of day, *without a time
/// zone*.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct LocalDateTime {
    date: LocalDate,
    time: LocalTime,
}


impl LocalDate {

    /// Creates a new local date from the given year, month, and day,
    /// returning an error if there’s no such day in that month.
    ///
    /// ### Examples
    ///
    /// ```rust
    /// use dayandtime::{LocalDate, Month, DatePiece};
    ///
    /// let date = LocalDate::ymd(1969, Month::July, 20).unwrap();
    /// assert_eq!(date.year(), 1969);
    /// assert_eq!(date.month(), Month::July);
    /// assert_eq!(date.day(), 20);
    ///
    /// assert!(LocalDate::ymd(2100, Month::February, 29).is_err());
    /// ```
    pub fn ymd(year: i64, month: Month, day: i8) -> Result<Self, Error> {
        let leap_year = Year(year).is_leap_year();
        if day < 1 || day > month.days_in_month(leap_year) {
            return Err(Error::OutOfRange);
        }

        let yearday = month.days_before_start(leap_year) + day as i16;
        Ok(Self { year, month, day, yearday })
    }

    /// Creates a new local date from the given year and day of the year,
    /// counting the 1st of January as day 1.
    pub fn yd(year: i64, yearday: i64) -> Result<Self, Error> {
        if yearday < 1 || yearday > Year(year).length() {
            return Err(Error::OutOfRange);
        }

        let leap_year = Year(year).is_leap_year();
        let month = MONTHS.iter().rev()
                          .find(|m| (m.days_before_start(leap_year) as i64) < yearday)
                          .copied()
                          .unwrap_or(January);

        let day = yearday - month.days_before_start(leap_year) as i64;
        Ok(Self { year, month, day: day as i8, yearday: yearday as i16 })
    }

    /// Returns the date that is the given number of days since the 1st of
    /// January, 1970.
    pub fn from_days_since_1970(days: i64) -> Self {
        let days = days - EPOCH_DIFFERENCE;
        let cycles = days.div_euclid(DAYS_IN_400Y);
        let day_of_cycle = days.rem_euclid(DAYS_IN_400Y);

        // Years into the cycle, with a correction for every leap day that
        // has gone by: one every four years, except every hundred, except
        // the last day of the cycle.
        let year_of_cycle = (day_of_cycle - day_of_cycle / 1460 + day_of_cycle / 36524
                             - day_of_cycle / (DAYS_IN_400Y - 1)) / 365;

        let day_of_year = day_of_cycle - (365 * year_of_cycle + year_of_cycle / 4 - year_of_cycle / 100);

        // Months from March have lengths that repeat in a five-month
        // pattern of 153 days.
        let month_from_march = (5 * day_of_year + 2) / 153;
        let day = day_of_year - (153 * month_from_march + 2) / 5 + 1;
        let month = Month::from_march(month_from_march);

        let year = 2000 + cycles * 400 + year_of_cycle + if month <= February { 1 } else { 0 };
        let yearday = month.days_before_start(Year(year).is_leap_year()) + day as i16;

        Self { year, month, day: day as i8, yearday }
    }

    /// Returns the number of days between the 1st of January, 1970, and
    /// this date.
    pub fn days_since_1970(self) -> i64 {
        let march_year = self.year - 2000 - if self.month <= February { 1 } else { 0 };
        let cycles = march_year.div_euclid(400);
        let year_of_cycle = march_year.rem_euclid(400);

        let month_from_march = (self.month as i64 + 9) % 12;
        let day_of_year = (153 * month_from_march + 2) / 5 + self.day as i64 - 1;
        let day_of_cycle = year_of_cycle * 365 + year_of_cycle / 4 - year_of_cycle / 100 + day_of_year;

        cycles * DAYS_IN_400Y + day_of_cycle + EPOCH_DIFFERENCE
    }
}

impl DatePiece for LocalDate {
    fn year(&self) -> i64 { self.year }
    fn month(&self) -> Month { self.month }
    fn day(&self) -> i8 { self.day }
    fn yearday(&self) -> i16 { self.yearday }
}

impl fmt::Debug for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalDate({})", Iso(self))
    }
}


impl LocalTime {

    /// Splits a number of seconds since midnight into hours, minutes, and
    /// seconds. The value should be within a single day.
    pub fn from_seconds_since_midnight(seconds: i64, millisecond: i16) -> Self {
        Self {
            hour:   (seconds / 3600) as i8,
            minute: (seconds / 60 % 60) as i8,
            second: (seconds % 60) as i8,
            millisecond,
        }
    }

    pub fn midnight() -> Self {
        Self { hour: 0, minute: 0, second: 0, millisecond: 0 }
    }

    pub fn hm(hour: i8, minute: i8) -> Result<Self, Error> {
        Self::hms_ms(hour, minute, 0, 0)
    }

    pub fn hms(hour: i8, minute: i8, second: i8) -> Result<Self, Error> {
        Self::hms_ms(hour, minute, second, 0)
    }

    /// Creates a new time from its fields, returning an error if any of
    /// them are out of range.
    pub fn hms_ms(hour: i8, minute: i8, second: i8, millisecond: i16) -> Result<Self, Error> {
        if (0 .. 24).contains(&hour) && (0 .. 60).contains(&minute)
        && (0 .. 60).contains(&second) && (0 .. 1000).contains(&millisecond)
        {
            Ok(Self { hour, minute, second, millisecond })
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    /// The number of seconds since midnight, ignoring milliseconds.
    pub fn to_seconds(self) -> i64 {
        (self.hour as i64 * 60 + self.minute as i64) * 60 + self.second as i64
    }
}

impl TimePiece for LocalTime {
    fn hour(&self) -> i8 { self.hour }
    fn minute(&self) -> i8 { self.minute }
    fn second(&self) -> i8 { self.second }
    fn millisecond(&self) -> i16 { self.millisecond }
}

impl fmt::Debug for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalTime({})", Iso(self))
    }
}


impl LocalDateTime {

    /// The date and time a wall clock shows the given number of seconds
    /// after **midnight, 1st January, 1970**.
    pub fn at(local_seconds: i64) -> Self {
        Self::at_ms(local_seconds, 0)
    }

    pub fn at_ms(local_seconds: i64, millisecond: i16) -> Self {
        Self {
            date: LocalDate::from_days_since_1970(local_seconds.div_euclid(SECONDS_IN_DAY)),
            time: LocalTime::from_seconds_since_midnight(local_seconds.rem_euclid(SECONDS_IN_DAY), millisecond),
        }
    }

    pub fn new(date: LocalDate, time: LocalTime) -> Self {
        Self { date, time }
    }

    pub fn date(&self) -> LocalDate {
        self.date
    }

    pub fn time(&self) -> LocalTime {
        self.time
    }

    /// Returns the number of wall-clock seconds between midnight on the
    /// 1st of January, 1970, and this date-time, ignoring milliseconds.
    ///
    /// This is the value `at` takes: it only names an actual instant once
    /// the UTC offset is known.
    pub fn local_seconds(&self) -> i64 {
        self.date.days_since_1970() * SECONDS_IN_DAY + self.time.to_seconds()
    }
}

impl DatePiece for LocalDateTime {
    fn year(&self) -> i64 { self.date.year }
    fn month(&self) -> Month { self.date.month }
    fn day(&self) -> i8 { self.date.day }
    fn yearday(&self) -> i16 { self.date.yearday }
}

impl TimePiece for LocalDateTime {
    fn hour(&self) -> i8 { self.time.hour }
    fn minute(&self) -> i8 { self.time.minute }
    fn second(&self) -> i8 { self.time.second }
    fn millisecond(&self) -> i16 { self.time.millisecond }
}

impl fmt::Debug for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalDateTime({}T{})", Iso(&self.date), Iso(&self.time))
    }
}


/// ISO-8601 rendering of a date or a time, used by the `Debug` impls.
struct Iso<'a, T>(&'a T);

impl<'a> fmt::Display for Iso<'a, LocalDate> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.0;
        if (0 .. 10000).contains(&date.year) {
            write!(f, "{:04}-{:02}-{:02}", date.year, date.month as usize, date.day)
        }
        else {
            write!(f, "{:+05}-{:02}-{:02}", date.year, date.month as usize, date.day)
        }
    }
}

impl<'a> fmt::Display for Iso<'a, LocalTime> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = self.0;
        write!(f, "{:02}:{:02}:{:02}.{:03}", time.hour, time.minute, time.second, time.millisecond)
    }
}


/// The error returned when a date or time field is out of range.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum Error {
    OutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "date or time field out of range")
    }
}

impl ErrorTrait for Error {
}


/// A month of the year. Converting one with `as` gives its usual number,
/// with January as 1.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy)]
pub enum Month {
    January =  1, February =  2, March     =  3,
    April   =  4, May      =  5, June      =  6,
    July    =  7, August   =  8, September =  9,
    October = 10, November = 11, December  = 12,
}

static MONTHS: &[Month] = &[
    January,  February,  March,
    April,    May,       June,
    July,     August,    September,
    October,  November,  December,
];

impl Month {

    /// Returns the number of days in this month, depending on whether it’s
    /// a leap year or not.
    pub fn days_in_month(self, leap_year: bool) -> i8 {
        match self {
            February                                     => if leap_year { 29 } else { 28 },
            April | June | September | November          => 30,
            _                                            => 31,
        }
    }

    /// The number of days in the year before this month begins.
    fn days_before_start(self, leap_year: bool) -> i16 {
        MONTHS[.. self as usize - 1].iter()
                                   .map(|m| m.days_in_month(leap_year) as i16)
                                   .sum()
    }

    /// Returns the month that is the given number of months after March,
    /// from 0 to 11.
    fn from_march(months: i64) -> Self {
        MONTHS[((months + 2) % 12) as usize]
    }

    /// Returns the month based on a number, with January as **Month 1**,
    /// February as **Month 2**, and so on.
    ///
    /// ```rust
    /// use dayandtime::Month;
    /// assert_eq!(Month::from_one(5), Ok(Month::May));
    /// assert!(Month::from_one(0).is_err());
    /// ```
    pub fn from_one(month: i8) -> Result<Self, Error> {
        if (1 ..= 12).contains(&month) {
            Ok(MONTHS[month as usize - 1])
        }
        else {
            Err(Error::OutOfRange)
        }
    }
}
