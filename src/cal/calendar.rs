//! The Gregorian calendar, as observed in a particular time zone.

use tracing::{debug, warn};

use crate::cal::Calendar;
use crate::cal::datetime::{LocalDateTime, SECONDS_IN_DAY};
use crate::cal::zone::{TimeZone, LocalTimes};
use crate::instant::Instant;


/// A **zoned calendar** is the proleptic Gregorian calendar, with days
/// beginning at local midnight in the given time zone.
///
/// Days are as long as the wall clock says they are: the day the clocks
/// go forward is an hour short, and the day they go back is an hour long.
#[derive(Debug, Clone)]
pub struct ZonedCalendar {
    time_zone: TimeZone,
}

impl ZonedCalendar {

    /// The magnitude of the largest Unix timestamp this calendar will work
    /// with: roughly 290 million years either side of 1970. Anything past
    /// this gets `None` from every operation.
    pub const LIMIT: i64 = i64::MAX / 32;

    /// Creates a new calendar for the given time zone.
    pub fn new(time_zone: TimeZone) -> Self {
        Self { time_zone }
    }

    /// A calendar in UTC, where every day is exactly 86,400 seconds long.
    pub fn utc() -> Self {
        Self::new(TimeZone::utc())
    }

    /// A calendar in the computer’s local time zone. If the local zone
    /// can’t be read, this falls back to UTC.
    pub fn local() -> Self {
        match TimeZone::localtime() {
            Ok(zone) => {
                debug!(zone = zone.zone_name().unwrap_or("unnamed"), "using local time zone");
                Self::new(zone)
            }
            Err(e)   => {
                warn!(error = %e, "falling back to UTC: local time zone unreadable");
                Self::utc()
            }
        }
    }

    /// Returns the time zone this calendar operates in.
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    fn in_range(seconds: i64) -> bool {
        -Self::LIMIT <= seconds && seconds <= Self::LIMIT
    }

    /// Returns the number of wall-clock seconds since the 1970 epoch at
    /// the given instant.
    fn local_seconds(&self, instant: Instant) -> Option<i64> {
        if !Self::in_range(instant.seconds()) {
            return None;
        }

        Some(instant.seconds() + self.time_zone.offset_at(instant))
    }

    /// Converts wall-clock seconds back into an instant, checking that the
    /// result is still one this calendar can work with.
    fn checked(instant: Instant) -> Option<Instant> {
        if Self::in_range(instant.seconds()) { Some(instant) } else { None }
    }
}

impl Default for ZonedCalendar {
    fn default() -> Self {
        Self::local()
    }
}

impl Calendar for ZonedCalendar {
    fn local(&self, instant: Instant) -> Option<LocalDateTime> {
        let local = self.local_seconds(instant)?;
        Some(LocalDateTime::at_ms(local, instant.milliseconds()))
    }

    fn start_of_day(&self, instant: Instant) -> Option<Instant> {
        let local = self.local_seconds(instant)?;
        let midnight = local - local.rem_euclid(SECONDS_IN_DAY);

        let start = match self.time_zone.convert_local(midnight) {
            LocalTimes::Precise(start)                 => start,
            LocalTimes::Ambiguous { earlier, .. }      => earlier,

            // When midnight never happens, the day begins as soon as the
            // clocks have finished jumping.
            LocalTimes::Impossible { transition, .. }  => transition,
        };

        Self::checked(start)
    }

    fn add_days(&self, instant: Instant, days: i64) -> Option<Instant> {
        let local = self.local_seconds(instant)?;
        let moved = local.checked_add(days.checked_mul(SECONDS_IN_DAY)?)?;
        if !Self::in_range(moved) {
            return None;
        }

        let landed = self.time_zone.convert_local(moved).earliest_or_shifted();
        Self::checked(Instant::at_ms(landed.seconds(), instant.milliseconds()))
    }

    fn add_hours(&self, instant: Instant, hours: i64) -> Option<Instant> {
        if !Self::in_range(instant.seconds()) {
            return None;
        }

        let seconds = instant.seconds().checked_add(hours.checked_mul(60 * 60)?)?;
        Self::checked(Instant::at_ms(seconds, instant.milliseconds()))
    }
}
