//! Time zones with variable UTC offsets, and the conversions between
//! wall-clock times and instants that they make possible.

use std::borrow::Cow;
use std::cmp::min;
use std::convert::TryFrom;
use std::sync::Arc;

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::AmbiguousOffset;

use crate::cal::{DatePiece, TimePiece};
use crate::cal::datetime::LocalDateTime;
use crate::instant::Instant;


/// A **time zone**: the history of a place’s offset from UTC.
///
/// Zones built into the program are runs of timespans that each have a
/// single fixed offset. Zones read from the system’s zoneinfo database
/// also carry the rule that generates their transitions after the last
/// listed one.
#[derive(Debug, Clone)]
pub struct TimeZone(pub TimeZoneSource<'static>);

#[derive(Debug, Clone)]
pub enum TimeZoneSource<'a> {
    Static(&'a StaticTimeZone<'a>),
    Runtime(Arc<runtime::OwnedTimeZone>),
    Database(jiff::tz::TimeZone),
}

#[derive(PartialEq, Debug)]
pub struct StaticTimeZone<'a> {

    /// The zoneinfo name, like “Europe/London”.
    pub name: &'a str,

    /// Every offset the zone has had, and when each one started.
    pub fixed_timespans: FixedTimespanSet<'a>,
}

impl TimeZone {

    /// Coordinated Universal Time, which never changes its offset.
    pub fn utc() -> Self {
        Self::fixed("UTC", 0)
    }

    /// A zone that is always the given number of seconds ahead of UTC.
    pub fn fixed(name: &str, offset: i64) -> Self {
        let zone = runtime::OwnedTimeZone {
            name: Some(name.to_owned()),
            fixed_timespans: runtime::OwnedFixedTimespanSet {
                first: FixedTimespan {
                    offset,
                    is_dst: false,
                    name: Cow::Owned(name.to_owned()),
                },
                rest: Vec::new(),
            },
        };

        TimeZone(TimeZoneSource::Runtime(Arc::new(zone)))
    }

    /// The zone’s name, such as “Europe/London”, if it has one.
    pub fn zone_name(&self) -> Option<&str> {
        match self.0 {
            TimeZoneSource::Static(tz)        => Some(tz.name),
            TimeZoneSource::Runtime(ref arc)  => arc.name.as_deref(),
            TimeZoneSource::Database(ref tz)  => tz.iana_name(),
        }
    }

    /// The number of seconds the wall clock is ahead of UTC at the given
    /// instant, daylight-saving time included.
    pub fn offset_at(&self, instant: Instant) -> i64 {
        match self.0 {
            TimeZoneSource::Static(tz)        => tz.fixed_timespans.find(instant.seconds()).offset,
            TimeZoneSource::Runtime(ref arc)  => arc.fixed_timespans.borrow().find(instant.seconds()).offset,
            TimeZoneSource::Database(ref tz)  => i64::from(tz.to_offset(timestamp(instant.seconds())).seconds()),
        }
    }

    /// Whether the offset never changes.
    pub fn is_fixed(&self) -> bool {
        match self.0 {
            TimeZoneSource::Static(tz)        => tz.fixed_timespans.is_fixed(),
            TimeZoneSource::Runtime(ref arc)  => arc.fixed_timespans.borrow().is_fixed(),
            TimeZoneSource::Database(ref tz)  => tz.to_fixed_offset().is_ok(),
        }
    }

    /// Finds the instants at which a wall clock in this time zone shows
    /// the given number of local seconds since the 1970 epoch.
    ///
    /// This can return 0, 1, or 2 values, depending on whether the time
    /// falls in the gap left when the clocks go forward (an impossible
    /// time) or in the overlap when they go back (an ambiguous time).
    pub fn convert_local(&self, local_seconds: i64) -> LocalTimes {
        match self.0 {
            TimeZoneSource::Static(tz)        => tz.fixed_timespans.convert_local(local_seconds),
            TimeZoneSource::Runtime(ref arc)  => arc.fixed_timespans.borrow().convert_local(local_seconds),
            TimeZoneSource::Database(ref tz)  => convert_with_rules(tz, local_seconds),
        }
    }
}


/// The timestamp for a number of Unix seconds, pinned to the range of
/// timestamps the database can answer for.
fn timestamp(seconds: i64) -> Timestamp {
    let pinned = seconds.clamp(Timestamp::MIN.as_second(), Timestamp::MAX.as_second());
    Timestamp::from_second(pinned).unwrap_or(Timestamp::UNIX_EPOCH)
}

/// Converts local seconds using a database zone’s rules. Local times too
/// far from the present for the database to represent are taken to use
/// the offset it gives at the nearest instant it can.
fn convert_with_rules(tz: &jiff::tz::TimeZone, local: i64) -> LocalTimes {
    let fallback = || {
        let offset = i64::from(tz.to_offset(timestamp(local)).seconds());
        LocalTimes::Precise(Instant::at(local.saturating_sub(offset)))
    };

    let fields = LocalDateTime::at(local);
    let year = match i16::try_from(fields.year()) {
        Ok(year)  => year,
        Err(_)    => return fallback(),
    };

    let civil = match DateTime::new(year, fields.month() as i8, fields.day(),
                                    fields.hour(), fields.minute(), fields.second(), 0) {
        Ok(civil)  => civil,
        Err(_)     => return fallback(),
    };

    let at = |offset: jiff::tz::Offset| Instant::at(local - i64::from(offset.seconds()));
    match tz.to_ambiguous_timestamp(civil).offset() {
        AmbiguousOffset::Unambiguous { offset }  => LocalTimes::Precise(at(offset)),
        AmbiguousOffset::Fold { before, after }  => LocalTimes::Ambiguous { earlier: at(before), later: at(after) },
        AmbiguousOffset::Gap { before, .. }      => {
            let shifted = at(before);

            // The clocks changed at the latest transition no later than
            // the shifted instant.
            let transition = tz.preceding(timestamp(shifted.seconds() + 1)).next()
                               .map(|t| Instant::at(t.timestamp().as_second()))
                               .unwrap_or(shifted);

            LocalTimes::Impossible { transition, shifted }
        }
    }
}


/// The timespans of a zone in order, with the instants that separate
/// them. There is always one more timespan than there are transitions.
#[derive(PartialEq, Debug, Clone)]
pub struct FixedTimespanSet<'a> {

    /// The timespan in effect before the first transition, or forever if
    /// there are none.
    pub first: FixedTimespan<'a>,

    /// Each later timespan, paired with the Unix timestamp it starts at.
    /// The timestamps must be in ascending order.
    pub rest: &'a [ (i64, FixedTimespan<'a>) ],
}

/// A stretch of time with one offset.
#[derive(PartialEq, Debug, Clone)]
pub struct FixedTimespan<'a> {

    /// Seconds ahead of UTC, with any daylight-saving shift added in.
    pub offset: i64,

    /// Whether this is daylight-saving time.
    pub is_dst: bool,

    /// The abbreviation in use during this timespan, such as “GMT” or
    /// “PDT”.
    pub name: Cow<'a, str>,
}

impl<'a> FixedTimespanSet<'a> {

    /// Returns the index of the timespan in effect at the given Unix
    /// timestamp, where 0 is `first` and `n` is `rest[n - 1]`. A
    /// transition’s own timestamp belongs to the timespan it begins.
    fn index_at(&self, time: i64) -> usize {
        self.rest.partition_point(|t| t.0 <= time)
    }

    fn timespan(&self, index: usize) -> &FixedTimespan<'a> {
        if index == 0 { &self.first } else { &self.rest[index - 1].1 }
    }

    /// The Unix timestamp at which the timespan with the given index
    /// begins; the first timespan has been in effect forever.
    fn start(&self, index: usize) -> i64 {
        if index == 0 { i64::MIN } else { self.rest[index - 1].0 }
    }

    fn find(&self, time: i64) -> &FixedTimespan<'a> {
        self.timespan(self.index_at(time))
    }

    fn is_fixed(&self) -> bool {
        self.rest.is_empty()
    }

    fn convert_local(&self, local: i64) -> LocalTimes {
        // Offsets are always less than a day, so any timespan that could
        // contain this wall-clock time is within a couple of transitions of
        // the one in effect at the same number of UTC seconds.
        let guess = self.index_at(local);
        let low   = guess.saturating_sub(2);
        let high  = min(guess + 2, self.rest.len());

        let mut found = Vec::with_capacity(2);
        for index in low ..= high {
            let candidate = local.saturating_sub(self.timespan(index).offset);
            if self.index_at(candidate) == index {
                found.push(Instant::at(candidate));
            }
        }

        match found[..] {
            [precise]         => return LocalTimes::Precise(precise),
            [earlier, later]  => return LocalTimes::Ambiguous { earlier, later },
            _                 => {},
        }

        // No timespan contains this time, so it fell in a gap. Find the
        // transition whose clocks jumped over it.
        for index in (low + 1) ..= high {
            let before = self.timespan(index - 1).offset;
            let after  = self.timespan(index).offset;
            let transition = self.start(index);

            if transition.saturating_add(before) <= local && local < transition.saturating_add(after) {
                return LocalTimes::Impossible {
                    transition: Instant::at(transition),
                    shifted:    Instant::at(local.saturating_sub(before)),
                };
            }
        }

        LocalTimes::Precise(Instant::at(local.saturating_sub(self.timespan(guess).offset)))
    }
}


/// The result of converting a *local* time to the instants at which a
/// wall clock would show it. See `TimeZone::convert_local`.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum LocalTimes {

    /// This local time is impossible: the clocks jumped over it.
    ///
    /// `transition` is the instant the clocks changed, the first instant
    /// after the gap. `shifted` is the instant the time would have been
    /// at under the offset from before the change, which is to say the
    /// local time pushed forward by the length of the gap.
    Impossible { transition: Instant, shifted: Instant },

    /// This local time happens exactly once.
    Precise(Instant),

    /// This local time is ambiguous: it happens twice on a wall clock,
    /// once before the clocks go back and once after.
    Ambiguous { earlier: Instant, later: Instant },
}

impl LocalTimes {

    /// Returns whether this local times result is impossible.
    pub fn is_impossible(&self) -> bool {
        matches!(*self, LocalTimes::Impossible { .. })
    }

    /// Returns whether this local times result is ambiguous.
    pub fn is_ambiguous(&self) -> bool {
        matches!(*self, LocalTimes::Ambiguous { .. })
    }

    /// Returns the earliest instant showing this local time, or, for an
    /// impossible time, the time pushed forward past the gap.
    pub fn earliest_or_shifted(self) -> Instant {
        match self {
            LocalTimes::Precise(instant)              => instant,
            LocalTimes::Ambiguous { earlier, .. }     => earlier,
            LocalTimes::Impossible { shifted, .. }    => shifted,
        }
    }
}


pub mod runtime {
    use super::{FixedTimespan, FixedTimespanSet};

    #[derive(PartialEq, Debug)]
    pub struct OwnedTimeZone {
        pub name: Option<String>,
        pub fixed_timespans: OwnedFixedTimespanSet,
    }

    #[derive(PartialEq, Debug)]
    pub struct OwnedFixedTimespanSet {
        pub first: FixedTimespan<'static>,
        pub rest: Vec<(i64, FixedTimespan<'static>)>,
    }

    impl OwnedFixedTimespanSet {
        pub fn borrow(&self) -> FixedTimespanSet<'_> {
            FixedTimespanSet {
                first: self.first.clone(),
                rest: &*self.rest,
            }
        }
    }
}
