//! The day-and-time cursor.
//!
//! A `DayAndTime` is the “current day and time” that a user browsing a
//! forecast has selected. It can be moved an hour or a calendar day at a
//! time, but never outside its *term*: the range of instants there is
//! anything to show for.
//!
//! Moves that can’t be made are no-ops rather than errors. Each one has a
//! `can_…` predicate that says in advance whether it would do anything, so
//! a UI can grey out its buttons.
//!
//! ### Examples
//!
//! ```rust
//! use dayandtime::{DayAndTime, ZonedCalendar, FixedClock, Instant, ClosedInterval};
//!
//! let clock = FixedClock::at(Instant::at(8 * 3600 + 30 * 60));
//! let mut cursor = DayAndTime::new(ZonedCalendar::utc(), clock, true);
//!
//! assert!(cursor.step_back_one_hour());
//! assert_eq!(cursor.time(), Instant::at(8 * 3600));
//!
//! cursor.set_term(ClosedInterval::new(Instant::at(0), Instant::at(86400)));
//! assert!(!cursor.can_step_forward_one_day());
//! ```

use std::cmp::min;
use std::fmt;

use tracing::trace;

use crate::cal::Calendar;
use crate::cal::calendar::ZonedCalendar;
use crate::cal::datetime::LocalDateTime;
use crate::clock::{Clock, SystemClock};
use crate::day_range::day_range;
use crate::duration::Duration;
use crate::instant::Instant;
use crate::interval::ClosedInterval;
use crate::observe::{Publisher, Subscription, WillChange};


/// How close to the clock an instant has to be to count as “now”.
const NOW_TOLERANCE: Duration = Duration::of(5);

const SECONDS_IN_HOUR: i64 = 60 * 60;

/// How far into the last hour of a day the cursor has to be before there
/// isn’t a whole hour left to step forward into.
const LAST_HOUR: Duration = Duration::of(3599);


/// A cursor over days and hours, kept within a term.
pub struct DayAndTime<C: Calendar = ZonedCalendar> {
    time: Instant,
    term: ClosedInterval<Instant>,
    showing_time: bool,
    calendar: C,
    clock: Box<dyn Clock>,
    will_change: Publisher<WillChange>,
}

impl DayAndTime<ZonedCalendar> {

    /// Creates a cursor at the current time, in the computer’s local time
    /// zone, with no limits on where it can go.
    pub fn local(showing_time: bool) -> Self {
        Self::new(ZonedCalendar::local(), SystemClock, showing_time)
    }
}

impl<C: Calendar> DayAndTime<C> {

    /// Creates a cursor at the instant the given clock says it is now,
    /// with no limits on where it can go.
    pub fn new<K: Clock + 'static>(calendar: C, clock: K, showing_time: bool) -> Self {
        let time = clock.now();
        Self::at(time, calendar, clock, showing_time)
    }

    /// Creates a cursor at the given instant, with no limits on where it
    /// can go.
    pub fn at<K: Clock + 'static>(time: Instant, calendar: C, clock: K, showing_time: bool) -> Self {
        Self {
            time,
            term: ClosedInterval::unbounded(),
            showing_time,
            calendar,
            clock: Box::new(clock),
            will_change: Publisher::new(),
        }
    }


    // ---- fields ----

    /// The instant the cursor is at.
    pub fn time(&self) -> Instant {
        self.time
    }

    /// The interval the cursor is kept within.
    pub fn term(&self) -> ClosedInterval<Instant> {
        self.term
    }

    /// Whether the time of day, and not just the day, is being shown.
    pub fn showing_time(&self) -> bool {
        self.showing_time
    }

    /// The calendar that decides where the cursor’s days begin.
    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// The span of the calendar day the cursor is in, from its first
    /// instant to the first instant of the next day. This is `None` when
    /// the calendar can’t work it out, in which case none of the hour
    /// steps are available either.
    pub fn day(&self) -> Option<ClosedInterval<Instant>> {
        day_range(self.time, &self.calendar)
    }

    /// The date and time a wall clock would show at the cursor.
    pub fn local_time(&self) -> Option<LocalDateTime> {
        self.calendar.local(self.time)
    }

    /// Moves the cursor to the given instant, or to the nearest end of the
    /// term if the instant is outside it.
    ///
    /// Subscribers are told about this even if the cursor ends up where it
    /// already was.
    pub fn set_time(&mut self, time: Instant) {
        let clamped = self.term.clamp(time);
        self.assign_time(clamped);
    }

    /// Moves the cursor to what the clock says is now, or to the nearest
    /// end of the term.
    pub fn set_time_to_now(&mut self) {
        let now = self.clock.now();
        self.set_time(now);
    }

    /// Replaces the term. The cursor stays where it is, even if that’s now
    /// outside the term; only the moves after this are constrained by it.
    ///
    /// The term’s `low` must not be after its `high`. Nothing checks this,
    /// and a cursor with such a term goes wherever the clamping sends it.
    pub fn set_term(&mut self, term: ClosedInterval<Instant>) {
        self.will_change.send(&WillChange::Term { from: self.term, to: term });
        trace!(from = ?self.term, to = ?term, subscribers = self.will_change.subscriber_count(), "term changing");
        self.term = term;
    }

    /// Changes whether the time of day is being shown. Subscribers are
    /// always told, even if the value stays the same.
    pub fn set_showing_time(&mut self, showing_time: bool) {
        self.will_change.send(&WillChange::ShowingTime { from: self.showing_time, to: showing_time });
        trace!(from = self.showing_time, to = showing_time, subscribers = self.will_change.subscriber_count(), "showing_time changing");
        self.showing_time = showing_time;
    }


    // ---- notifications ----

    /// Registers a handler to be called just *before* any field of this
    /// cursor changes.
    pub fn subscribe<F>(&mut self, handler: F) -> Subscription
    where F: FnMut(&WillChange) + 'static
    {
        self.will_change.subscribe(handler)
    }

    /// Removes a handler, returning whether it was still registered.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.will_change.unsubscribe(subscription)
    }


    // ---- comparisons with now ----

    /// Whether the given instant is in the same calendar day as the
    /// cursor. Two days are the same only if they start and end at exactly
    /// the same instants.
    pub fn matches_day(&self, other: Instant) -> bool {
        match (day_range(other, &self.calendar), self.day()) {
            (Some(theirs), Some(ours))  => theirs == ours,
            _                           => false,
        }
    }

    /// Whether the cursor is on the same day as the clock.
    pub fn is_today(&self) -> bool {
        self.matches_day(self.clock.now())
    }

    /// Whether the cursor is less than five seconds away from the clock,
    /// in either direction.
    pub fn is_now(&self) -> bool {
        match self.clock.now().checked_duration_since(self.time) {
            Some(difference)  => difference.abs() < NOW_TOLERANCE,
            None              => false,
        }
    }


    // ---- hours ----

    /// Whether `step_forward_one_hour` would move the cursor.
    pub fn can_step_forward_one_hour(&self) -> bool {
        self.next_hour().is_some()
    }

    /// Whether `step_back_one_hour` would move the cursor.
    pub fn can_step_back_one_hour(&self) -> bool {
        self.previous_hour().is_some()
    }

    /// Moves the cursor forward to the start of the next hour of the day.
    /// Returns whether it moved; it doesn’t when the cursor is already in
    /// the last hour of its day, or the next hour is outside the term.
    pub fn step_forward_one_hour(&mut self) -> bool {
        let candidate = self.next_hour();
        self.step_to(candidate, "forward one hour")
    }

    /// Moves the cursor back to the start of the current hour, or to the
    /// start of the previous hour if it’s already exactly on the hour.
    /// Returns whether it moved; it doesn’t when the cursor is at the very
    /// start of its day, or the target is outside the term.
    pub fn step_back_one_hour(&mut self) -> bool {
        let candidate = self.previous_hour();
        self.step_to(candidate, "back one hour")
    }

    /// The top of the hour after the one the cursor is in, no later than
    /// the end of the day.
    fn next_hour(&self) -> Option<Instant> {
        let day = self.day()?;
        let last_hour = day.high.checked_sub(LAST_HOUR)?;
        if self.time >= last_hour {
            return None;
        }

        let (hour, _) = self.hours_into(day.low)?;
        let candidate = min(self.calendar.add_hours(day.low, hour + 1)?, day.high);
        self.within_term(candidate)
    }

    /// The top of the hour the cursor is in, or of the hour before if the
    /// cursor is exactly on the hour already.
    fn previous_hour(&self) -> Option<Instant> {
        let day = self.day()?;
        if self.time == day.low {
            return None;
        }

        let (hour, on_the_hour) = self.hours_into(day.low)?;
        let hour = if on_the_hour { hour - 1 } else { hour };
        let candidate = min(self.calendar.add_hours(day.low, hour)?, day.high);
        self.within_term(candidate)
    }

    /// The number of whole hours between the start of the day and the
    /// cursor, and whether the cursor is exactly on one of them, ignoring
    /// milliseconds.
    ///
    /// Hours are counted from the start of the day rather than read off the
    /// wall clock, so on the days the clocks change every hour of the day
    /// still gets visited once.
    fn hours_into(&self, day_start: Instant) -> Option<(i64, bool)> {
        let (seconds, _) = self.time.checked_duration_since(day_start)?.lengths();
        Some((seconds.div_euclid(SECONDS_IN_HOUR), seconds.rem_euclid(SECONDS_IN_HOUR) == 0))
    }


    // ---- days ----

    /// Whether `step_forward_one_day` would move the cursor.
    pub fn can_step_forward_one_day(&self) -> bool {
        self.next_day().is_some()
    }

    /// Whether `step_back_one_day` would move the cursor.
    pub fn can_step_back_one_day(&self) -> bool {
        self.previous_day().is_some()
    }

    /// Moves the cursor to the same time on the next calendar day.
    /// Returns whether it moved.
    pub fn step_forward_one_day(&mut self) -> bool {
        let candidate = self.next_day();
        self.step_to(candidate, "forward one day")
    }

    /// Moves the cursor to the same time on the previous calendar day.
    /// Returns whether it moved.
    pub fn step_back_one_day(&mut self) -> bool {
        let candidate = self.previous_day();
        self.step_to(candidate, "back one day")
    }

    fn next_day(&self) -> Option<Instant> {
        let candidate = self.calendar.add_days(self.time, 1)?;
        self.within_term(candidate)
    }

    fn previous_day(&self) -> Option<Instant> {
        let candidate = self.calendar.add_days(self.time, -1)?;
        self.within_term(candidate)
    }


    // ---- helpers ----

    fn within_term(&self, candidate: Instant) -> Option<Instant> {
        if self.term.contains(candidate) { Some(candidate) } else { None }
    }

    fn step_to(&mut self, candidate: Option<Instant>, step: &'static str) -> bool {
        match candidate {
            Some(time) => {
                self.assign_time(time);
                true
            }
            None => {
                trace!(step, time = ?self.time, "step unavailable");
                false
            }
        }
    }

    fn assign_time(&mut self, time: Instant) {
        self.will_change.send(&WillChange::Time { from: self.time, to: time });
        trace!(from = ?self.time, to = ?time, subscribers = self.will_change.subscriber_count(), "time changing");
        self.time = time;
    }
}

impl<C: Calendar + fmt::Debug> fmt::Debug for DayAndTime<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DayAndTime")
         .field("time", &self.time)
         .field("term", &self.term)
         .field("showing_time", &self.showing_time)
         .field("calendar", &self.calendar)
         .field("will_change", &self.will_change)
         .finish()
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::clock::FixedClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    const HOUR: i64 = 3600;
    const DAY: i64 = 86400;

    /// A cursor in UTC at the given number of seconds past the epoch, with
    /// the clock stopped at the same instant.
    fn cursor_at(seconds: i64) -> (DayAndTime, FixedClock) {
        let clock = FixedClock::at(Instant::at(seconds));
        (DayAndTime::new(ZonedCalendar::utc(), clock.clone(), false), clock)
    }

    fn recording(cursor: &mut DayAndTime) -> Rc<RefCell<Vec<WillChange>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let _ = cursor.subscribe(move |change| log.borrow_mut().push(*change));
        seen
    }

    mod set_time {
        use super::*;

        #[test]
        fn clamps_above() {
            let (mut cursor, clock) = cursor_at(0);
            clock.set(Instant::at(90000));
            cursor.set_term(ClosedInterval::new(Instant::at(0), Instant::at(DAY)));
            cursor.set_time_to_now();
            assert_eq!(cursor.time(), Instant::at(DAY));
        }

        #[test]
        fn clamps_below() {
            let (mut cursor, _) = cursor_at(0);
            cursor.set_term(ClosedInterval::new(Instant::at(DAY), Instant::at(2 * DAY)));
            cursor.set_time(Instant::at(-1));
            assert_eq!(cursor.time(), Instant::at(DAY));
        }

        #[test]
        fn inside_term_is_untouched() {
            let (mut cursor, _) = cursor_at(0);
            cursor.set_term(ClosedInterval::new(Instant::at(0), Instant::at(DAY)));
            cursor.set_time(Instant::at_ms(500, 250));
            assert_eq!(cursor.time(), Instant::at_ms(500, 250));
        }

        #[test]
        fn fixed_point() {
            let (mut cursor, _) = cursor_at(0);
            cursor.set_term(ClosedInterval::new(Instant::at(10), Instant::at(20)));
            cursor.set_time(Instant::at(25));
            let once = cursor.time();
            cursor.set_time(once);
            assert_eq!(cursor.time(), once);
        }

        #[test]
        fn term_change_leaves_cursor_alone() {
            let (mut cursor, _) = cursor_at(5 * DAY);
            cursor.set_term(ClosedInterval::new(Instant::at(0), Instant::at(DAY)));
            assert_eq!(cursor.time(), Instant::at(5 * DAY));
        }

        #[test]
        fn notifies_even_when_unchanged() {
            let (mut cursor, _) = cursor_at(100);
            let seen = recording(&mut cursor);
            cursor.set_time(Instant::at(100));
            assert_eq!(*seen.borrow(), vec![WillChange::Time { from: Instant::at(100), to: Instant::at(100) }]);
        }
    }

    mod now {
        use super::*;

        #[test]
        fn is_now_within_tolerance() {
            let (cursor, clock) = cursor_at(1000);
            clock.advance(Duration::of_ms(4, 999));
            assert!(cursor.is_now());
        }

        #[test]
        fn is_not_now_at_five_seconds() {
            let (cursor, clock) = cursor_at(1000);
            clock.advance(Duration::of(5));
            assert!(!cursor.is_now());
        }

        #[test]
        fn is_not_now_past_five_seconds() {
            let (cursor, clock) = cursor_at(1000);
            clock.advance(Duration::of_ms(5, 1));
            assert!(!cursor.is_now());
        }

        #[test]
        fn is_now_in_the_past_too() {
            let (cursor, clock) = cursor_at(1000);
            clock.set(Instant::at_ms(995, 1));
            assert!(cursor.is_now());
            clock.set(Instant::at_ms(994, 999));
            assert!(!cursor.is_now());
        }

        #[test]
        fn is_now_at_the_end_of_time() {
            let (mut cursor, _) = cursor_at(1000);
            cursor.set_time(Instant::MIN);
            assert!(!cursor.is_now());
        }

        #[test]
        fn is_today() {
            let (mut cursor, clock) = cursor_at(DAY + 10);
            assert!(cursor.is_today());
            clock.set(Instant::at(2 * DAY - 1));
            assert!(cursor.is_today());
            clock.set(Instant::at(2 * DAY));
            assert!(!cursor.is_today());
            cursor.set_time(Instant::at(2 * DAY + 5 * HOUR));
            assert!(cursor.is_today());
        }

        #[test]
        fn matches_day() {
            let (cursor, _) = cursor_at(DAY + 12 * HOUR);
            assert!(cursor.matches_day(Instant::at(DAY)));
            assert!(cursor.matches_day(Instant::at(2 * DAY - 1)));
            assert!(!cursor.matches_day(Instant::at(2 * DAY)));
            assert!(!cursor.matches_day(Instant::at(DAY - 1)));
        }

        #[test]
        fn unavailable_days_never_match() {
            let (cursor, _) = cursor_at(0);
            assert!(!cursor.matches_day(Instant::MAX));
        }
    }

    mod hours {
        use super::*;

        #[test]
        fn forward_visits_every_hour_once() {
            let (mut cursor, _) = cursor_at(DAY);
            let mut visited = vec![cursor.time()];
            for _ in 0 .. 24 {
                assert!(cursor.step_forward_one_hour());
                visited.push(cursor.time());
            }

            let expected: Vec<_> = (0 ..= 24).map(|h| Instant::at(DAY + h * HOUR)).collect();
            assert_eq!(visited, expected);
        }

        #[test]
        fn forward_from_the_last_hour_reaches_midnight() {
            let (mut cursor, _) = cursor_at(DAY + 23 * HOUR);
            assert!(cursor.step_forward_one_hour());
            assert_eq!(cursor.time(), Instant::at(2 * DAY));
        }

        #[test]
        fn forward_snaps_to_the_next_hour() {
            let (mut cursor, _) = cursor_at(8 * HOUR + 30 * 60 + 15);
            assert!(cursor.step_forward_one_hour());
            assert_eq!(cursor.time(), Instant::at(9 * HOUR));
        }

        #[test]
        fn forward_stops_in_the_last_hour() {
            let (cursor, _) = cursor_at(DAY - 3599);
            assert!(!cursor.can_step_forward_one_hour());

            let (cursor, _) = cursor_at(DAY - 3600);
            assert!(cursor.can_step_forward_one_hour());
        }

        #[test]
        fn back_snaps_to_this_hour_then_the_last() {
            let (mut cursor, _) = cursor_at(8 * HOUR + 30 * 60);
            assert!(cursor.step_back_one_hour());
            assert_eq!(cursor.time(), Instant::at(8 * HOUR));
            assert!(cursor.step_back_one_hour());
            assert_eq!(cursor.time(), Instant::at(7 * HOUR));
        }

        #[test]
        fn back_stops_at_the_start_of_the_day() {
            let (mut cursor, _) = cursor_at(DAY + 30 * 60);
            assert!(cursor.step_back_one_hour());
            assert_eq!(cursor.time(), Instant::at(DAY));
            assert!(!cursor.can_step_back_one_hour());
            assert!(!cursor.step_back_one_hour());
            assert_eq!(cursor.time(), Instant::at(DAY));
        }

        #[test]
        fn respects_term() {
            let (mut cursor, _) = cursor_at(8 * HOUR + 30 * 60);
            cursor.set_term(ClosedInterval::new(Instant::at(8 * HOUR + 10 * 60), Instant::at(8 * HOUR + 50 * 60)));
            assert!(!cursor.can_step_forward_one_hour());
            assert!(!cursor.can_step_back_one_hour());
            assert!(!cursor.step_back_one_hour());
            assert_eq!(cursor.time(), Instant::at(8 * HOUR + 30 * 60));
        }

        #[test]
        fn unavailable_day_means_no_steps() {
            let (mut cursor, _) = cursor_at(0);
            cursor.set_time(Instant::MAX);
            assert!(!cursor.can_step_forward_one_hour());
            assert!(!cursor.can_step_back_one_hour());
        }
    }

    mod days {
        use super::*;

        #[test]
        fn forward_and_back() {
            let (mut cursor, _) = cursor_at(DAY + 9 * HOUR);
            assert!(cursor.step_forward_one_day());
            assert_eq!(cursor.time(), Instant::at(2 * DAY + 9 * HOUR));
            assert!(cursor.step_back_one_day());
            assert!(cursor.step_back_one_day());
            assert_eq!(cursor.time(), Instant::at(9 * HOUR));
        }

        #[test]
        fn respects_a_one_second_term() {
            let (mut cursor, _) = cursor_at(1000);
            cursor.set_term(ClosedInterval::new(Instant::at(1000), Instant::at(1001)));
            assert!(!cursor.can_step_forward_one_day());
            assert!(!cursor.step_forward_one_day());
            assert!(!cursor.can_step_back_one_day());
            assert_eq!(cursor.time(), Instant::at(1000));
        }

        #[test]
        fn term_end_is_reachable() {
            let (mut cursor, _) = cursor_at(0);
            cursor.set_term(ClosedInterval::new(Instant::at(0), Instant::at(DAY)));
            assert!(cursor.step_forward_one_day());
            assert_eq!(cursor.time(), Instant::at(DAY));
            assert!(!cursor.can_step_forward_one_day());
        }
    }

    mod notifications {
        use super::*;

        #[test]
        fn one_per_step() {
            let (mut cursor, _) = cursor_at(8 * HOUR + 30 * 60);
            let seen = recording(&mut cursor);
            let _ = cursor.step_back_one_hour();
            let _ = cursor.step_forward_one_day();
            assert_eq!(*seen.borrow(), vec![
                WillChange::Time { from: Instant::at(8 * HOUR + 30 * 60), to: Instant::at(8 * HOUR) },
                WillChange::Time { from: Instant::at(8 * HOUR), to: Instant::at(DAY + 8 * HOUR) },
            ]);
        }

        #[test]
        fn none_for_no_ops() {
            let (mut cursor, _) = cursor_at(DAY);
            cursor.set_term(ClosedInterval::new(Instant::at(DAY), Instant::at(DAY)));
            let seen = recording(&mut cursor);
            assert!(!cursor.step_back_one_hour());
            assert!(!cursor.step_forward_one_hour());
            assert!(!cursor.step_forward_one_day());
            assert!(!cursor.step_back_one_day());
            assert!(seen.borrow().is_empty());
        }

        #[test]
        fn fields() {
            let (mut cursor, _) = cursor_at(0);
            let seen = recording(&mut cursor);
            let term = ClosedInterval::new(Instant::at(0), Instant::at(DAY));
            cursor.set_term(term);
            cursor.set_showing_time(true);
            assert_eq!(*seen.borrow(), vec![
                WillChange::Term { from: ClosedInterval::unbounded(), to: term },
                WillChange::ShowingTime { from: false, to: true },
            ]);
            assert!(cursor.showing_time());
        }

        #[test]
        fn after_unsubscribing() {
            let (mut cursor, _) = cursor_at(0);
            let count = Rc::new(RefCell::new(0));
            let counter = Rc::clone(&count);
            let subscription = cursor.subscribe(move |_| *counter.borrow_mut() += 1);
            cursor.set_time(Instant::at(10));
            assert!(cursor.unsubscribe(subscription));
            cursor.set_time(Instant::at(20));
            assert_eq!(*count.borrow(), 1);
        }
    }
}
