//! The span of a calendar day.

use crate::cal::Calendar;
use crate::instant::Instant;
use crate::interval::ClosedInterval;


/// Returns the interval from the start of the day containing `instant` to
/// the start of the next day, under the given calendar.
///
/// The end is one *calendar* day after the start, so it’s 23 or 25 hours
/// away on days when the clocks change. Returns `None` if the calendar
/// can’t work out either end.
pub fn day_range<C: Calendar + ?Sized>(instant: Instant, calendar: &C) -> Option<ClosedInterval<Instant>> {
    let start = calendar.start_of_day(instant)?;
    let end = calendar.add_days(start, 1)?;
    Some(ClosedInterval::new(start, end))
}
