#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
//#![warn(missing_docs)]

#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(unused_results)]

//! A cursor over days and hours, for browsing time-based data such as a
//! weather forecast.
//!
//! The cursor is kept within a *term*, and can be stepped an hour or a
//! calendar day at a time under a pluggable calendar, which decides where
//! days begin and how long they are.
//!
//! # Examples
//!
//! ```
//! use dayandtime::{DayAndTime, ZonedCalendar, SystemClock};
//!
//! let mut cursor = DayAndTime::new(ZonedCalendar::utc(), SystemClock, true);
//! assert!(cursor.is_now());
//! assert!(cursor.is_today());
//!
//! if cursor.can_step_forward_one_day() {
//!     assert!(cursor.step_forward_one_day());
//! }
//! ```
//!
//! Dates themselves are available through the calendar:
//!
//! ```
//! use dayandtime::{LocalDate, Month, DatePiece};
//!
//! let date = LocalDate::ymd(2008, Month::March, 30).unwrap();
//! assert_eq!(date.yearday(), 90);
//! ```

mod system;

pub mod cal;
pub mod clock;
pub mod day_and_time;
pub mod day_range;
pub mod duration;
pub mod instant;
pub mod interval;
pub mod observe;

pub use crate::cal::{Calendar, DatePiece, TimePiece};
pub use crate::cal::calendar::ZonedCalendar;
pub use crate::cal::datetime::{LocalDate, LocalTime, LocalDateTime, Month, Year, Error};
pub use crate::cal::zone::{TimeZone, LocalTimes};
pub use crate::clock::{Clock, SystemClock, FixedClock};
pub use crate::day_and_time::DayAndTime;
pub use crate::day_range::day_range;
pub use crate::duration::Duration;
pub use crate::instant::Instant;
pub use crate::interval::ClosedInterval;
pub use crate::observe::{WillChange, Publisher, Subscription};
