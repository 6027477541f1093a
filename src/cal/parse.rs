//! Reading ISO-8601 strings into dates, times, and instants.

use std::error::Error as ErrorTrait;
use std::fmt;
use std::str::FromStr;

use crate::cal::TimePiece;
use crate::cal::datetime::{LocalDate, LocalTime, LocalDateTime, Month, Error as DateTimeError};
use crate::instant::Instant;


impl FromStr for LocalDate {
    type Err = Error<DateTimeError>;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields = iso8601::date(input).map_err(Error::Parse)?;
        date_from(fields)
    }
}

impl FromStr for LocalTime {
    type Err = Error<DateTimeError>;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields = iso8601::time(input).map_err(Error::Parse)?;
        time_from(&fields)
    }
}

/// Any offset from UTC in the string is ignored.
impl FromStr for LocalDateTime {
    type Err = Error<DateTimeError>;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields = iso8601::datetime(input).map_err(Error::Parse)?;
        Ok(Self::new(date_from(fields.date)?, time_from(&fields.time)?))
    }
}

/// Instants are parsed from a date and time with an offset from UTC, such
/// as `2008-03-30T02:30:00+01:00`. Without an offset, the time is taken to
/// be in UTC.
impl FromStr for Instant {
    type Err = Error<DateTimeError>;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields = iso8601::datetime(input).map_err(Error::Parse)?;
        let offset = (fields.time.tz_offset_hours as i64 * 60 + fields.time.tz_offset_minutes as i64) * 60;

        let local = LocalDateTime::new(date_from(fields.date)?, time_from(&fields.time)?);
        Ok(Instant::at_ms(local.local_seconds() - offset, local.millisecond()))
    }
}


fn date_from(fields: iso8601::Date) -> Result<LocalDate, Error<DateTimeError>> {
    let date = match fields {
        iso8601::Date::YMD { year, month, day } => {
            Month::from_one(month as i8).and_then(|month| LocalDate::ymd(year as i64, month, day as i8))
        }
        iso8601::Date::Ordinal { year, ddd } => {
            LocalDate::yd(year as i64, ddd as i64)
        }
        iso8601::Date::Week { .. } => {
            return Err(Error::Parse("week dates are not supported".to_owned()));
        }
    };

    date.map_err(Error::Date)
}

fn time_from(fields: &iso8601::Time) -> Result<LocalTime, Error<DateTimeError>> {
    LocalTime::hms_ms(fields.hour as i8, fields.minute as i8, fields.second as i8, fields.millisecond as i16)
        .map_err(Error::Date)
}


/// Something that went wrong reading a string: either it wasn’t ISO-8601
/// at all, or it was but named a date or time that doesn’t exist.
#[derive(PartialEq, Debug, Clone)]
pub enum Error<E: ErrorTrait> {
    Date(E),
    Parse(String),
}

impl<E: ErrorTrait> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Date(e)   => write!(f, "no such date or time: {}", e),
            Error::Parse(e)  => write!(f, "not an ISO-8601 string: {}", e),
        }
    }
}

impl<E: ErrorTrait + 'static> ErrorTrait for Error<E> {
    fn source(&self) -> Option<&(dyn ErrorTrait + 'static)> {
        match self {
            Error::Date(e)   => Some(e),
            Error::Parse(_)  => None,
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::cal::DatePiece;

    #[test]
    fn date() {
        let date: LocalDate = "2008-03-30".parse().unwrap();
        assert_eq!(date, LocalDate::ymd(2008, Month::March, 30).unwrap());
    }

    #[test]
    fn ordinal_date() {
        let date: LocalDate = "2016-366".parse().unwrap();
        assert_eq!(date.month(), Month::December);
        assert_eq!(date.day(), 31);
    }

    #[test]
    fn impossible_date() {
        assert_eq!("2015-02-29".parse::<LocalDate>(), Err(Error::Date(DateTimeError::OutOfRange)));
    }

    #[test]
    fn time() {
        let time: LocalTime = "08:30:15".parse().unwrap();
        assert_eq!((time.hour(), time.minute(), time.second()), (8, 30, 15));
    }

    #[test]
    fn instant_in_utc() {
        let instant: Instant = "1970-01-02T01:00:00Z".parse().unwrap();
        assert_eq!(instant, Instant::at(90000));
    }

    #[test]
    fn instant_with_offset() {
        let instant: Instant = "2008-03-30T02:30:00+01:00".parse().unwrap();
        assert_eq!(instant, Instant::at(1206840600));
    }

    #[test]
    fn garbage() {
        assert!("the day after tomorrow".parse::<Instant>().is_err());
    }
}
