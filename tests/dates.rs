extern crate dayandtime;
use dayandtime::{LocalDate, LocalTime, LocalDateTime, Month, Year};
use dayandtime::{DatePiece, TimePiece};


mod leap_years {
    use super::*;

    #[test]
    fn year_1600() {
        assert!(Year(1600).is_leap_year());
    }

    #[test]
    fn year_1900() {
        assert!(Year(1900).is_leap_year() == false);
    }

    #[test]
    fn year_2000() {
        assert!(Year(2000).is_leap_year());
    }

    #[test]
    fn year_2038() {
        assert!(Year(2038).is_leap_year() == false);
    }
}


mod construction {
    use super::*;

    #[test]
    fn the_distant_past() {
        let date = LocalDate::ymd(7, Month::April, 1).unwrap();

        assert_eq!(date.year(),  7);
        assert_eq!(date.month(), Month::April);
        assert_eq!(date.day(),   1);
    }

    #[test]
    fn the_distant_future() {
        let date = LocalDate::ymd(1048576, Month::October, 13).unwrap();

        assert_eq!(date.year(), 1048576);
        assert_eq!(date.month(), Month::October);
        assert_eq!(date.day(), 13);
    }

    #[test]
    fn no_thirtieth_of_february() {
        assert!(LocalDate::ymd(2008, Month::February, 30).is_err());
    }

    #[test]
    fn yearday_in_a_leap_year() {
        let date = LocalDate::yd(2008, 366).unwrap();
        assert_eq!(date.month(), Month::December);
        assert_eq!(date.day(), 31);
    }
}


mod epoch_days {
    use super::*;

    #[test]
    fn epoch() {
        let date = LocalDate::from_days_since_1970(0);
        assert_eq!(date, LocalDate::ymd(1970, Month::January, 1).unwrap());
    }

    #[test]
    fn before_the_epoch() {
        let date = LocalDate::from_days_since_1970(-1);
        assert_eq!(date, LocalDate::ymd(1969, Month::December, 31).unwrap());
        assert_eq!(date.days_since_1970(), -1);
    }

    #[test]
    fn leap_day() {
        let date = LocalDate::ymd(2000, Month::February, 29).unwrap();
        assert_eq!(date.days_since_1970(), 11016);
        assert_eq!(LocalDate::from_days_since_1970(11016), date);
    }
}


mod local_date_times {
    use super::*;

    #[test]
    fn from_local_seconds() {
        let dt = LocalDateTime::at(1206874800);
        assert_eq!(dt.date(), LocalDate::ymd(2008, Month::March, 30).unwrap());
        assert_eq!(dt.hour(), 11);
        assert_eq!(dt.minute(), 0);
    }

    #[test]
    fn negative_seconds() {
        let dt = LocalDateTime::at(-1);
        assert_eq!(dt.year(), 1969);
        assert_eq!(dt.time(), LocalTime::hms(23, 59, 59).unwrap());
    }

    #[test]
    fn milliseconds() {
        let dt = LocalDateTime::at_ms(0, 250);
        assert_eq!(dt.millisecond(), 250);
        assert_eq!(dt.local_seconds(), 0);
    }
}
