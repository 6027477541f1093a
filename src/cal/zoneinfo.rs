//! Reading time zones from the system’s zoneinfo database, and from
//! compiled zoneinfo (TZif) files such as the ones under
//! `/usr/share/zoneinfo`.

use std::error::Error as ErrorTrait;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::cal::zone::{TimeZone, TimeZoneSource};


impl TimeZone {

    /// The computer’s local time zone. A `TZ` environment variable, either
    /// naming a zone or giving a POSIX rule, takes priority over
    /// `/etc/localtime`.
    pub fn localtime() -> Result<Self, Error> {
        let zone = jiff::tz::TimeZone::try_system()?;
        Ok(TimeZone(TimeZoneSource::Database(zone)))
    }

    /// Looks a zone up by name, such as “America/New_York”, in the
    /// system’s zoneinfo database.
    pub fn named(name: &str) -> Result<Self, Error> {
        let zone = jiff::tz::TimeZone::get(name)?;
        Ok(TimeZone(TimeZoneSource::Database(zone)))
    }

    /// Reads the compiled zoneinfo file at the given path. Transitions after
    /// the last one listed in the file follow the rule in its footer.
    pub fn zoneinfo(path: &Path) -> Result<Self, Error> {
        let contents = fs::read(path)?;
        let name = zone_name_from_path(path).unwrap_or_else(|| path.display().to_string());
        let zone = jiff::tz::TimeZone::tzif(&name, &contents)?;

        debug!(path = %path.display(), zone = %name, bytes = contents.len(), "loaded zoneinfo file");
        Ok(TimeZone(TimeZoneSource::Database(zone)))
    }
}


/// Takes the trailing components of a path that look like a zone name:
/// those beginning with a capital letter, such as `America/New_York`.
fn zone_name_from_path(path: &Path) -> Option<String> {
    let mut bits = path.iter().rev()
                       .map(|component| component.to_str())
                       .take_while(|component| component.map_or(true, starts_upper))
                       .collect::<Option<Vec<_>>>()?;

    if bits.is_empty() {
        return None;
    }

    bits.reverse();
    Some(bits.join("/"))
}

fn starts_upper(component: &str) -> bool {
    component.chars().next().map_or(false, char::is_uppercase)
}


/// Something that went wrong while finding or reading a time zone.
#[derive(Debug)]
pub enum Error {

    /// The file couldn’t be read.
    Io(io::Error),

    /// The zone couldn’t be found, or its data isn’t valid compiled
    /// zoneinfo.
    Zone(jiff::Error),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<jiff::Error> for Error {
    fn from(error: jiff::Error) -> Self {
        Error::Zone(error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Io(ref error)    => write!(f, "could not read zoneinfo file: {}", error),
            Error::Zone(ref error)  => write!(f, "invalid time zone: {}", error),
        }
    }
}

impl ErrorTrait for Error {
    fn source(&self) -> Option<&(dyn ErrorTrait + 'static)> {
        match *self {
            Error::Io(ref error)    => Some(error),
            Error::Zone(ref error)  => Some(error),
        }
    }
}
