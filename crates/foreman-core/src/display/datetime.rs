//! Timestamp formatting in the local time zone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS TZ` in the system time zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl LocalDateTime<'_> {
    /// Format in an explicit time zone instead of the system one.
    pub fn in_zone(&self, tz: TimeZone) -> String {
        self.0.to_zoned(tz).strftime("%Y-%m-%d %H:%M:%S %Z").to_string()
    }
}

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.in_zone(TimeZone::system()))
    }
}
