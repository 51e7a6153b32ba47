//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct for the timestamps that flow
//! through the feed pipeline: object-store listings, file modification times,
//! and the feed's own build time.
//!
//! # Features
//!
//! - Zero external dependencies for date parsing
//! - Accepts S3 listing timestamps (`2022-11-03T00:00:00.000Z`)
//! - RFC 2822 and RFC 3339 formatting for feeds
//! - Total ordering, so descriptors can be sorted by modification time
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTimeUtc::parse("2022-11-03T00:00:00.000Z").unwrap();
//! assert_eq!(dt.month_name(), "November");
//! assert_eq!(dt.to_rfc2822(), "Thu, 03 Nov 2022 00:00:00 GMT");
//! ```

use anyhow::{Result, bail};
use serde::{Serialize, Serializer};
use std::time::{SystemTime, UNIX_EPOCH};

/// UTC datetime without timezone complexity.
///
/// Field order matters: the derived `Ord` compares year first, then month,
/// and so on down to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    #[cfg(test)]
    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Convert a `SystemTime` (e.g. a file mtime). Times before the epoch clamp to it.
    pub fn from_system_time(time: SystemTime) -> Self {
        let secs = time
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_unix_secs(secs)
    }

    /// Convert seconds since the Unix epoch to a civil UTC datetime.
    #[allow(clippy::cast_possible_truncation)] // Components are range-bounded by the algorithm
    pub fn from_unix_secs(secs: u64) -> Self {
        let days = secs / 86_400;
        let rem = secs % 86_400;

        // Days-to-civil over 400-year eras (era 0 starts 0000-03-01)
        let z = days + 719_468;
        let era = z / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + u64::from(month <= 2);

        Self::new(
            year as u16,
            month as u8,
            day as u8,
            (rem / 3600) as u8,
            ((rem / 60) % 60) as u8,
            (rem % 60) as u8,
        )
    }

    /// Parse "YYYY-MM-DD", "YYYY-MM-DDTHH:MM:SSZ" or "YYYY-MM-DDTHH:MM:SS.fffZ".
    ///
    /// Fractional seconds are accepted and discarded.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 {
            return None;
        }

        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        if bytes[7] != b'-' {
            return None;
        }
        let day = parse_u8(&bytes[8..10])?;

        let (hour, minute, second) = if bytes.len() == 10 {
            (0, 0, 0)
        } else {
            parse_time(&bytes[10..])?
        };

        let dt = Self::new(year, month, day, hour, minute, second);
        dt.validate().ok()?;
        Some(dt)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    /// Full English month name ("January" .. "December").
    ///
    /// Panics if the month is outside 1..=12; every constructor path validates.
    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[usize::from(self.month) - 1]
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as RFC 3339 (ISO 8601) for Atom feeds.
    ///
    /// Returns: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// Format as RFC 2822 for RSS `pubDate` / `lastBuildDate`.
    pub fn to_rfc2822(self) -> String {
        const WEEKDAYS: [&str; 7] = ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"];

        // Zeller's congruence for weekday calculation
        let weekday = self.weekday_index();

        format!(
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            WEEKDAYS[weekday],
            self.day,
            &self.month_name()[..3],
            self.year,
            self.hour,
            self.minute,
            self.second
        )
    }

    #[inline]
    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    #[allow(clippy::cast_sign_loss)] // Result of % 7 is always 0-6
    fn weekday_index(&self) -> usize {
        let (y, m) = if self.month < 3 {
            (i32::from(self.year) - 1, i32::from(self.month) + 12)
        } else {
            (i32::from(self.year), i32::from(self.month))
        };
        let d = i32::from(self.day);
        ((d + (13 * (m + 1)) / 5 + y + y / 4 - y / 100 + y / 400) % 7) as usize
    }
}

impl Serialize for DateTimeUtc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

/// Parse the `THH:MM:SS[.fff]Z` tail of a timestamp.
fn parse_time(bytes: &[u8]) -> Option<(u8, u8, u8)> {
    if bytes.len() < 10 || bytes[0] != b'T' || bytes[3] != b':' || bytes[6] != b':' {
        return None;
    }
    if bytes.last() != Some(&b'Z') {
        return None;
    }

    let fraction = &bytes[9..bytes.len() - 1];
    if !fraction.is_empty()
        && (fraction[0] != b'.'
            || fraction.len() == 1
            || !fraction[1..].iter().all(u8::is_ascii_digit))
    {
        return None;
    }

    Some((
        parse_u8(&bytes[1..3])?,
        parse_u8(&bytes[4..6])?,
        parse_u8(&bytes[7..9])?,
    ))
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = DateTimeUtc::parse("2024-06-15").unwrap();
        assert_eq!(dt, DateTimeUtc::from_ymd(2024, 6, 15));
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = DateTimeUtc::parse("2024-06-15T14:30:45Z").unwrap();
        assert_eq!(dt, DateTimeUtc::new(2024, 6, 15, 14, 30, 45));
    }

    #[test]
    fn test_parse_s3_listing_timestamp() {
        let dt = DateTimeUtc::parse("2022-11-03T08:15:02.000Z").unwrap();
        assert_eq!(dt, DateTimeUtc::new(2022, 11, 3, 8, 15, 2));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(DateTimeUtc::parse("").is_none());
        assert!(DateTimeUtc::parse("2024/06/15").is_none());
        assert!(DateTimeUtc::parse("2024-06-15T14:30:45").is_none());
        assert!(DateTimeUtc::parse("2024-06-15T14:30:45.Z").is_none());
        assert!(DateTimeUtc::parse("2024-06-15T14:30:45.1aZ").is_none());
        assert!(DateTimeUtc::parse("2024-13-15").is_none());
        assert!(DateTimeUtc::parse("2023-02-29").is_none());
    }

    #[test]
    fn test_from_unix_secs_epoch() {
        assert_eq!(
            DateTimeUtc::from_unix_secs(0),
            DateTimeUtc::new(1970, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn test_from_unix_secs_known_dates() {
        assert_eq!(
            DateTimeUtc::from_unix_secs(1_667_433_600),
            DateTimeUtc::new(2022, 11, 3, 0, 0, 0)
        );
        // Leap day
        assert_eq!(
            DateTimeUtc::from_unix_secs(1_709_210_096),
            DateTimeUtc::new(2024, 2, 29, 12, 34, 56)
        );
        assert_eq!(
            DateTimeUtc::from_unix_secs(946_684_799),
            DateTimeUtc::new(1999, 12, 31, 23, 59, 59)
        );
    }

    #[test]
    fn test_ordering_follows_time() {
        let a = DateTimeUtc::new(2022, 11, 3, 0, 0, 0);
        let b = DateTimeUtc::new(2022, 11, 3, 0, 0, 1);
        let c = DateTimeUtc::new(2023, 1, 1, 0, 0, 0);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.max(c), c);
    }

    #[test]
    fn test_month_names() {
        let expected = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        for (i, name) in expected.iter().enumerate() {
            let dt = DateTimeUtc::from_ymd(2024, (i + 1) as u8, 1);
            assert_eq!(dt.month_name(), *name);
        }
    }

    #[test]
    fn test_datetime_utc_validate_invalid_day() {
        assert!(DateTimeUtc::new(2024, 6, 0, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 4, 31, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2023, 2, 29, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 2, 29, 12, 0, 0).validate().is_ok());
    }

    #[test]
    fn test_datetime_utc_validate_invalid_time() {
        assert!(DateTimeUtc::new(2024, 6, 15, 24, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 6, 15, 12, 60, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 6, 15, 12, 30, 60).validate().is_err());
    }

    #[test]
    fn test_to_rfc3339() {
        let dt = DateTimeUtc::new(2022, 11, 3, 8, 5, 9);
        assert_eq!(dt.to_rfc3339(), "2022-11-03T08:05:09Z");
    }

    #[test]
    fn test_to_rfc2822() {
        assert_eq!(
            DateTimeUtc::new(2022, 11, 3, 0, 0, 0).to_rfc2822(),
            "Thu, 03 Nov 2022 00:00:00 GMT"
        );
        assert_eq!(
            DateTimeUtc::new(2024, 1, 15, 10, 30, 45).to_rfc2822(),
            "Mon, 15 Jan 2024 10:30:45 GMT"
        );
    }

    #[test]
    fn test_serialize_as_rfc3339() {
        let dt = DateTimeUtc::new(2022, 11, 3, 0, 0, 0);
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, "\"2022-11-03T00:00:00Z\"");
    }
}
