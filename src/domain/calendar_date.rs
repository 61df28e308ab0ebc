use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, ParseError, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar day pinned to UTC midnight.
///
/// Values are only produced by [`canonicalize`] (or the constructors that go
/// through it), so equality of the serialized string and equality of the day
/// always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

/// Anything that can be pinned to a UTC calendar day.
pub trait DateLike {
    /// The year/month/day of this value as seen on the UTC calendar.
    fn utc_date(&self) -> NaiveDate;
}

impl<Tz: TimeZone> DateLike for DateTime<Tz> {
    fn utc_date(&self) -> NaiveDate {
        self.naive_utc().date()
    }
}

/// Naive timestamps are taken to already be in UTC.
impl DateLike for NaiveDateTime {
    fn utc_date(&self) -> NaiveDate {
        self.date()
    }
}

impl DateLike for NaiveDate {
    fn utc_date(&self) -> NaiveDate {
        *self
    }
}

impl DateLike for CalendarDate {
    fn utc_date(&self) -> NaiveDate {
        self.0
    }
}

/// Strip time-of-day and offset, keeping the UTC year/month/day.
pub fn canonicalize<D: DateLike + ?Sized>(date: &D) -> CalendarDate {
    CalendarDate(date.utc_date())
}

/// Every day from `from` to `to`, both inclusive. Empty when `from > to`.
pub fn expand_range(from: CalendarDate, to: CalendarDate) -> Vec<CalendarDate> {
    from.days_through(to).collect()
}

impl CalendarDate {
    /// Month is 1-based here, as in chrono.
    pub fn from_ymd_opt(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(|date| canonicalize(&date))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Lazily walk forward one calendar day at a time up to and including `to`.
    pub fn days_through(self, to: CalendarDate) -> impl Iterator<Item = CalendarDate> {
        self.0
            .iter_days()
            .take_while(move |day| *day <= to.0)
            .map(CalendarDate)
    }

    /// `YYYY-MM-DDT00:00:00.000Z`
    pub fn to_iso(&self) -> String {
        format!("{}T00:00:00.000Z", self.0.format("%Y-%m-%d"))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T00:00:00.000Z", self.0.format("%Y-%m-%d"))
    }
}

/// Accepts full RFC 3339 timestamps (reduced to their UTC day) and bare
/// `YYYY-MM-DD` dates.
impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
            return Ok(canonicalize(&timestamp));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|date| canonicalize(&date))
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn ymd(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn canonicalize_strips_time_of_day() {
        let timestamp = Utc.with_ymd_and_hms(2025, 9, 10, 13, 45, 0).unwrap();
        let date = canonicalize(&timestamp);
        assert_eq!(date.to_iso(), "2025-09-10T00:00:00.000Z");
        assert_eq!(date, ymd(2025, 9, 10));
    }

    #[test]
    fn canonicalize_is_idempotent() {
        fn check<D: DateLike>(input: D) {
            let once = canonicalize(&input);
            assert_eq!(canonicalize(&once), once);
        }

        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        check(Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap());
        check(offset.with_ymd_and_hms(2025, 1, 1, 3, 0, 0).unwrap());
        check(Utc.with_ymd_and_hms(1999, 12, 31, 0, 0, 0).unwrap().naive_utc());
        check(NaiveDate::from_ymd_opt(2030, 6, 1).unwrap());
    }

    #[test]
    fn canonicalize_uses_the_utc_calendar_day() {
        // 01:30 at +02:00 is still the previous day in UTC.
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2025, 8, 15, 1, 30, 0).unwrap();
        assert_eq!(canonicalize(&local), ymd(2025, 8, 14));
    }

    #[test]
    fn expand_range_is_inclusive_and_ordered() {
        let days = expand_range(ymd(2025, 9, 10), ymd(2025, 9, 12));
        let isos: Vec<String> = days.iter().map(CalendarDate::to_iso).collect();
        assert_eq!(
            isos,
            vec![
                "2025-09-10T00:00:00.000Z",
                "2025-09-11T00:00:00.000Z",
                "2025-09-12T00:00:00.000Z",
            ]
        );
    }

    #[test]
    fn expand_range_inverted_is_empty() {
        assert!(expand_range(ymd(2025, 9, 12), ymd(2025, 9, 10)).is_empty());
    }

    #[test]
    fn expand_range_single_day() {
        assert_eq!(expand_range(ymd(2025, 9, 10), ymd(2025, 9, 10)), vec![ymd(2025, 9, 10)]);
    }

    #[test]
    fn expand_range_crosses_leap_day_and_year_end() {
        let leap = expand_range(ymd(2024, 2, 28), ymd(2024, 3, 1));
        assert_eq!(leap, vec![ymd(2024, 2, 28), ymd(2024, 2, 29), ymd(2024, 3, 1)]);

        let rollover = expand_range(ymd(2025, 12, 30), ymd(2026, 1, 2));
        assert_eq!(rollover.len(), 4);
        assert_eq!(rollover[2], ymd(2026, 1, 1));
    }

    #[test]
    fn parses_iso_timestamps_and_plain_dates() {
        let from_iso: CalendarDate = "2025-08-15T00:00:00.000Z".parse().unwrap();
        let from_plain: CalendarDate = "2025-08-15".parse().unwrap();
        let from_offset: CalendarDate = "2025-08-15T22:00:00-05:00".parse().unwrap();
        assert_eq!(from_iso, ymd(2025, 8, 15));
        assert_eq!(from_plain, from_iso);
        assert_eq!(from_offset, ymd(2025, 8, 16));
        assert!("15/08/2025".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn serializes_as_iso_string() {
        let json = serde_json::to_string(&ymd(2025, 8, 14)).unwrap();
        assert_eq!(json, "\"2025-08-14T00:00:00.000Z\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ymd(2025, 8, 14));
    }
}
