use crate::domain::calendar_date::{CalendarDate, canonicalize};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The month currently on screen.
///
/// `month` is 0-based and deliberately unclamped: stepping past December
/// leaves `month == 12`, which [`ViewCursor::resolved`] reads as January of
/// the following year, the same way ordinary date construction rolls over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCursor {
    pub month: i32,
    pub year: i32,
}

impl ViewCursor {
    pub fn new(month: i32, year: i32) -> Self {
        Self { month, year }
    }

    /// The month containing today's UTC date.
    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Self::new(today.month0() as i32, today.year())
    }

    pub fn advance_month(&mut self) -> Self {
        self.month = self.month.saturating_add(1);
        *self
    }

    pub fn retreat_month(&mut self) -> Self {
        self.month = self.month.saturating_sub(1);
        *self
    }

    pub fn advance_year(&mut self) -> Self {
        self.year = self.year.saturating_add(1);
        *self
    }

    pub fn retreat_year(&mut self) -> Self {
        self.year = self.year.saturating_sub(1);
        *self
    }

    /// Normalized `(year, month0)` with `month0` in `0..12`. Positions
    /// outside chrono's year range clamp to its first or last month.
    pub fn resolved(&self) -> (i32, u32) {
        let earliest = i64::from(NaiveDate::MIN.year()) * 12;
        let latest = i64::from(NaiveDate::MAX.year()) * 12 + 11;
        let total = (i64::from(self.year) * 12 + i64::from(self.month)).clamp(earliest, latest);
        (total.div_euclid(12) as i32, total.rem_euclid(12) as u32)
    }

    pub fn first_day(&self) -> CalendarDate {
        let (year, month0) = self.resolved();
        CalendarDate::from_ymd_opt(year, month0 + 1, 1)
            .unwrap_or_else(|| canonicalize(&NaiveDate::MIN))
    }

    pub fn days_in_month(&self) -> u32 {
        let (year, month0) = self.resolved();
        days_in_month(year, month0)
    }

    /// Weekday of the 1st, 0 = Sunday through 6 = Saturday.
    pub fn first_weekday_offset(&self) -> u32 {
        self.first_day().date().weekday().num_days_from_sunday()
    }

    /// The date of day-of-month `day` in the displayed month, if such a cell exists.
    pub fn resolve_day(&self, day: u32) -> Option<CalendarDate> {
        let (year, month0) = self.resolved();
        CalendarDate::from_ymd_opt(year, month0 + 1, day)
    }

    pub fn label(&self) -> String {
        self.first_day().date().format("%B %Y").to_string()
    }
}

impl Default for ViewCursor {
    fn default() -> Self {
        Self::current()
    }
}

fn days_in_month(year: i32, month0: u32) -> u32 {
    match month0 {
        1 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}
