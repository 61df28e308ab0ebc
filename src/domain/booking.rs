use crate::domain::calendar_date::CalendarDate;
use crate::domain::selection::RangeSelection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub venue: String,
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl BookingRequest {
    pub fn new(venue: impl Into<String>, start: CalendarDate, end: CalendarDate) -> Self {
        Self {
            venue: venue.into(),
            start,
            end,
        }
    }

    pub fn from_selection(venue: impl Into<String>, selection: &RangeSelection) -> Self {
        Self::new(venue, selection.start, selection.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub venue: String,
    pub start: CalendarDate,
    pub end: CalendarDate,
}
