use crate::domain::{Booking, BookingRequest, DisabledDateSet};
use anyhow::Result;

pub trait BookingRepository {
    /// Every day already taken at `venue`.
    fn disabled_dates(&self, venue: &str) -> Result<DisabledDateSet>;
    fn create_booking(&self, request: &BookingRequest) -> Result<Booking>;
    fn list_bookings(&self, venue: &str) -> Result<Vec<Booking>>;
}
