use crate::domain::{Booking, BookingRequest, CalendarDate, DisabledDateSet, expand_range};
use crate::infrastructure::BookingRepository;
use anyhow::{Context, Result, anyhow};
use duckdb::{Connection, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA: &str = r#"
    CREATE SEQUENCE IF NOT EXISTS booking_ids START 1;
    CREATE TABLE IF NOT EXISTS bookings (
        id BIGINT PRIMARY KEY DEFAULT nextval('booking_ids'),
        venue TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
"#;

pub struct DuckDbBookingStorage {
    conn: Mutex<Connection>,
}

impl DuckDbBookingStorage {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path).context("Failed to open DuckDB connection")?;

        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.initialize()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .context("Failed to create in-memory DuckDB connection")?;

        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.initialize()?;
        Ok(storage)
    }

    fn initialize(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA)
            .context("Failed to create bookings schema")?;
        Ok(())
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("DuckDB connection lock poisoned"))
    }

    fn parse_date(raw: &str) -> Result<CalendarDate> {
        raw.parse()
            .with_context(|| format!("Failed to parse stored date {raw:?}"))
    }
}

impl BookingRepository for DuckDbBookingStorage {
    fn disabled_dates(&self, venue: &str) -> Result<DisabledDateSet> {
        let mut disabled = DisabledDateSet::new();
        for booking in self.list_bookings(venue)? {
            disabled.extend(expand_range(booking.start, booking.end));
        }
        log::debug!("{} disabled dates for venue {venue}", disabled.len());
        Ok(disabled)
    }

    fn create_booking(&self, request: &BookingRequest) -> Result<Booking> {
        let conn = self.connection()?;
        let id: i64 = conn
            .query_row(
                "INSERT INTO bookings (venue, start_date, end_date) VALUES (?, ?, ?) RETURNING id",
                params![request.venue, request.start.to_iso(), request.end.to_iso()],
                |row| row.get(0),
            )
            .context("Failed to save booking")?;

        log::info!(
            "booked {} from {} to {} (#{id})",
            request.venue,
            request.start,
            request.end
        );

        Ok(Booking {
            id,
            venue: request.venue.clone(),
            start: request.start,
            end: request.end,
        })
    }

    fn list_bookings(&self, venue: &str) -> Result<Vec<Booking>> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, venue, start_date, end_date FROM bookings WHERE venue = ? ORDER BY start_date, id",
            )
            .context("Failed to prepare select statement")?;

        let rows = stmt.query_map(params![venue], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut bookings = Vec::new();
        for row in rows {
            let (id, venue, start, end) = row?;
            bookings.push(Booking {
                id,
                venue,
                start: Self::parse_date(&start)?,
                end: Self::parse_date(&end)?,
            });
        }

        Ok(bookings)
    }
}
