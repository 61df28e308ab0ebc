use crate::application::Config;
use crate::domain::{
    Booking, BookingRequest, CalendarDate, CalendarSession, RangeSelection, RangeSelector,
    SelectionState, ViewCursor,
};
use crate::infrastructure::{
    BookingRepository, CursorPersistenceHook, DuckDbBookingStorage, HookRegistry, JsonFileStore,
    KeyValueStore, SimpleLoggerHook, load_cursor,
};
use anyhow::{Context, Result};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Created(Booking),
    /// Nothing was booked; these days are already taken.
    Conflicted(Vec<CalendarDate>),
}

/// Ranges completed by a run of day clicks, and where the clicks left off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySelection {
    pub selections: Vec<RangeSelection>,
    pub state: SelectionState,
}

pub struct BookingApp {
    config: Config,
    store: Arc<dyn KeyValueStore>,
    bookings: Box<dyn BookingRepository>,
}

impl BookingApp {
    pub fn new() -> Result<Self> {
        let config = Config::from_env();
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&config.state_path));
        let bookings = DuckDbBookingStorage::new(&config.database_path).with_context(|| {
            format!(
                "Failed to open booking database at {}",
                config.database_path.display()
            )
        })?;

        Ok(Self::with_parts(config, store, Box::new(bookings)))
    }

    pub fn with_parts(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        bookings: Box<dyn BookingRepository>,
    ) -> Self {
        Self {
            config,
            store,
            bookings,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bookings(&self) -> &dyn BookingRepository {
        self.bookings.as_ref()
    }

    /// Explicit position first, then the saved one, then the current month.
    pub fn initial_cursor(&self, explicit: Option<ViewCursor>) -> ViewCursor {
        if let Some(cursor) = explicit {
            return cursor;
        }

        match load_cursor(self.store.as_ref()) {
            Ok(Some(cursor)) => cursor,
            Ok(None) => ViewCursor::default(),
            Err(e) => {
                log::warn!("could not read saved calendar position: {e:#}");
                ViewCursor::default()
            }
        }
    }

    /// Start a calendar for `venue` with its current bookings disabled.
    pub fn open_session(
        &self,
        venue: &str,
        explicit: Option<ViewCursor>,
    ) -> Result<CalendarSession> {
        let disabled = self
            .bookings
            .disabled_dates(venue)
            .with_context(|| format!("Failed to load bookings for {venue}"))?;

        let mut hooks = HookRegistry::new();
        hooks.register(SimpleLoggerHook);
        hooks.register(CursorPersistenceHook::new(self.store.clone()));

        Ok(CalendarSession::with_hooks(
            self.initial_cursor(explicit),
            disabled,
            hooks,
        ))
    }

    /// Forward a clean selection to booking creation. Conflicting selections
    /// are reported back untouched.
    pub fn book(&self, venue: &str, selection: &RangeSelection) -> Result<BookingOutcome> {
        if selection.has_conflicts() {
            return Ok(BookingOutcome::Conflicted(selection.conflicts.clone()));
        }

        let booking = self
            .bookings
            .create_booking(&BookingRequest::from_selection(venue, selection))?;
        Ok(BookingOutcome::Created(booking))
    }

    /// Click `days` of one month in order, collecting every completed range.
    pub fn select_days(
        &self,
        venue: &str,
        cursor: Option<ViewCursor>,
        days: &[u32],
    ) -> Result<DaySelection> {
        let mut session = self.open_session(venue, cursor)?;
        let selections = days
            .iter()
            .filter_map(|&day| session.click_day(day))
            .collect();

        Ok(DaySelection {
            selections,
            state: session.state(),
        })
    }

    /// Click `start` then `end` and book the range if it is free.
    ///
    /// Returns `None` when the two clicks do not complete a range: `end`
    /// before `start`, or either day already booked.
    pub fn book_dates(
        &self,
        venue: &str,
        start: CalendarDate,
        end: CalendarDate,
    ) -> Result<Option<BookingOutcome>> {
        let disabled = self
            .bookings
            .disabled_dates(venue)
            .with_context(|| format!("Failed to load bookings for {venue}"))?;
        let mut selector = RangeSelector::new(disabled);

        selector.click(start);
        match selector.click(end) {
            Some(selection) => self.book(venue, &selection).map(Some),
            None => {
                log::debug!("{start} .. {end} left the selection at {:?}", selector.state());
                Ok(None)
            }
        }
    }
}
