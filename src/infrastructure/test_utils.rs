/// Test utilities shared by the unit tests
///
/// `TestStorage` gives every test a fresh DuckDB file in its own temporary
/// directory, removed when the harness is dropped. `RecordingHook` captures
/// the events a `CalendarSession` publishes so tests can assert on them.
///
/// ## Usage Examples
///
/// ```rust,ignore
/// use crate::infrastructure::test_utils::test_harness::TestStorage;
///
/// #[test]
/// fn my_test() {
///     let test_storage = TestStorage::new();
///     let storage = test_storage.storage();
///     // Database is automatically cleaned up when test_storage is dropped
/// }
/// ```
#[cfg(test)]
pub mod test_harness {
    use crate::domain::{BookingRequest, CalendarDate, RangeSelection, ViewCursor};
    use crate::infrastructure::{BookingRepository, DuckDbBookingStorage, SessionHook};
    use anyhow::Result;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    pub struct TestStorage {
        pub storage: DuckDbBookingStorage,
        _temp_dir: TempDir, // Keep temp dir alive
    }

    impl TestStorage {
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp directory");
            let db_path = temp_dir.path().join("test.db");

            let storage = DuckDbBookingStorage::new(&db_path)
                .expect("Failed to initialize test DuckDB storage");

            Self {
                storage,
                _temp_dir: temp_dir,
            }
        }

        pub fn storage(&self) -> &DuckDbBookingStorage {
            &self.storage
        }

        /// Book `first..=last` of August 2025 at `venue`.
        pub fn book_august(&self, venue: &str, first: u32, last: u32) -> Result<()> {
            let day = |d| CalendarDate::from_ymd_opt(2025, 8, d).expect("valid August day");
            self.storage
                .create_booking(&BookingRequest::new(venue, day(first), day(last)))?;
            Ok(())
        }
    }

    /// Hook that remembers every event it receives. Clones share the log.
    #[derive(Clone, Default)]
    pub struct RecordingHook {
        selections: Arc<Mutex<Vec<RangeSelection>>>,
        cursors: Arc<Mutex<Vec<ViewCursor>>>,
    }

    impl RecordingHook {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn selections(&self) -> Vec<RangeSelection> {
            self.selections.lock().unwrap().clone()
        }

        pub fn cursors(&self) -> Vec<ViewCursor> {
            self.cursors.lock().unwrap().clone()
        }
    }

    impl SessionHook for RecordingHook {
        fn on_range_selected(&self, selection: &RangeSelection) -> Result<()> {
            self.selections.lock().unwrap().push(selection.clone());
            Ok(())
        }

        fn on_cursor_changed(&self, cursor: &ViewCursor) -> Result<()> {
            self.cursors.lock().unwrap().push(*cursor);
            Ok(())
        }

        fn name(&self) -> &str {
            "Recording"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_harness::*;
    use crate::domain::CalendarDate;
    use crate::infrastructure::BookingRepository;

    #[test]
    fn test_harness_isolation() {
        // Each test gets a fresh database
        let test_storage1 = TestStorage::new();
        let test_storage2 = TestStorage::new();

        test_storage1.book_august("hall", 10, 11).unwrap();

        let tenth = CalendarDate::from_ymd_opt(2025, 8, 10).unwrap();
        assert!(test_storage1.storage().disabled_dates("hall").unwrap().contains(&tenth));
        assert!(test_storage2.storage().disabled_dates("hall").unwrap().is_empty());
    }
}
