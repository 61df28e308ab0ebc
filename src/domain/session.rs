use crate::domain::calendar_date::CalendarDate;
use crate::domain::grid::MonthGrid;
use crate::domain::selection::{DisabledDateSet, RangeSelection, RangeSelector, SelectionState};
use crate::domain::view_cursor::ViewCursor;
use crate::infrastructure::HookRegistry;

/// One open calendar: the displayed month, the range being picked and the
/// hooks that hear about both.
///
/// The disabled dates are fixed for the life of the session; open a new
/// session to pick up fresh bookings.
pub struct CalendarSession {
    cursor: ViewCursor,
    selector: RangeSelector,
    hooks: HookRegistry,
}

impl CalendarSession {
    pub fn new(initial_cursor: ViewCursor, disabled: DisabledDateSet) -> Self {
        Self::with_hooks(initial_cursor, disabled, HookRegistry::new())
    }

    pub fn with_hooks(
        initial_cursor: ViewCursor,
        disabled: DisabledDateSet,
        hooks: HookRegistry,
    ) -> Self {
        Self {
            cursor: initial_cursor,
            selector: RangeSelector::new(disabled),
            hooks,
        }
    }

    pub fn cursor(&self) -> ViewCursor {
        self.cursor
    }

    pub fn state(&self) -> SelectionState {
        self.selector.state()
    }

    pub fn disabled(&self) -> &DisabledDateSet {
        self.selector.disabled()
    }

    /// Click day-of-month `day` in the displayed month.
    ///
    /// Days with no cell in the current month are ignored.
    pub fn click_day(&mut self, day: u32) -> Option<RangeSelection> {
        match self.cursor.resolve_day(day) {
            Some(date) => self.click_date(date),
            None => {
                log::debug!("no day {day} in {}", self.cursor.label());
                None
            }
        }
    }

    pub fn click_date(&mut self, date: CalendarDate) -> Option<RangeSelection> {
        let selection = self.selector.click(date)?;
        self.hooks.notify_range_selected(&selection);
        Some(selection)
    }

    pub fn advance_month(&mut self) -> ViewCursor {
        self.cursor.advance_month();
        self.cursor_changed()
    }

    pub fn retreat_month(&mut self) -> ViewCursor {
        self.cursor.retreat_month();
        self.cursor_changed()
    }

    pub fn advance_year(&mut self) -> ViewCursor {
        self.cursor.advance_year();
        self.cursor_changed()
    }

    pub fn retreat_year(&mut self) -> ViewCursor {
        self.cursor.retreat_year();
        self.cursor_changed()
    }

    pub fn month_grid(&self) -> MonthGrid {
        MonthGrid::build(&self.cursor, &self.selector)
    }

    fn cursor_changed(&self) -> ViewCursor {
        self.hooks.notify_cursor_changed(&self.cursor);
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_utils::test_harness::RecordingHook;

    fn august_session(recorder: &RecordingHook) -> CalendarSession {
        let mut hooks = HookRegistry::new();
        hooks.register(recorder.clone());
        CalendarSession::with_hooks(
            ViewCursor::new(7, 2025),
            DisabledDateSet::from_strings(["2025-08-15T00:00:00.000Z"]),
            hooks,
        )
    }

    #[test]
    fn completed_range_is_emitted_exactly_once() {
        let recorder = RecordingHook::new();
        let mut session = august_session(&recorder);

        assert!(session.click_day(14).is_none());
        let selection = session.click_day(16).unwrap();

        let emitted = recorder.selections();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0], selection);
        assert_eq!(emitted[0].start_iso(), "2025-08-14T00:00:00.000Z");
        assert_eq!(emitted[0].end_iso(), "2025-08-16T00:00:00.000Z");
        assert_eq!(emitted[0].conflict_isos(), vec!["2025-08-15T00:00:00.000Z"]);
    }

    #[test]
    fn disabled_and_missing_days_are_ignored() {
        let recorder = RecordingHook::new();
        let mut session = august_session(&recorder);

        assert!(session.click_day(15).is_none());
        assert!(session.click_day(32).is_none());
        assert_eq!(session.state(), SelectionState::Empty);
        assert!(recorder.selections().is_empty());
    }

    #[test]
    fn range_can_span_months() {
        let recorder = RecordingHook::new();
        let mut session = august_session(&recorder);

        session.click_day(30);
        session.advance_month();
        let selection = session.click_day(2).unwrap();
        assert_eq!(selection.start_iso(), "2025-08-30T00:00:00.000Z");
        assert_eq!(selection.end_iso(), "2025-09-02T00:00:00.000Z");
        assert!(selection.conflicts.is_empty());
    }

    #[test]
    fn cursor_changes_are_published() {
        let recorder = RecordingHook::new();
        let mut session = august_session(&recorder);

        assert_eq!(session.advance_month(), ViewCursor::new(8, 2025));
        assert_eq!(session.advance_year(), ViewCursor::new(8, 2026));
        session.retreat_month();
        session.retreat_year();

        assert_eq!(
            recorder.cursors(),
            vec![
                ViewCursor::new(8, 2025),
                ViewCursor::new(8, 2026),
                ViewCursor::new(7, 2026),
                ViewCursor::new(7, 2025),
            ]
        );
        // Navigation leaves the selection alone.
        assert_eq!(session.state(), SelectionState::Empty);
    }

    #[test]
    fn month_grid_reflects_selection() {
        let recorder = RecordingHook::new();
        let mut session = august_session(&recorder);
        session.click_day(20);

        let grid = session.month_grid();
        assert_eq!(grid.cursor, ViewCursor::new(7, 2025));
        let selected: Vec<u32> = grid
            .cells
            .iter()
            .filter_map(|cell| match cell {
                crate::domain::GridCell::Day { day, class, .. } if class.selected => Some(*day),
                _ => None,
            })
            .collect();
        assert_eq!(selected, vec![20]);
    }
}
