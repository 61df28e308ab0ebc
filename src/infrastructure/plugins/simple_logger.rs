use crate::domain::{RangeSelection, ViewCursor};
use crate::infrastructure::SessionHook;
use anyhow::Result;

/// Example plugin that logs every completed selection and month change
pub struct SimpleLoggerHook;

impl SessionHook for SimpleLoggerHook {
    fn on_range_selected(&self, selection: &RangeSelection) -> Result<()> {
        if selection.has_conflicts() {
            log::warn!(
                "range {} - {} overlaps {} booked day(s): {}",
                selection.start_iso(),
                selection.end_iso(),
                selection.conflicts.len(),
                selection.conflict_isos().join(", ")
            );
        } else {
            log::info!(
                "range {} - {} selected ({} night(s))",
                selection.start_iso(),
                selection.end_iso(),
                selection.nights()
            );
        }
        Ok(())
    }

    fn on_cursor_changed(&self, cursor: &ViewCursor) -> Result<()> {
        log::debug!("calendar moved to {}", cursor.label());
        Ok(())
    }

    fn name(&self) -> &str {
        "Simple Logger"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CalendarDate;
    use crate::infrastructure::HookRegistry;

    #[test]
    fn logger_accepts_clean_and_conflicting_ranges() {
        let day = |d| CalendarDate::from_ymd_opt(2025, 8, d).unwrap();
        let mut hooks = HookRegistry::new();
        hooks.register(SimpleLoggerHook);
        assert_eq!(hooks.list_hooks(), vec!["Simple Logger"]);

        let clean = RangeSelection { start: day(14), end: day(16), conflicts: vec![] };
        let overlapping = RangeSelection { conflicts: vec![day(15)], ..clean.clone() };
        assert!(SimpleLoggerHook.on_range_selected(&clean).is_ok());
        assert!(SimpleLoggerHook.on_range_selected(&overlapping).is_ok());
        assert!(SimpleLoggerHook.on_cursor_changed(&ViewCursor::new(7, 2025)).is_ok());
    }
}
