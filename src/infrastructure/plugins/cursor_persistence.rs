use crate::domain::ViewCursor;
use crate::infrastructure::{KeyValueStore, SessionHook, save_cursor};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Plugin that writes the calendar position to a key-value store on every change
pub struct CursorPersistenceHook {
    store: Arc<dyn KeyValueStore>,
}

impl CursorPersistenceHook {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl SessionHook for CursorPersistenceHook {
    fn on_cursor_changed(&self, cursor: &ViewCursor) -> Result<()> {
        save_cursor(self.store.as_ref(), cursor).context("Failed to persist calendar position")
    }

    fn name(&self) -> &str {
        "Cursor Persistence"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CalendarSession, DisabledDateSet};
    use crate::infrastructure::{HookRegistry, JsonFileStore, MemoryStore, load_cursor};
    use tempfile::TempDir;

    #[test]
    fn session_navigation_is_persisted() {
        let store = Arc::new(MemoryStore::new());
        let mut hooks = HookRegistry::new();
        hooks.register(CursorPersistenceHook::new(store.clone()));

        let mut session =
            CalendarSession::with_hooks(ViewCursor::new(11, 2025), DisabledDateSet::new(), hooks);
        session.advance_month();

        assert_eq!(
            load_cursor(store.as_ref()).unwrap(),
            Some(ViewCursor::new(12, 2025))
        );
    }

    #[test]
    fn navigation_recovers_a_truncated_state_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        std::fs::write(&path, r#"{"calendar_month": "7", "calendar_ye"#).unwrap();

        let store = Arc::new(JsonFileStore::new(&path));
        let mut hooks = HookRegistry::new();
        hooks.register(CursorPersistenceHook::new(store.clone()));

        let mut session =
            CalendarSession::with_hooks(ViewCursor::new(7, 2025), DisabledDateSet::new(), hooks);
        session.advance_month();
        session.advance_month();

        assert_eq!(
            load_cursor(store.as_ref()).unwrap(),
            Some(ViewCursor::new(9, 2025))
        );
        let reopened = JsonFileStore::new(&path);
        assert_eq!(load_cursor(&reopened).unwrap(), Some(ViewCursor::new(9, 2025)));
    }
}
