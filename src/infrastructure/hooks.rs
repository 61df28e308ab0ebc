use crate::domain::{RangeSelection, ViewCursor};
use anyhow::Result;

/// Trait for plugins that react to calendar session events
pub trait SessionHook: Send + Sync {
    /// Called once per completed two-click selection
    fn on_range_selected(&self, _selection: &RangeSelection) -> Result<()> {
        Ok(())
    }

    /// Called after every month/year change with the new cursor
    fn on_cursor_changed(&self, _cursor: &ViewCursor) -> Result<()> {
        Ok(())
    }

    /// Human-readable name for this hook
    fn name(&self) -> &str;
}

/// Registry for managing session hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn SessionHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new session hook
    pub fn register<H>(&mut self, hook: H)
    where
        H: SessionHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Run every hook on a completed selection, logging failures
    pub fn notify_range_selected(&self, selection: &RangeSelection) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_range_selected(selection) {
                log::warn!("hook '{}' failed on range selection: {e:#}", hook.name());
            }
        }
    }

    /// Run every hook on a new calendar position, logging failures
    pub fn notify_cursor_changed(&self, cursor: &ViewCursor) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_cursor_changed(cursor) {
                log::warn!("hook '{}' failed on cursor change: {e:#}", hook.name());
            }
        }
    }

    /// List all registered hooks
    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CalendarDate;
    use crate::infrastructure::test_utils::test_harness::RecordingHook;

    struct FailingHook;

    impl SessionHook for FailingHook {
        fn on_range_selected(&self, _selection: &RangeSelection) -> Result<()> {
            anyhow::bail!("boom")
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    #[test]
    fn failing_hook_does_not_stop_the_others() {
        let recorder = RecordingHook::new();
        let mut registry = HookRegistry::new();
        registry.register(FailingHook);
        registry.register(recorder.clone());

        let day = CalendarDate::from_ymd_opt(2025, 8, 14).unwrap();
        registry.notify_range_selected(&RangeSelection {
            start: day,
            end: day,
            conflicts: Vec::new(),
        });

        assert_eq!(recorder.selections().len(), 1);
        assert_eq!(registry.list_hooks(), vec!["Failing", "Recording"]);
    }
}
