use crate::domain::ViewCursor;
use crate::infrastructure::KeyValueStore;
use anyhow::Result;

pub const MONTH_KEY: &str = "calendar_month";
pub const YEAR_KEY: &str = "calendar_year";

/// Read a previously saved cursor. Missing or unparsable values count as
/// "nothing saved".
pub fn load_cursor(store: &dyn KeyValueStore) -> Result<Option<ViewCursor>> {
    let month = store.get(MONTH_KEY)?;
    let year = store.get(YEAR_KEY)?;

    let (Some(month), Some(year)) = (month, year) else {
        return Ok(None);
    };

    match (month.trim().parse::<i32>(), year.trim().parse::<i32>()) {
        (Ok(month), Ok(year)) => Ok(Some(ViewCursor::new(month, year))),
        _ => {
            log::warn!("ignoring saved calendar position {month:?}/{year:?}");
            Ok(None)
        }
    }
}

/// Month is stored 0-based, exactly as the cursor holds it.
pub fn save_cursor(store: &dyn KeyValueStore, cursor: &ViewCursor) -> Result<()> {
    store.set(MONTH_KEY, &cursor.month.to_string())?;
    store.set(YEAR_KEY, &cursor.year.to_string())?;
    Ok(())
}
