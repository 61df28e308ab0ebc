use std::path::PathBuf;

pub struct Config {
    pub data_dir: PathBuf,
    pub state_path: PathBuf,
    pub database_path: PathBuf,
    pub theme: String,
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = std::env::var("VENUE_CALENDAR_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("venue-calendar")
            });

        let theme = std::env::var("VENUE_CALENDAR_THEME").unwrap_or_else(|_| "dark".to_string());

        Self::with_data_dir(data_dir, theme)
    }

    pub fn with_data_dir(data_dir: PathBuf, theme: impl Into<String>) -> Self {
        let state_path = data_dir.join("state.json");
        let database_path = data_dir.join("bookings.db");

        Self {
            data_dir,
            state_path,
            database_path,
            theme: theme.into(),
        }
    }
}
