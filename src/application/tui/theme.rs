use crossterm::style::Color as CrosstermColor;
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Day cells
    pub available: ColorPair,
    pub weekend: ColorPair,
    pub selected: ColorPair,
    pub disabled: ColorPair,
    pub conflict: ColorPair,
    pub today: ColorPair,

    // UI elements
    pub header: ColorPair,
    pub title: ColorPair,

    // Text
    pub help_text: ColorPair,
    pub success_text: ColorPair,
    pub warning_text: ColorPair,
}

#[derive(Debug, Clone)]
pub struct ColorPair {
    pub fg: CrosstermColor,
    pub bg: Option<CrosstermColor>,
}

impl ColorPair {
    pub fn new(fg: CrosstermColor) -> Self {
        Self { fg, bg: None }
    }

    pub fn with_bg(fg: CrosstermColor, bg: CrosstermColor) -> Self {
        Self { fg, bg: Some(bg) }
    }

    /// Convert to ratatui style
    pub fn to_ratatui(&self) -> RatatuiStyle {
        let mut style = RatatuiStyle::default().fg(crossterm_to_ratatui(self.fg));
        if let Some(bg) = self.bg {
            style = style.bg(crossterm_to_ratatui(bg));
        }
        style
    }

    pub fn to_ratatui_with_modifier(&self, modifier: Modifier) -> RatatuiStyle {
        self.to_ratatui().add_modifier(modifier)
    }
}

/// Convert crossterm color to ratatui color
fn crossterm_to_ratatui(color: CrosstermColor) -> RatatuiColor {
    match color {
        CrosstermColor::Black => RatatuiColor::Black,
        CrosstermColor::DarkRed => RatatuiColor::Red,
        CrosstermColor::DarkGreen => RatatuiColor::Green,
        CrosstermColor::DarkYellow => RatatuiColor::Yellow,
        CrosstermColor::DarkBlue => RatatuiColor::Blue,
        CrosstermColor::DarkMagenta => RatatuiColor::Magenta,
        CrosstermColor::DarkCyan => RatatuiColor::Cyan,
        CrosstermColor::Grey => RatatuiColor::Gray,
        CrosstermColor::DarkGrey => RatatuiColor::DarkGray,
        CrosstermColor::Red => RatatuiColor::LightRed,
        CrosstermColor::Green => RatatuiColor::LightGreen,
        CrosstermColor::Yellow => RatatuiColor::LightYellow,
        CrosstermColor::Blue => RatatuiColor::LightBlue,
        CrosstermColor::Magenta => RatatuiColor::LightMagenta,
        CrosstermColor::Cyan => RatatuiColor::LightCyan,
        CrosstermColor::White => RatatuiColor::White,
        CrosstermColor::Rgb { r, g, b } => RatatuiColor::Rgb(r, g, b),
        CrosstermColor::AnsiValue(v) => RatatuiColor::Indexed(v),
        _ => RatatuiColor::White,
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                available: ColorPair::new(CrosstermColor::White),
                weekend: ColorPair::new(CrosstermColor::Rgb { r: 150, g: 150, b: 150 }),
                selected: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                disabled: ColorPair::new(CrosstermColor::DarkGrey),
                conflict: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkRed),
                today: ColorPair::new(CrosstermColor::Yellow),

                header: ColorPair::new(CrosstermColor::DarkCyan),
                title: ColorPair::new(CrosstermColor::DarkCyan),

                help_text: ColorPair::new(CrosstermColor::DarkCyan),
                success_text: ColorPair::new(CrosstermColor::Green),
                warning_text: ColorPair::new(CrosstermColor::Red),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                available: ColorPair::new(CrosstermColor::Black),
                weekend: ColorPair::new(CrosstermColor::DarkGrey),
                selected: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                disabled: ColorPair::new(CrosstermColor::Grey),
                conflict: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::Red),
                today: ColorPair::new(CrosstermColor::DarkYellow),

                header: ColorPair::new(CrosstermColor::DarkBlue),
                title: ColorPair::new(CrosstermColor::DarkBlue),

                help_text: ColorPair::new(CrosstermColor::DarkBlue),
                success_text: ColorPair::new(CrosstermColor::DarkGreen),
                warning_text: ColorPair::new(CrosstermColor::DarkRed),
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                available: ColorPair::new(CrosstermColor::White),
                weekend: ColorPair::new(CrosstermColor::White),
                selected: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),
                disabled: ColorPair::new(CrosstermColor::DarkGrey),
                conflict: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Grey),
                today: ColorPair::new(CrosstermColor::White),

                header: ColorPair::new(CrosstermColor::White),
                title: ColorPair::new(CrosstermColor::White),

                help_text: ColorPair::new(CrosstermColor::Grey),
                success_text: ColorPair::new(CrosstermColor::White),
                warning_text: ColorPair::new(CrosstermColor::White),
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "minimal" => Self::minimal(),
            _ => Self::dark(), // default
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["dark".to_string(), "light".to_string(), "minimal".to_string()]
    }
}
