use super::theme::Theme;
use crate::domain::{
    CalendarDate, CalendarSession, GridCell, MonthGrid, RangeSelection, SelectionState,
    canonicalize,
};
use chrono::{Datelike, Utc, Weekday};
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{self, Stdout, stdout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthViewResult {
    /// User quit; the position is already saved by the session hooks
    Exited,
    /// User asked to book the last conflict-free selection
    BookRequested(RangeSelection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
}

/// Keyboard state of the month view, kept apart from the terminal.
#[derive(Debug, Clone)]
pub struct MonthController {
    pub focused_day: u32,
    pub last_selection: Option<RangeSelection>,
    pub notice: Option<Notice>,
    pub show_help: bool,
    pub should_exit: bool,
    pub book_request: Option<RangeSelection>,
}

impl MonthController {
    pub fn new(focused_day: u32) -> Self {
        Self {
            focused_day: focused_day.max(1),
            last_selection: None,
            notice: None,
            show_help: false,
            should_exit: false,
            book_request: None,
        }
    }

    pub fn handle_key_event(&mut self, session: &mut CalendarSession, key: KeyEvent) {
        let days = session.cursor().days_in_month();

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => {
                self.should_exit = true;
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                self.should_exit = true;
            }

            (KeyCode::Left, _) | (KeyCode::Char('h'), _) => {
                self.focused_day = move_focus(self.focused_day, -1, days);
            }
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) => {
                self.focused_day = move_focus(self.focused_day, 1, days);
            }
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
                self.focused_day = move_focus(self.focused_day, -7, days);
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
                self.focused_day = move_focus(self.focused_day, 7, days);
            }

            (KeyCode::PageDown, _) | (KeyCode::Char('n'), _) => {
                session.advance_month();
                self.clamp_focus(session);
            }
            (KeyCode::PageUp, _) | (KeyCode::Char('p'), _) => {
                session.retreat_month();
                self.clamp_focus(session);
            }
            (KeyCode::Char('N'), _) => {
                session.advance_year();
                self.clamp_focus(session);
            }
            (KeyCode::Char('P'), _) => {
                session.retreat_year();
                self.clamp_focus(session);
            }

            (KeyCode::Enter, _) | (KeyCode::Char(' '), _) => {
                self.click_focused(session);
            }

            (KeyCode::Char('b'), _) => match &self.last_selection {
                Some(selection) if !selection.has_conflicts() => {
                    self.book_request = Some(selection.clone());
                    self.should_exit = true;
                }
                Some(_) => {
                    self.notice = Some(Notice::Warning(
                        "This range overlaps booked dates and cannot be booked".to_string(),
                    ));
                }
                None => {
                    self.notice = Some(Notice::Info("Select a range first".to_string()));
                }
            },

            (KeyCode::Char('?'), _) => {
                self.show_help = !self.show_help;
            }

            _ => {}
        }
    }

    /// What the view hands back once `should_exit` is set.
    pub fn take_result(&mut self) -> MonthViewResult {
        match self.book_request.take() {
            Some(selection) => MonthViewResult::BookRequested(selection),
            None => MonthViewResult::Exited,
        }
    }

    fn clamp_focus(&mut self, session: &CalendarSession) {
        self.focused_day = self
            .focused_day
            .min(session.cursor().days_in_month())
            .max(1);
    }

    fn click_focused(&mut self, session: &mut CalendarSession) {
        let Some(date) = session.cursor().resolve_day(self.focused_day) else {
            return;
        };

        if session.disabled().contains(&date) {
            self.notice = Some(Notice::Warning(format!(
                "{} is already booked",
                date.date().format("%b %-d, %Y")
            )));
            return;
        }

        match session.click_date(date) {
            Some(selection) => {
                self.notice = Some(selection_notice(&selection));
                self.last_selection = Some(selection);
            }
            None => {
                self.last_selection = None;
                self.notice = Some(Notice::Info(format!(
                    "Start {} - pick an end date",
                    date.date().format("%b %-d, %Y")
                )));
            }
        }
    }
}

fn selection_notice(selection: &RangeSelection) -> Notice {
    let start = selection.start.date().format("%b %-d, %Y");
    let end = selection.end.date().format("%b %-d, %Y");

    if selection.has_conflicts() {
        let days: Vec<String> = selection
            .conflicts
            .iter()
            .map(|day| day.date().format("%b %-d").to_string())
            .collect();
        Notice::Warning(format!(
            "{start} - {end} overlaps booked dates: {}",
            days.join(", ")
        ))
    } else {
        Notice::Info(format!(
            "{start} - {end} ({} night(s)) - press b to book",
            selection.nights()
        ))
    }
}

/// Move the focused day by `delta`, staying inside the month.
pub fn move_focus(day: u32, delta: i32, days_in_month: u32) -> u32 {
    let moved = i64::from(day) + i64::from(delta);
    moved.clamp(1, i64::from(days_in_month.max(1))) as u32
}

pub struct MonthView<'a> {
    session: &'a mut CalendarSession,
    venue: String,
    controller: MonthController,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
}

impl<'a> MonthView<'a> {
    pub fn new(
        session: &'a mut CalendarSession,
        venue: impl Into<String>,
        theme: Theme,
        notice: Option<Notice>,
    ) -> io::Result<Self> {
        if !IsTty::is_tty(&std::io::stdout()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        stdout().execute(EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode(); // Clean up on failure
            io::Error::other(format!("Failed to enter alternate screen: {}", e))
        })?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = stdout().execute(LeaveAlternateScreen);
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        let today = canonicalize(&Utc::now());
        let cursor = session.cursor();
        let focused_day = if cursor.resolved() == (today.year(), today.month0()) {
            today.day()
        } else {
            1
        };

        let mut controller = MonthController::new(focused_day);
        controller.notice = notice;

        Ok(Self {
            session,
            venue: venue.into(),
            controller,
            terminal,
            theme,
        })
    }

    /// Calculate centered area with both horizontal and vertical centering
    fn calculate_centered_area(available: Rect, needed_width: u16, needed_height: u16) -> Rect {
        let width = std::cmp::min(available.width, needed_width);
        let height = std::cmp::min(available.height, needed_height);

        Rect {
            x: available.x + available.width.saturating_sub(width) / 2,
            y: available.y + available.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    fn day_style_static(
        cell: &GridCell,
        is_focused: bool,
        today: CalendarDate,
        theme: &Theme,
    ) -> Style {
        let GridCell::Day { date, class, .. } = cell else {
            return Style::default();
        };
        let colors = &theme.colors;
        let is_weekend = matches!(date.date().weekday(), Weekday::Sat | Weekday::Sun);

        let style = if class.conflict {
            colors.conflict.to_ratatui_with_modifier(Modifier::BOLD)
        } else if class.selected {
            colors.selected.to_ratatui()
        } else if class.disabled {
            colors.disabled.to_ratatui_with_modifier(Modifier::CROSSED_OUT)
        } else if *date == today {
            colors.today.to_ratatui_with_modifier(Modifier::BOLD)
        } else if is_weekend {
            colors.weekend.to_ratatui()
        } else {
            colors.available.to_ratatui()
        };

        if is_focused {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    fn create_month_table_static(
        grid: &MonthGrid,
        focused_day: u32,
        today: CalendarDate,
        venue: &str,
        theme: &Theme,
    ) -> Table<'static> {
        let header_style = theme.colors.header.to_ratatui();
        let weekend_style = theme.colors.weekend.to_ratatui();
        let header = Row::new(vec![
            Cell::from("Sun").style(weekend_style),
            Cell::from("Mon").style(header_style),
            Cell::from("Tue").style(header_style),
            Cell::from("Wed").style(header_style),
            Cell::from("Thu").style(header_style),
            Cell::from("Fri").style(header_style),
            Cell::from("Sat").style(weekend_style),
        ])
        .height(1);

        let rows: Vec<Row> = grid
            .weeks()
            .map(|week| {
                let cells: Vec<Cell> = week
                    .iter()
                    .map(|cell| match cell {
                        GridCell::Blank => Cell::from(""),
                        GridCell::Day { day, class, .. } => {
                            let marker = if class.conflict {
                                "!"
                            } else if class.disabled {
                                "x"
                            } else {
                                " "
                            };
                            let style = Self::day_style_static(
                                cell,
                                *day == focused_day,
                                today,
                                theme,
                            );
                            Cell::from(format!("{:>2}{}", day, marker)).style(style)
                        }
                    })
                    .collect();
                Row::new(cells).height(2)
            })
            .collect();

        Table::new(rows, [Constraint::Length(5); 7])
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::NONE)
                    .title(format!("{} - {}", venue, grid.cursor.label()))
                    .title_style(theme.colors.title.to_ratatui())
                    .title_alignment(Alignment::Center),
            )
            .column_spacing(1)
    }

    fn create_status_static(
        state: SelectionState,
        notice: Option<&Notice>,
        theme: &Theme,
    ) -> Paragraph<'static> {
        let selection_line = match state {
            SelectionState::Empty => "No dates selected".to_string(),
            SelectionState::StartChosen { start } => {
                format!("Start: {}", start.date().format("%a %b %-d, %Y"))
            }
            SelectionState::RangeChosen { start, end } => format!(
                "Range: {} - {}",
                start.date().format("%a %b %-d"),
                end.date().format("%a %b %-d, %Y")
            ),
        };

        let mut lines = vec![Line::from(vec![Span::styled(
            selection_line,
            theme.colors.available.to_ratatui(),
        )])];

        match notice {
            Some(Notice::Info(text)) => lines.push(Line::from(vec![Span::styled(
                text.clone(),
                theme.colors.success_text.to_ratatui(),
            )])),
            Some(Notice::Warning(text)) => lines.push(Line::from(vec![Span::styled(
                text.clone(),
                theme.colors.warning_text.to_ratatui_with_modifier(Modifier::BOLD),
            )])),
            None => {}
        }

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::NONE))
            .alignment(Alignment::Center)
    }

    fn create_help_text_static(theme: &Theme) -> Paragraph<'static> {
        let help_text = vec![
            Line::from(vec![Span::styled(
                "←→/hl=Day • ↑↓/jk=Week • n/p=Month • N/P=Year",
                theme.colors.help_text.to_ratatui(),
            )]),
            Line::from(vec![Span::styled(
                "Enter=Pick day • b=Book range • ?=Help • q=Quit",
                theme.colors.help_text.to_ratatui(),
            )]),
        ];

        Paragraph::new(help_text)
            .block(Block::default().borders(Borders::NONE))
            .alignment(Alignment::Center)
    }

    pub fn run(&mut self) -> io::Result<MonthViewResult> {
        loop {
            if self.controller.should_exit {
                break;
            }

            let grid = self.session.month_grid();
            let state = self.session.state();
            let today = canonicalize(&Utc::now());
            let focused_day = self.controller.focused_day;
            let notice = self.controller.notice.clone();
            let show_help = self.controller.show_help;
            let venue = self.venue.as_str();
            let theme = &self.theme;

            self.terminal.draw(|frame| {
                const CALENDAR_HEIGHT: u16 = 15; // up to 6 weeks * 2 rows + header + title
                const STATUS_HEIGHT: u16 = 3;
                const HELP_HEIGHT: u16 = 2;
                const CALENDAR_WIDTH: u16 = 44;

                let total_height = if show_help {
                    CALENDAR_HEIGHT + STATUS_HEIGHT + HELP_HEIGHT
                } else {
                    CALENDAR_HEIGHT + STATUS_HEIGHT
                };

                let centered_area =
                    Self::calculate_centered_area(frame.area(), CALENDAR_WIDTH, total_height);

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(CALENDAR_HEIGHT),
                        Constraint::Length(STATUS_HEIGHT),
                        Constraint::Length(if show_help { HELP_HEIGHT } else { 0 }),
                    ])
                    .split(centered_area);

                let table =
                    Self::create_month_table_static(&grid, focused_day, today, venue, theme);
                frame.render_widget(table, chunks[0]);

                let status = Self::create_status_static(state, notice.as_ref(), theme);
                frame.render_widget(status, chunks[1]);

                if show_help {
                    frame.render_widget(Self::create_help_text_static(theme), chunks[2]);
                }
            })?;

            if poll(std::time::Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.controller.handle_key_event(self.session, key);
                    }
                    _ => continue,
                }
            }
        }

        self.cleanup()?;

        Ok(self.controller.take_result())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl<'a> Drop for MonthView<'a> {
    fn drop(&mut self) {
        // Fallback cleanup if explicit cleanup wasn't called
        let _ = self.cleanup();
    }
}
