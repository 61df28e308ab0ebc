use crate::application::{BookingApp, BookingOutcome, MonthView, MonthViewResult, Notice, Theme};
use crate::domain::{CalendarDate, RangeSelection, SelectionState, ViewCursor};
use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "venue-calendar")]
#[command(about = "Pick date ranges for a venue and book the free ones")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive month calendar
    Calendar {
        /// Venue whose bookings are shown as unavailable
        #[arg(short, long, default_value = "main")]
        venue: String,
        #[command(flatten)]
        month: MonthArgs,
    },
    /// Click days of one month in order and print every completed range
    Select {
        #[arg(short, long, default_value = "main")]
        venue: String,
        #[command(flatten)]
        month: MonthArgs,
        /// Print each range as JSON
        #[arg(long)]
        json: bool,
        /// Days of the month to click, in order
        #[arg(required = true)]
        days: Vec<u32>,
    },
    /// Book START..=END unless it overlaps an existing booking
    Book {
        #[arg(short, long, default_value = "main")]
        venue: String,
        /// First day (YYYY-MM-DD or RFC 3339)
        start: String,
        /// Last day (YYYY-MM-DD or RFC 3339)
        end: String,
    },
    /// List bookings for a venue
    Bookings {
        #[arg(short, long, default_value = "main")]
        venue: String,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct MonthArgs {
    /// Month to show (1-12); defaults to the last month viewed
    #[arg(short, long, requires = "year", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
    /// Year to show
    #[arg(short, long, requires = "month")]
    pub year: Option<i32>,
}

impl MonthArgs {
    pub fn cursor(&self) -> Option<ViewCursor> {
        match (self.month, self.year) {
            (Some(month), Some(year)) => Some(ViewCursor::new(month as i32 - 1, year)),
            _ => None,
        }
    }
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let app = BookingApp::new()?;

        match cli.command {
            Some(Commands::Calendar { venue, month }) => run_calendar(&app, &venue, month.cursor()),
            None => run_calendar(&app, "main", None),
            Some(Commands::Select {
                venue,
                month,
                json,
                days,
            }) => run_select(&app, &venue, month.cursor(), json, &days),
            Some(Commands::Book { venue, start, end }) => run_book(&app, &venue, &start, &end),
            Some(Commands::Bookings { venue }) => {
                let bookings = app.bookings().list_bookings(&venue)?;
                if bookings.is_empty() {
                    println!("No bookings for {venue}");
                }
                for booking in bookings {
                    println!(
                        "#{:<4} {}  {} - {}",
                        booking.id,
                        booking.venue,
                        booking.start.date(),
                        booking.end.date()
                    );
                }
                Ok(())
            }
        }
    }
}

fn run_calendar(app: &BookingApp, venue: &str, cursor: Option<ViewCursor>) -> anyhow::Result<()> {
    let theme = Theme::by_name(&app.config().theme);
    let mut explicit = cursor;
    let mut notice = None;

    loop {
        // Reopen after every booking so the new dates show as taken
        let mut session = app.open_session(venue, explicit.take())?;
        let result = {
            let mut month_view = MonthView::new(&mut session, venue, theme.clone(), notice.take())?;
            month_view.run()?
        }; // month_view is dropped here, releasing the borrow

        match result {
            MonthViewResult::BookRequested(selection) => {
                notice = Some(match app.book(venue, &selection)? {
                    BookingOutcome::Created(booking) => Notice::Info(format!(
                        "Booked #{}: {} - {}",
                        booking.id,
                        booking.start.date(),
                        booking.end.date()
                    )),
                    BookingOutcome::Conflicted(days) => Notice::Warning(format!(
                        "Not booked: {} day(s) already taken",
                        days.len()
                    )),
                });
                explicit = Some(session.cursor());
            }
            MonthViewResult::Exited => break,
        }
    }

    Ok(())
}

fn run_select(
    app: &BookingApp,
    venue: &str,
    cursor: Option<ViewCursor>,
    json: bool,
    days: &[u32],
) -> anyhow::Result<()> {
    let picked = app.select_days(venue, cursor, days)?;
    for selection in &picked.selections {
        print_selection(selection, json)?;
    }

    if !json {
        match picked.state {
            SelectionState::Empty => println!("No day selected"),
            SelectionState::StartChosen { start } => println!("Waiting for an end date after {start}"),
            SelectionState::RangeChosen { .. } => {}
        }
    }
    Ok(())
}

fn run_book(app: &BookingApp, venue: &str, start: &str, end: &str) -> anyhow::Result<()> {
    let start: CalendarDate = start
        .parse()
        .with_context(|| format!("Invalid start date {start:?}"))?;
    let end: CalendarDate = end
        .parse()
        .with_context(|| format!("Invalid end date {end:?}"))?;

    match app.book_dates(venue, start, end)? {
        Some(BookingOutcome::Created(booking)) => {
            println!(
                "Booked #{} at {}: {} - {}",
                booking.id,
                booking.venue,
                booking.start.date(),
                booking.end.date()
            );
            Ok(())
        }
        Some(BookingOutcome::Conflicted(days)) => {
            let days: Vec<String> = days.iter().map(|day| day.date().to_string()).collect();
            bail!("{venue} is already booked on {}", days.join(", "))
        }
        None => bail!(
            "{} - {} is not a range at {venue}: the end is before the start or a chosen day is already booked",
            start.date(),
            end.date()
        ),
    }
}

fn print_selection(selection: &RangeSelection, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(selection)?);
    } else if selection.has_conflicts() {
        println!(
            "{} - {}  WARNING: overlaps {}",
            selection.start_iso(),
            selection.end_iso(),
            selection.conflict_isos().join(", ")
        );
    } else {
        println!("{} - {}  available", selection.start_iso(), selection.end_iso());
    }
    Ok(())
}
