use crate::domain::calendar_date::CalendarDate;
use crate::domain::selection::{DisabledDateSet, RangeSelector, SelectionState};
use crate::domain::view_cursor::ViewCursor;

pub const DAYS_PER_WEEK: u32 = 7;

/// Blank padding around the days of a month so the grid is whole weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub leading_blanks: u32,
    pub day_count: u32,
    pub trailing_blanks: u32,
}

impl GridLayout {
    pub fn total_cells(&self) -> u32 {
        self.leading_blanks + self.day_count + self.trailing_blanks
    }

    pub fn weeks(&self) -> u32 {
        self.total_cells() / DAYS_PER_WEEK
    }
}

/// `offset` is the weekday of the 1st (0 = Sunday).
pub fn grid_layout(offset: u32, day_count: u32) -> GridLayout {
    let used = offset + day_count;
    let trailing_blanks = (DAYS_PER_WEEK - used % DAYS_PER_WEEK) % DAYS_PER_WEEK;
    GridLayout {
        leading_blanks: offset,
        day_count,
        trailing_blanks,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayClass {
    pub disabled: bool,
    pub selected: bool,
    pub conflict: bool,
}

pub fn classify_day(
    date: CalendarDate,
    state: &SelectionState,
    disabled: &DisabledDateSet,
) -> DayClass {
    let is_disabled = disabled.contains(&date);
    let selected = state.covers(date);
    DayClass {
        disabled: is_disabled,
        selected,
        conflict: selected && is_disabled,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day {
        day: u32,
        date: CalendarDate,
        class: DayClass,
    },
}

impl GridCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            GridCell::Blank => None,
            GridCell::Day { day, .. } => Some(*day),
        }
    }

    /// Only enabled days accept clicks.
    pub fn is_clickable(&self) -> bool {
        matches!(self, GridCell::Day { class, .. } if !class.disabled)
    }
}

/// Render-ready snapshot of one month: classified cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub cursor: ViewCursor,
    pub layout: GridLayout,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn build(cursor: &ViewCursor, selector: &RangeSelector) -> Self {
        let state = selector.state();
        let days: Vec<GridCell> = (1..=cursor.days_in_month())
            .filter_map(|day| {
                let date = cursor.resolve_day(day)?;
                Some(GridCell::Day {
                    day,
                    date,
                    class: classify_day(date, &state, selector.disabled()),
                })
            })
            .collect();
        let layout = grid_layout(cursor.first_weekday_offset(), days.len() as u32);

        let mut cells = Vec::with_capacity(layout.total_cells() as usize);
        cells.extend((0..layout.leading_blanks).map(|_| GridCell::Blank));
        cells.extend(days);
        cells.extend((0..layout.trailing_blanks).map(|_| GridCell::Blank));

        Self {
            cursor: *cursor,
            layout,
            cells,
        }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(DAYS_PER_WEEK as usize)
    }

    pub fn cell_for_day(&self, day: u32) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.day() == Some(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aug(day: u32) -> CalendarDate {
        CalendarDate::from_ymd_opt(2025, 8, day).unwrap()
    }

    #[test]
    fn grid_always_fills_whole_weeks() {
        for offset in 0..=6 {
            for day_count in 28..=31 {
                let layout = grid_layout(offset, day_count);
                assert_eq!(layout.total_cells() % 7, 0, "offset {offset}, days {day_count}");
                assert!(layout.trailing_blanks <= 6);
                assert_eq!(layout.leading_blanks, offset);
            }
        }
    }

    #[test]
    fn february_starting_sunday_needs_no_padding() {
        let layout = grid_layout(0, 28);
        assert_eq!(layout.trailing_blanks, 0);
        assert_eq!(layout.weeks(), 4);
    }

    #[test]
    fn classification_by_state() {
        let disabled = DisabledDateSet::from_strings(["2025-08-15T00:00:00.000Z"]);

        let empty = SelectionState::Empty;
        assert_eq!(classify_day(aug(14), &empty, &disabled), DayClass::default());
        assert_eq!(
            classify_day(aug(15), &empty, &disabled),
            DayClass { disabled: true, selected: false, conflict: false }
        );

        let pending = SelectionState::StartChosen { start: aug(14) };
        assert!(classify_day(aug(14), &pending, &disabled).selected);
        assert!(!classify_day(aug(16), &pending, &disabled).selected);

        let range = SelectionState::RangeChosen { start: aug(14), end: aug(16) };
        assert_eq!(
            classify_day(aug(15), &range, &disabled),
            DayClass { disabled: true, selected: true, conflict: true }
        );
        let edge = classify_day(aug(16), &range, &disabled);
        assert!(edge.selected && !edge.conflict);
    }

    #[test]
    fn month_grid_for_august_2025() {
        let disabled = DisabledDateSet::from_strings(["2025-08-15T00:00:00.000Z"]);
        let mut selector = RangeSelector::new(disabled);
        selector.click(aug(14));
        selector.click(aug(16));

        let grid = MonthGrid::build(&ViewCursor::new(7, 2025), &selector);
        assert_eq!(grid.layout.leading_blanks, 5);
        assert_eq!(grid.layout.trailing_blanks, 6);
        assert_eq!(grid.cells.len(), 42);
        assert_eq!(grid.weeks().count(), 6);
        assert_eq!(grid.cells[5].day(), Some(1));

        match grid.cell_for_day(15) {
            Some(GridCell::Day { class, .. }) => assert!(class.conflict),
            other => panic!("unexpected cell {other:?}"),
        }
        assert!(!grid.cell_for_day(15).unwrap().is_clickable());
        assert!(grid.cell_for_day(14).unwrap().is_clickable());
        assert!(grid.cell_for_day(32).is_none());
    }

    #[test]
    fn month_grid_stays_whole_at_the_edge_of_the_calendar() {
        let selector = RangeSelector::new(DisabledDateSet::new());
        let cursor = ViewCursor::new(0, 300_000);
        let grid = MonthGrid::build(&cursor, &selector);

        assert_eq!(grid.cells.len() % DAYS_PER_WEEK as usize, 0);
        assert_eq!(grid.cells.len() as u32, grid.layout.total_cells());
        assert!(grid.weeks().all(|week| week.len() == DAYS_PER_WEEK as usize));

        let first = grid.cell_for_day(1).unwrap();
        assert!(matches!(first, GridCell::Day { date, .. } if *date == cursor.first_day()));
        assert!(grid.cell_for_day(31).is_some());
    }
}
