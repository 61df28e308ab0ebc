use crate::domain::calendar_date::{CalendarDate, expand_range};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Dates that can no longer be booked, kept in their serialized
/// `YYYY-MM-DDT00:00:00.000Z` form.
///
/// Entries not in that exact form never match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisabledDateSet(HashSet<String>);

impl DisabledDateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: HashSet<String> = values.into_iter().map(Into::into).collect();
        for value in &set {
            let canonical = value
                .parse::<CalendarDate>()
                .map(|date| date.to_iso() == *value)
                .unwrap_or(false);
            if !canonical {
                log::debug!("disabled date {value:?} is not canonical and will never match");
            }
        }
        Self(set)
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.0.contains(&date.to_iso())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Disabled days inside `from..=to`, in calendar order.
    pub fn conflicts_in(&self, from: CalendarDate, to: CalendarDate) -> Vec<CalendarDate> {
        expand_range(from, to)
            .into_iter()
            .filter(|day| self.contains(day))
            .collect()
    }
}

impl FromIterator<CalendarDate> for DisabledDateSet {
    fn from_iter<I: IntoIterator<Item = CalendarDate>>(iter: I) -> Self {
        Self(iter.into_iter().map(|date| date.to_iso()).collect())
    }
}

impl Extend<CalendarDate> for DisabledDateSet {
    fn extend<I: IntoIterator<Item = CalendarDate>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(|date| date.to_iso()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    StartChosen { start: CalendarDate },
    /// Always `start <= end`.
    RangeChosen { start: CalendarDate, end: CalendarDate },
}

impl SelectionState {
    pub fn start(&self) -> Option<CalendarDate> {
        match self {
            SelectionState::Empty => None,
            SelectionState::StartChosen { start } | SelectionState::RangeChosen { start, .. } => {
                Some(*start)
            }
        }
    }

    /// Whether `date` is highlighted: inside the chosen range, or equal to a
    /// pending start.
    pub fn covers(&self, date: CalendarDate) -> bool {
        match self {
            SelectionState::Empty => false,
            SelectionState::StartChosen { start } => date == *start,
            SelectionState::RangeChosen { start, end } => *start <= date && date <= *end,
        }
    }
}

/// A completed two-click selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSelection {
    pub start: CalendarDate,
    pub end: CalendarDate,
    /// Disabled days inside the range; empty when the range is free.
    pub conflicts: Vec<CalendarDate>,
}

impl RangeSelection {
    pub fn start_iso(&self) -> String {
        self.start.to_iso()
    }

    pub fn end_iso(&self) -> String {
        self.end.to_iso()
    }

    pub fn conflict_isos(&self) -> Vec<String> {
        self.conflicts.iter().map(CalendarDate::to_iso).collect()
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn nights(&self) -> i64 {
        (self.end.date() - self.start.date()).num_days()
    }
}

/// Two-click range picker over a fixed set of disabled dates.
#[derive(Debug, Clone)]
pub struct RangeSelector {
    state: SelectionState,
    disabled: DisabledDateSet,
}

impl RangeSelector {
    pub fn new(disabled: DisabledDateSet) -> Self {
        Self {
            state: SelectionState::Empty,
            disabled,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn disabled(&self) -> &DisabledDateSet {
        &self.disabled
    }

    pub fn is_disabled(&self, date: &CalendarDate) -> bool {
        self.disabled.contains(date)
    }

    /// Feed one day click. Returns the completed selection when this click
    /// closes a range. Clicks on disabled days change nothing.
    pub fn click(&mut self, clicked: CalendarDate) -> Option<RangeSelection> {
        if self.is_disabled(&clicked) {
            log::debug!("ignoring click on disabled day {clicked}");
            return None;
        }

        match self.state {
            SelectionState::StartChosen { start } if clicked >= start => {
                self.state = SelectionState::RangeChosen { start, end: clicked };
                Some(RangeSelection {
                    start,
                    end: clicked,
                    conflicts: self.disabled.conflicts_in(start, clicked),
                })
            }
            SelectionState::Empty
            | SelectionState::StartChosen { .. }
            | SelectionState::RangeChosen { .. } => {
                self.state = SelectionState::StartChosen { start: clicked };
                None
            }
        }
    }
}
