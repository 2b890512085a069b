/// Date arithmetic for the calendar grid.
///
/// Given a view mode and an anchor date this module produces the ordered list
/// of cells to display and moves the anchor backwards or forwards by one
/// period. Weeks always start on Sunday.

use crate::error::CalendarError;
use crate::models::Appointment;
use chrono::{Datelike, Days, Local, Months, NaiveDate};
use std::fmt;

/// Rows × columns of a month grid.
pub const MONTH_GRID_CELLS: usize = 42;
pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    Day,
    Week,
    Month,
}

impl ViewMode {
    pub fn from_string(value: &str) -> Result<Self, CalendarError> {
        match value.to_lowercase().trim() {
            "day" | "d" => Ok(ViewMode::Day),
            "week" | "w" => Ok(ViewMode::Week),
            "month" | "m" => Ok(ViewMode::Month),
            _ => Err(CalendarError::UnknownViewMode(value.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        }
    }

    /// Day and Week views render a time axis; Month renders day boxes only.
    pub fn has_time_axis(&self) -> bool {
        !matches!(self, ViewMode::Month)
    }

    /// Number of cells this mode always produces.
    pub fn cell_count(&self) -> usize {
        match self {
            ViewMode::Day => 1,
            ViewMode::Week => DAYS_PER_WEEK,
            ViewMode::Month => MONTH_GRID_CELLS,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn from_string(value: &str) -> Result<Self, CalendarError> {
        match value.to_lowercase().trim() {
            "previous" | "prev" | "p" => Ok(Direction::Previous),
            "next" | "n" => Ok(Direction::Next),
            _ => Err(CalendarError::UnknownDirection(value.to_string())),
        }
    }

    pub fn reverse(&self) -> Direction {
        match self {
            Direction::Previous => Direction::Next,
            Direction::Next => Direction::Previous,
        }
    }
}

/// One day box of the rendered grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub appointments: Vec<Appointment>,
    /// False for the padding days a month grid borrows from adjacent months.
    pub in_focused_period: bool,
}

impl GridCell {
    pub fn new(date: NaiveDate, in_focused_period: bool) -> Self {
        GridCell {
            date,
            appointments: Vec::new(),
            in_focused_period,
        }
    }

    pub fn is_today(&self) -> bool {
        self.date == today()
    }
}

/// Inclusive range of dates covered by a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// Current local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn first_visible_date(anchor: NaiveDate, mode: ViewMode) -> NaiveDate {
    match mode {
        ViewMode::Day => anchor,
        ViewMode::Week => week_start(anchor),
        ViewMode::Month => week_start(first_of_month(anchor)),
    }
}

/// Ordered cells for `mode` around `anchor`, without appointments.
pub fn compute_cells(anchor: NaiveDate, mode: ViewMode) -> Vec<GridCell> {
    let first = first_visible_date(anchor, mode);

    first
        .iter_days()
        .take(mode.cell_count())
        .map(|date| {
            let in_focused_period = match mode {
                ViewMode::Day | ViewMode::Week => true,
                ViewMode::Month => date.year() == anchor.year() && date.month() == anchor.month(),
            };
            GridCell::new(date, in_focused_period)
        })
        .collect()
}

/// First and last date `compute_cells` would emit.
pub fn visible_range(anchor: NaiveDate, mode: ViewMode) -> DateRange {
    let start = first_visible_date(anchor, mode);
    let span = mode.cell_count() as u64 - 1;
    DateRange {
        start,
        end: start.checked_add_days(Days::new(span)).unwrap_or(start),
    }
}

/// Move the anchor by one day, week or calendar month.
///
/// Month steps keep the day of month, clamped to the target month's last day.
/// At the edges of chrono's representable range the anchor is left unchanged.
pub fn advance(anchor: NaiveDate, mode: ViewMode, direction: Direction) -> NaiveDate {
    let moved = match (mode, direction) {
        (ViewMode::Day, Direction::Next) => anchor.checked_add_days(Days::new(1)),
        (ViewMode::Day, Direction::Previous) => anchor.checked_sub_days(Days::new(1)),
        (ViewMode::Week, Direction::Next) => anchor.checked_add_days(Days::new(7)),
        (ViewMode::Week, Direction::Previous) => anchor.checked_sub_days(Days::new(7)),
        (ViewMode::Month, Direction::Next) => anchor.checked_add_months(Months::new(1)),
        (ViewMode::Month, Direction::Previous) => anchor.checked_sub_months(Months::new(1)),
    };
    moved.unwrap_or(anchor)
}

/// Heading for the visible period, e.g. "October 2026" or "Week of Oct 11, 2026".
pub fn period_title(anchor: NaiveDate, mode: ViewMode) -> String {
    match mode {
        ViewMode::Day => anchor.format("%A, %B %-d, %Y").to_string(),
        ViewMode::Week => format!("Week of {}", week_start(anchor).format("%b %-d, %Y")),
        ViewMode::Month => anchor.format("%B %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_mode_yields_the_anchor_only() {
        let cells = compute_cells(date(2026, 10, 14), ViewMode::Day);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].date, date(2026, 10, 14));
        assert!(cells[0].in_focused_period);
    }

    #[test]
    fn week_mode_starts_on_sunday() {
        // 2026-10-14 is a Wednesday.
        let cells = compute_cells(date(2026, 10, 14), ViewMode::Week);
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[0].date, date(2026, 10, 11));
        assert_eq!(cells[0].date.weekday(), Weekday::Sun);
        assert_eq!(cells[6].date, date(2026, 10, 17));
    }

    #[test]
    fn week_mode_on_a_sunday_keeps_that_sunday() {
        let cells = compute_cells(date(2026, 10, 11), ViewMode::Week);
        assert_eq!(cells[0].date, date(2026, 10, 11));
    }

    #[test]
    fn month_grid_for_thirty_day_month_starting_saturday() {
        // June 2024: 30 days, the 1st is a Saturday.
        let anchor = date(2024, 6, 12);
        assert_eq!(anchor.weekday(), Weekday::Wed);
        let cells = compute_cells(anchor, ViewMode::Month);

        assert_eq!(cells.len(), MONTH_GRID_CELLS);
        assert_eq!(cells[0].date, date(2024, 5, 26));
        assert_eq!(cells[0].date.weekday(), Weekday::Sun);
        assert_eq!(cells[41].date.weekday(), Weekday::Sat);

        for cell in &cells[..6] {
            assert!(!cell.in_focused_period, "{} belongs to May", cell.date);
        }
        assert_eq!(cells[6].date, date(2024, 6, 1));
        assert!(cells[6].in_focused_period);

        let wednesday = cells.iter().find(|c| c.date == anchor).unwrap();
        assert!(wednesday.in_focused_period);
        assert!(!cells[41].in_focused_period);
    }

    #[test]
    fn february_starting_on_sunday_still_gets_six_rows() {
        // February 2026 starts on a Sunday and spans exactly four rows.
        let cells = compute_cells(date(2026, 2, 10), ViewMode::Month);
        assert_eq!(cells.len(), 42);
        assert_eq!(cells[0].date, date(2026, 2, 1));
        assert_eq!(cells.iter().filter(|c| c.in_focused_period).count(), 28);
    }

    #[test]
    fn visible_range_matches_cells() {
        for mode in [ViewMode::Day, ViewMode::Week, ViewMode::Month] {
            let anchor = date(2026, 10, 14);
            let cells = compute_cells(anchor, mode);
            let range = visible_range(anchor, mode);
            assert_eq!(range.start, cells[0].date);
            assert_eq!(range.end, cells[cells.len() - 1].date);
            assert_eq!(range.num_days() as usize, cells.len());
        }
    }

    #[test]
    fn advance_by_mode() {
        let d = date(2026, 10, 14);
        assert_eq!(advance(d, ViewMode::Day, Direction::Next), date(2026, 10, 15));
        assert_eq!(advance(d, ViewMode::Week, Direction::Previous), date(2026, 10, 7));
        assert_eq!(advance(d, ViewMode::Month, Direction::Next), date(2026, 11, 14));
    }

    #[test]
    fn month_advance_clamps_to_shorter_month() {
        let jan31 = date(2026, 1, 31);
        let feb = advance(jan31, ViewMode::Month, Direction::Next);
        assert_eq!(feb, date(2026, 2, 28));
        // Round trip does not restore the 31st.
        assert_eq!(advance(feb, ViewMode::Month, Direction::Previous), date(2026, 1, 28));
        assert_eq!(
            advance(date(2024, 3, 31), ViewMode::Month, Direction::Previous),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn advance_saturates_at_calendar_limits() {
        assert_eq!(
            advance(NaiveDate::MAX, ViewMode::Day, Direction::Next),
            NaiveDate::MAX
        );
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(ViewMode::from_string("Month").unwrap(), ViewMode::Month);
        assert_eq!(Direction::from_string("prev").unwrap(), Direction::Previous);
        assert!(matches!(
            Direction::from_string("sideways"),
            Err(CalendarError::UnknownDirection(_))
        ));
    }

    #[test]
    fn titles() {
        let d = date(2026, 10, 14);
        assert_eq!(period_title(d, ViewMode::Month), "October 2026");
        assert_eq!(period_title(d, ViewMode::Week), "Week of Oct 11, 2026");
        assert_eq!(period_title(d, ViewMode::Day), "Wednesday, October 14, 2026");
    }
}
