/// Calendar controller.
///
/// The controller holds no view state of its own. The host keeps a
/// [`ViewState`], feeds it through [`CalendarController::apply`] on every
/// user action and asks for a fresh [`CalendarView`] with
/// [`CalendarController::compute`]. Nothing is cached between calls.

use crate::bucket::{bucket, placed_count};
use crate::config::CalendarConfig;
use crate::error::CalendarError;
use crate::filter::{self, FilterUpdate, Filters};
use crate::grid::{
    self, compute_cells, period_title, visible_range, DateRange, Direction, GridCell, ViewMode,
};
use crate::layout::{layout_cells, DayLayout};
use crate::models::Appointment;
use crate::source::AppointmentSource;
use crate::style::style_for;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub anchor_date: NaiveDate,
    pub view_mode: ViewMode,
    pub filters: Filters,
}

impl ViewState {
    /// Week view anchored on `today` with no filters.
    pub fn initial(today: NaiveDate) -> Self {
        ViewState {
            anchor_date: today,
            view_mode: ViewMode::Week,
            filters: Filters::default(),
        }
    }

    pub fn visible_range(&self) -> DateRange {
        visible_range(self.anchor_date, self.view_mode)
    }
}

/// Every transition the host can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCommand {
    SetAnchorDate(NaiveDate),
    SetViewMode(ViewMode),
    SetFilter(FilterUpdate),
    Navigate(Direction),
    Today,
}

/// Renderable output of one recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarView {
    pub mode: ViewMode,
    pub title: String,
    pub range: DateRange,
    pub cells: Vec<GridCell>,
    /// One entry per cell in Day and Week modes, empty in Month mode.
    pub layouts: Vec<DayLayout>,
    /// Set when the appointment list could not be obtained.
    pub error: Option<String>,
}

impl CalendarView {
    pub fn appointment_count(&self) -> usize {
        placed_count(&self.cells)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }

    pub fn layout_for(&self, date: NaiveDate) -> Option<&DayLayout> {
        self.layouts.iter().find(|layout| layout.date == date)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CalendarController {
    config: CalendarConfig,
}

impl CalendarController {
    pub fn new(config: CalendarConfig) -> Self {
        CalendarController { config }
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn initial_state(&self) -> ViewState {
        ViewState::initial(grid::today())
    }

    /// Apply a command, reading the clock only for `Today`.
    pub fn apply(&self, state: ViewState, command: CalendarCommand) -> ViewState {
        self.apply_at(state, command, grid::today())
    }

    /// Apply a command with an explicit notion of today.
    pub fn apply_at(
        &self,
        state: ViewState,
        command: CalendarCommand,
        today: NaiveDate,
    ) -> ViewState {
        match command {
            CalendarCommand::SetAnchorDate(anchor_date) => ViewState { anchor_date, ..state },
            CalendarCommand::SetViewMode(view_mode) => ViewState { view_mode, ..state },
            CalendarCommand::SetFilter(update) => ViewState {
                filters: state.filters.updated(update),
                ..state
            },
            CalendarCommand::Navigate(direction) => ViewState {
                anchor_date: grid::advance(state.anchor_date, state.view_mode, direction),
                ..state
            },
            CalendarCommand::Today => ViewState {
                anchor_date: today,
                ..state
            },
        }
    }

    /// Recompute the grid from scratch.
    ///
    /// A failed feed still yields the full, empty grid with `error` set;
    /// no placeholder appointments are invented.
    pub fn compute(
        &self,
        state: &ViewState,
        feed: Result<&[Appointment], &CalendarError>,
    ) -> CalendarView {
        let cells = compute_cells(state.anchor_date, state.view_mode);
        let range = state.visible_range();

        let (cells, error) = match feed {
            Ok(appointments) => {
                let filtered = filter::apply(appointments, &state.filters);
                (bucket(&filtered, cells), None)
            }
            Err(e) => {
                warn!(error = %e, "appointment list unavailable, rendering empty grid");
                (cells, Some(e.to_string()))
            }
        };

        let layouts = if state.view_mode.has_time_axis() {
            layout_cells(&cells, &self.config)
        } else {
            Vec::new()
        };

        let view = CalendarView {
            mode: state.view_mode,
            title: period_title(state.anchor_date, state.view_mode),
            range,
            cells,
            layouts,
            error,
        };
        debug!(
            mode = %view.mode,
            range = %view.range,
            placed = view.appointment_count(),
            filters = %state.filters.describe(),
            "recomputed calendar"
        );
        view
    }

    /// Fetch the visible range from `source` and compute.
    pub fn render(&self, state: &ViewState, source: &dyn AppointmentSource) -> CalendarView {
        let fetched = source.fetch(&state.visible_range());
        match &fetched {
            Ok(appointments) => self.compute(state, Ok(appointments.as_slice())),
            Err(e) => self.compute(state, Err(e)),
        }
    }

    /// Transition, then render the resulting state.
    pub fn dispatch(
        &self,
        state: ViewState,
        command: CalendarCommand,
        source: &dyn AppointmentSource,
    ) -> (ViewState, CalendarView) {
        let next = self.apply(state, command);
        let view = self.render(&next, source);
        (next, view)
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.title, self.mode)?;
        if let Some(error) = &self.error {
            writeln!(f, "  ! appointments unavailable: {}", error)?;
        }

        match self.mode {
            ViewMode::Month => {
                for week in self.cells.chunks(grid::DAYS_PER_WEEK) {
                    for cell in week {
                        let marker = if cell.in_focused_period { ' ' } else { '.' };
                        if cell.appointments.is_empty() {
                            write!(f, "{}{:>2}    ", marker, cell.date.day())?;
                        } else {
                            write!(
                                f,
                                "{}{:>2}({:>2})",
                                marker,
                                cell.date.day(),
                                cell.appointments.len()
                            )?;
                        }
                    }
                    writeln!(f)?;
                }
            }
            ViewMode::Day | ViewMode::Week => {
                for cell in &self.cells {
                    writeln!(f, "\n{}:", cell.date.format("%A, %Y-%m-%d"))?;
                    if cell.appointments.is_empty() {
                        writeln!(f, "  (no appointments)")?;
                        continue;
                    }
                    let layout = self.layout_for(cell.date);
                    for appointment in &cell.appointments {
                        let style = style_for(appointment);
                        let position = layout
                            .and_then(|l| l.find(&appointment.id))
                            .map(|b| format!("+{}m/{}m", b.top_offset, b.height))
                            .unwrap_or_default();
                        writeln!(
                            f,
                            "  {} - {} [{}] {:<28} {:<10} {:<9}{} {}",
                            appointment.start.format("%H:%M"),
                            appointment.end.format("%H:%M"),
                            appointment.kind.badge(),
                            appointment.title,
                            appointment.doctor_id,
                            appointment.status.name(),
                            if style.muted { " (muted)" } else { "" },
                            position
                        )?;
                    }
                }
            }
        }

        write!(f, "{} appointment(s) shown", self.appointment_count())
    }
}
