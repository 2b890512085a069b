//! Appointment calendar engine for the clinic administration console.
//!
//! Turns a flat appointment list plus a view state (anchor date, view mode,
//! filters) into a renderable Day, Week or Month grid with time-axis layout.

pub mod bucket;
pub mod calendar;
pub mod config;
pub mod error;
pub mod filter;
pub mod grid;
pub mod layout;
pub mod models;
pub mod source;
pub mod style;

pub use calendar::{CalendarCommand, CalendarController, CalendarView, ViewState};
pub use config::CalendarConfig;
pub use error::CalendarError;
pub use filter::{FilterUpdate, Filters, Selection};
pub use grid::{DateRange, Direction, GridCell, ViewMode};
pub use layout::{DayLayout, LayoutBox};
pub use models::{Appointment, AppointmentRecord, AppointmentType, Status};
pub use source::{AppointmentSource, FixtureSource, JsonFileSource};
