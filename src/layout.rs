/// Time-axis layout for Day and Week views.
///
/// Minutes are the unit of truth: `top_offset` is measured from the start of
/// the visible-hours window and may be negative for early appointments, which
/// are laid out but not clipped. Overlapping appointments are not split into
/// columns. They stack in start order with the later one on top, and a hovered
/// box is lifted to the front.

use crate::config::CalendarConfig;
use crate::grid::GridCell;
use crate::models::Appointment;
use chrono::{NaiveDate, NaiveDateTime, Timelike};

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    pub appointment_id: String,
    pub date: NaiveDate,
    pub top_offset: i64,
    pub height: i64,
    /// Stacking position within the day; higher paints later.
    pub z_index: usize,
    pub outside_window: bool,
}

impl LayoutBox {
    pub fn bottom(&self) -> i64 {
        self.top_offset + self.height
    }

    /// Scale to pixels as `(top, height)`.
    pub fn to_pixels(&self, pixels_per_minute: f32) -> (f32, f32) {
        (
            self.top_offset as f32 * pixels_per_minute,
            self.height as f32 * pixels_per_minute,
        )
    }

    pub fn overlaps(&self, other: &LayoutBox) -> bool {
        self.date == other.date
            && self.top_offset < other.bottom()
            && other.top_offset < self.bottom()
    }
}

/// Boxes for one day column.
#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub boxes: Vec<LayoutBox>,
}

impl DayLayout {
    /// Boxes bottom-to-top; the hovered appointment, if present, paints last.
    pub fn paint_order(&self, hovered: Option<&str>) -> Vec<&LayoutBox> {
        let mut order: Vec<&LayoutBox> = self.boxes.iter().collect();
        order.sort_by_key(|b| b.z_index);
        if let Some(id) = hovered {
            if let Some(pos) = order.iter().position(|b| b.appointment_id == id) {
                let lifted = order.remove(pos);
                order.push(lifted);
            }
        }
        order
    }

    pub fn find(&self, appointment_id: &str) -> Option<&LayoutBox> {
        self.boxes.iter().find(|b| b.appointment_id == appointment_id)
    }
}

fn minutes_of_day(timestamp: &NaiveDateTime) -> i64 {
    timestamp.hour() as i64 * 60 + timestamp.minute() as i64
}

/// Position and height of a single appointment relative to the visible window.
pub fn layout(appointment: &Appointment, config: &CalendarConfig) -> LayoutBox {
    let start_minutes = minutes_of_day(&appointment.start);
    let duration = appointment.duration_minutes();
    let end_minutes = start_minutes + duration.max(0);

    LayoutBox {
        appointment_id: appointment.id.clone(),
        date: appointment.start_date(),
        top_offset: start_minutes - config.visible_start_minutes(),
        height: duration.max(config.min_visible_minutes),
        z_index: 0,
        outside_window: start_minutes < config.visible_start_minutes()
            || end_minutes > config.visible_end_minutes(),
    }
}

/// Lay out a bucketed cell. The cell's appointments must already be in
/// start order, which fixes the stacking order.
pub fn layout_day(cell: &GridCell, config: &CalendarConfig) -> DayLayout {
    let boxes = cell
        .appointments
        .iter()
        .enumerate()
        .map(|(z_index, appointment)| LayoutBox {
            z_index,
            ..layout(appointment, config)
        })
        .collect();

    DayLayout {
        date: cell.date,
        boxes,
    }
}

pub fn layout_cells(cells: &[GridCell], config: &CalendarConfig) -> Vec<DayLayout> {
    cells.iter().map(|cell| layout_day(cell, config)).collect()
}
