/// Assigns appointments to the grid cell of the day they start on.

use crate::grid::GridCell;
use crate::models::Appointment;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Fill `cells` with the appointments starting on each cell's date.
///
/// Within a cell appointments are ordered by start time, then id. Appointments
/// outside the grid's dates are dropped.
pub fn bucket(appointments: &[Appointment], cells: Vec<GridCell>) -> Vec<GridCell> {
    let mut cells: Vec<GridCell> = cells
        .into_iter()
        .map(|cell| GridCell {
            appointments: Vec::new(),
            ..cell
        })
        .collect();

    let index: HashMap<NaiveDate, usize> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| (cell.date, i))
        .collect();

    for appointment in appointments {
        if let Some(&i) = index.get(&appointment.start_date()) {
            cells[i].appointments.push(appointment.clone());
        }
    }

    for cell in &mut cells {
        cell.appointments
            .sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    }

    cells
}

/// Number of appointments placed across all cells.
pub fn placed_count(cells: &[GridCell]) -> usize {
    cells.iter().map(|cell| cell.appointments.len()).sum()
}
