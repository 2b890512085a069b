/// Conjunctive appointment filtering.
///
/// Every active criterion must hold for an appointment to be kept. Input
/// order is preserved.

use crate::models::{Appointment, AppointmentType, Status};

/// A filter value that is either disabled (`All`) or requires an exact match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn is_active(&self) -> bool {
        matches!(self, Selection::Only(_))
    }

    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selection::All, Selection::Only)
    }
}

/// Filter criteria held in the view state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filters {
    pub doctor: Selection<String>,
    pub status: Selection<Status>,
    pub kind: Selection<AppointmentType>,
    pub query: String,
}

/// A single criterion change, as issued by the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Doctor(Selection<String>),
    Status(Selection<Status>),
    Kind(Selection<AppointmentType>),
    Query(String),
    ClearAll,
}

impl Filters {
    /// Return a copy with one criterion replaced.
    pub fn updated(&self, update: FilterUpdate) -> Filters {
        let mut next = self.clone();
        match update {
            FilterUpdate::Doctor(doctor) => next.doctor = doctor,
            FilterUpdate::Status(status) => next.status = status,
            FilterUpdate::Kind(kind) => next.kind = kind,
            FilterUpdate::Query(query) => next.query = query,
            FilterUpdate::ClearAll => next = Filters::default(),
        }
        next
    }

    /// Criteria from `other` overlaid on these; active criteria in `other` win.
    pub fn merged(&self, other: &Filters) -> Filters {
        Filters {
            doctor: overlay(&self.doctor, &other.doctor),
            status: overlay(&self.status, &other.status),
            kind: overlay(&self.kind, &other.kind),
            query: if other.query.trim().is_empty() {
                self.query.clone()
            } else {
                other.query.clone()
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.doctor.is_active()
            && !self.status.is_active()
            && !self.kind.is_active()
            && self.query.trim().is_empty()
    }

    /// Check a single appointment against every active criterion.
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.matches_doctor(appointment)
            && self.status.accepts(&appointment.status)
            && self.kind.accepts(&appointment.kind)
            && self.matches_query(appointment)
    }

    /// An appointment without a doctor never satisfies a doctor filter, even
    /// one selecting the empty id.
    fn matches_doctor(&self, appointment: &Appointment) -> bool {
        match &self.doctor {
            Selection::All => true,
            Selection::Only(doctor) => {
                !appointment.doctor_id.is_empty() && *doctor == appointment.doctor_id
            }
        }
    }

    fn matches_query(&self, appointment: &Appointment) -> bool {
        let needle = self.query.trim().to_lowercase();
        needle.is_empty() || appointment.searchable_text().contains(&needle)
    }

    /// Short human description of the active criteria.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Selection::Only(doctor) = &self.doctor {
            parts.push(format!("doctor={}", doctor));
        }
        if let Selection::Only(status) = &self.status {
            parts.push(format!("status={}", status));
        }
        if let Selection::Only(kind) = &self.kind {
            parts.push(format!("type={}", kind));
        }
        if !self.query.trim().is_empty() {
            parts.push(format!("query=\"{}\"", self.query.trim()));
        }
        if parts.is_empty() {
            "all".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn overlay<T: Clone + PartialEq>(base: &Selection<T>, top: &Selection<T>) -> Selection<T> {
    if top.is_active() {
        top.clone()
    } else {
        base.clone()
    }
}

/// Keep the appointments matching every active criterion, in input order.
pub fn apply(appointments: &[Appointment], filters: &Filters) -> Vec<Appointment> {
    if filters.is_empty() {
        return appointments.to_vec();
    }
    appointments
        .iter()
        .filter(|appointment| filters.matches(appointment))
        .cloned()
        .collect()
}
