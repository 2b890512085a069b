/// Fixed color descriptors for appointment status and type.

use crate::models::{Appointment, AppointmentType, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleDescriptor {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

impl Status {
    /// Fill colors for the appointment box.
    pub fn style(&self) -> StyleDescriptor {
        match self {
            Status::Scheduled => StyleDescriptor {
                background: "#dbeafe",
                border: "#3b82f6",
                text: "#1e3a8a",
            },
            Status::Completed => StyleDescriptor {
                background: "#dcfce7",
                border: "#22c55e",
                text: "#14532d",
            },
            Status::Canceled => StyleDescriptor {
                background: "#fee2e2",
                border: "#ef4444",
                text: "#7f1d1d",
            },
            Status::NoShow => StyleDescriptor {
                background: "#fef3c7",
                border: "#f59e0b",
                text: "#78350f",
            },
        }
    }

    /// Canceled and no-show appointments are drawn faded.
    pub fn is_muted(&self) -> bool {
        matches!(self, Status::Canceled | Status::NoShow)
    }
}

impl AppointmentType {
    /// Accent chip colors.
    pub fn style(&self) -> StyleDescriptor {
        match self {
            AppointmentType::FollowUp => StyleDescriptor {
                background: "#ede9fe",
                border: "#8b5cf6",
                text: "#4c1d95",
            },
            AppointmentType::NewPatient => StyleDescriptor {
                background: "#cffafe",
                border: "#06b6d4",
                text: "#164e63",
            },
            AppointmentType::Emergency => StyleDescriptor {
                background: "#ffe4e6",
                border: "#e11d48",
                text: "#881337",
            },
            AppointmentType::Routine => StyleDescriptor {
                background: "#f1f5f9",
                border: "#64748b",
                text: "#0f172a",
            },
        }
    }

    /// Single-letter badge used by the text renderer.
    pub fn badge(&self) -> char {
        match self {
            AppointmentType::FollowUp => 'F',
            AppointmentType::NewPatient => 'N',
            AppointmentType::Emergency => '!',
            AppointmentType::Routine => 'R',
        }
    }
}

/// Resolved styling for one appointment box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentStyle {
    pub fill: StyleDescriptor,
    pub accent: StyleDescriptor,
    pub muted: bool,
}

pub fn style_for(appointment: &Appointment) -> AppointmentStyle {
    AppointmentStyle {
        fill: appointment.status.style(),
        accent: appointment.kind.style(),
        muted: appointment.status.is_muted(),
    }
}
