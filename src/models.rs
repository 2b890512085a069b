/// Data models for the appointment calendar.
///
/// This module defines the records the calendar core consumes:
/// - Status: lifecycle state of an appointment
/// - AppointmentType: clinical category of an appointment
/// - Appointment: a typed, read-only appointment as the core sees it
/// - AppointmentRecord: the loosely typed wire shape delivered by the data service

use crate::error::CalendarError;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Scheduled,
    Completed,
    Canceled,
    NoShow,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Scheduled,
        Status::Completed,
        Status::Canceled,
        Status::NoShow,
    ];

    /// Convert a keyword such as `no-show` into a Status.
    pub fn from_string(value: &str) -> Result<Self, CalendarError> {
        match value.to_lowercase().trim() {
            "scheduled" => Ok(Status::Scheduled),
            "completed" => Ok(Status::Completed),
            "canceled" | "cancelled" => Ok(Status::Canceled),
            "no-show" | "no_show" | "noshow" => Ok(Status::NoShow),
            _ => Err(CalendarError::UnknownStatus(value.to_string())),
        }
    }

    /// Wire keyword for this status.
    pub fn name(&self) -> &'static str {
        match self {
            Status::Scheduled => "scheduled",
            Status::Completed => "completed",
            Status::Canceled => "canceled",
            Status::NoShow => "no-show",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Clinical category of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AppointmentType {
    FollowUp,
    NewPatient,
    Emergency,
    Routine,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 4] = [
        AppointmentType::FollowUp,
        AppointmentType::NewPatient,
        AppointmentType::Emergency,
        AppointmentType::Routine,
    ];

    pub fn from_string(value: &str) -> Result<Self, CalendarError> {
        match value.to_lowercase().trim() {
            "follow-up" | "follow_up" | "followup" => Ok(AppointmentType::FollowUp),
            "new-patient" | "new_patient" => Ok(AppointmentType::NewPatient),
            "emergency" => Ok(AppointmentType::Emergency),
            "routine" => Ok(AppointmentType::Routine),
            _ => Err(CalendarError::UnknownType(value.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AppointmentType::FollowUp => "follow-up",
            AppointmentType::NewPatient => "new-patient",
            AppointmentType::Emergency => "emergency",
            AppointmentType::Routine => "routine",
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An appointment as seen by the calendar core.
///
/// Timestamps are local wall-clock times. `end > start` is expected but not
/// enforced here; the booking form owns that validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: Status,
    pub kind: AppointmentType,
    pub notes: String,
}

impl Appointment {
    /// Create a scheduled routine appointment; the remaining fields are set
    /// with the `with_*` methods.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, CalendarError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CalendarError::malformed(None, "appointment id cannot be empty"));
        }

        Ok(Appointment {
            id,
            patient_id: String::new(),
            doctor_id: String::new(),
            title: title.into(),
            start,
            end,
            status: Status::Scheduled,
            kind: AppointmentType::Routine,
            notes: String::new(),
        })
    }

    pub fn with_doctor(mut self, doctor_id: impl Into<String>) -> Self {
        self.doctor_id = doctor_id.into();
        self
    }

    pub fn with_patient(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = patient_id.into();
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_kind(mut self, kind: AppointmentType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Duration in whole minutes; negative when the record is inverted.
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Local calendar day the appointment starts on.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Check if this appointment overlaps with another in time.
    pub fn overlaps_with(&self, other: &Appointment) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Lowercased title followed directly by notes, the haystack for
    /// free-text search. No separator is inserted.
    pub fn searchable_text(&self) -> String {
        format!("{}{}", self.title, self.notes).to_lowercase()
    }
}

/// Appointment as delivered by the clinic data service.
///
/// Every field is optional so that a single bad row does not fail the whole
/// payload; conversion into [`Appointment`] decides what is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentRecord {
    pub id: Option<String>,
    pub patient_id: Option<String>,
    pub doctor_id: Option<String>,
    pub title: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<AppointmentRecord> for Appointment {
    type Error = CalendarError;

    fn try_from(record: AppointmentRecord) -> Result<Self, Self::Error> {
        let id = match record.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(CalendarError::malformed(None, "missing id")),
        };

        let start = required_timestamp(&id, "startTime", record.start_time.as_deref())?;
        let end = required_timestamp(&id, "endTime", record.end_time.as_deref())?;

        let status = match record.status.as_deref() {
            Some(value) => Status::from_string(value)
                .map_err(|e| CalendarError::malformed(Some(&id), e.to_string()))?,
            None => return Err(CalendarError::malformed(Some(&id), "missing status")),
        };
        let kind = match record.kind.as_deref() {
            Some(value) => AppointmentType::from_string(value)
                .map_err(|e| CalendarError::malformed(Some(&id), e.to_string()))?,
            None => return Err(CalendarError::malformed(Some(&id), "missing type")),
        };

        Ok(Appointment {
            id,
            patient_id: record.patient_id.unwrap_or_default(),
            doctor_id: record.doctor_id.unwrap_or_default(),
            title: record.title.unwrap_or_default(),
            start,
            end,
            status,
            kind,
            notes: record.notes.unwrap_or_default(),
        })
    }
}

fn required_timestamp(
    id: &str,
    field: &str,
    value: Option<&str>,
) -> Result<NaiveDateTime, CalendarError> {
    let value =
        value.ok_or_else(|| CalendarError::malformed(Some(id), format!("missing {}", field)))?;
    parse_timestamp(value).ok_or_else(|| {
        CalendarError::malformed(Some(id), format!("unparseable {}: '{}'", field, value))
    })
}

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp into local wall-clock time.
///
/// Offset-carrying RFC 3339 values are converted to the host's local zone;
/// naive values are taken as already local.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
