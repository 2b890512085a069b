/// Appointment sources.
///
/// The calendar core never fetches data itself. Hosts hand it appointments
/// obtained through an [`AppointmentSource`]: the JSON export of the clinic
/// data service, or a fixture for tests and demos.

use crate::error::CalendarError;
use crate::grid::{week_start, DateRange};
use crate::models::{Appointment, AppointmentRecord, AppointmentType, Status};
use chrono::{Days, Duration, NaiveDate, NaiveTime};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

pub trait AppointmentSource {
    fn name(&self) -> &str;

    /// Appointments starting within `range`, in no particular order.
    fn fetch(&self, range: &DateRange) -> Result<Vec<Appointment>, CalendarError>;
}

/// Result of converting a batch of wire records.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub appointments: Vec<Appointment>,
    pub rejected: Vec<CalendarError>,
}

/// Convert wire records, dropping and logging the malformed ones.
pub fn normalize(records: Vec<AppointmentRecord>) -> LoadReport {
    let mut report = LoadReport::default();
    for record in records {
        match Appointment::try_from(record) {
            Ok(appointment) => report.appointments.push(appointment),
            Err(e) => {
                warn!(error = %e, "skipping appointment record");
                report.rejected.push(e);
            }
        }
    }
    report
}

/// Decode raw JSON rows one at a time, then convert them.
///
/// A row whose fields have the wrong JSON type is rejected on its own; the
/// rest of the batch still loads.
pub fn decode_rows(rows: Vec<Value>) -> LoadReport {
    let mut records = Vec::with_capacity(rows.len());
    let mut undecodable = Vec::new();
    for row in rows {
        let id = row_id(&row);
        match serde_json::from_value::<AppointmentRecord>(row) {
            Ok(record) => records.push(record),
            Err(e) => {
                let e = CalendarError::malformed(id.as_deref(), e.to_string());
                warn!(error = %e, "skipping appointment record");
                undecodable.push(e);
            }
        }
    }

    let mut report = normalize(records);
    report.rejected.extend(undecodable);
    report
}

fn row_id(row: &Value) -> Option<String> {
    match row.get("id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    }
}

fn within(appointments: &[Appointment], range: &DateRange) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| range.contains(a.start_date()))
        .cloned()
        .collect()
}

/// In-memory source for tests and the demo.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    name: String,
    appointments: Vec<Appointment>,
    failure: Option<String>,
}

impl FixtureSource {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        FixtureSource {
            name: "fixture".to_string(),
            appointments,
            failure: None,
        }
    }

    /// A source whose every fetch fails, standing in for an unreachable API.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        FixtureSource {
            name: "fixture".to_string(),
            appointments: Vec::new(),
            failure: Some(reason.into()),
        }
    }

    /// A fixed, plausible working week for the Sunday-based week containing
    /// `week_of`: three doctors, Monday to Friday, lunch kept free.
    pub fn demo(week_of: NaiveDate) -> Self {
        let monday = week_start(week_of)
            .checked_add_days(Days::new(1))
            .unwrap_or(week_of);

        let mut appointments = Vec::new();
        for (day, hour, minute, length, doctor, patient, title, kind, status, notes) in DEMO_WEEK {
            let Some(date) = monday.checked_add_days(Days::new(*day)) else {
                continue;
            };
            let Some(time) = NaiveTime::from_hms_opt(*hour, *minute, 0) else {
                continue;
            };
            let start = date.and_time(time);
            appointments.push(Appointment {
                id: Uuid::new_v4().to_string(),
                patient_id: patient.to_string(),
                doctor_id: doctor.to_string(),
                title: title.to_string(),
                start,
                end: start + Duration::minutes(*length),
                status: *status,
                kind: *kind,
                notes: notes.to_string(),
            });
        }

        FixtureSource {
            name: "demo".to_string(),
            appointments,
            failure: None,
        }
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }
}

impl AppointmentSource for FixtureSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, range: &DateRange) -> Result<Vec<Appointment>, CalendarError> {
        if let Some(reason) = &self.failure {
            return Err(CalendarError::SourceUnavailable {
                source_name: self.name.clone(),
                reason: reason.clone(),
            });
        }
        Ok(within(&self.appointments, range))
    }
}

type DemoEntry = (
    u64,
    u32,
    u32,
    i64,
    &'static str,
    &'static str,
    &'static str,
    AppointmentType,
    Status,
    &'static str,
);

#[rustfmt::skip]
const DEMO_WEEK: &[DemoEntry] = &[
    (0, 9, 0, 30, "dr-smith", "P001", "Annual checkup",
        AppointmentType::Routine, Status::Completed, "Fasting bloods taken"),
    (0, 9, 15, 15, "dr-smith", "P002", "Blood pressure review",
        AppointmentType::FollowUp, Status::Completed, ""),
    (0, 10, 30, 45, "dr-patel", "P003", "New patient intake",
        AppointmentType::NewPatient, Status::Scheduled, "Referred by Dr. Green"),
    (0, 14, 0, 30, "dr-lee", "P004", "Chest pain",
        AppointmentType::Emergency, Status::Completed, "ECG on arrival"),
    (1, 8, 30, 30, "dr-lee", "P005", "Vaccination",
        AppointmentType::Routine, Status::NoShow, ""),
    (1, 11, 0, 60, "dr-patel", "P006", "Diabetes follow-up",
        AppointmentType::FollowUp, Status::Scheduled, "Review HbA1c"),
    (1, 16, 0, 30, "dr-smith", "P007", "Prescription renewal",
        AppointmentType::Routine, Status::Canceled, "Patient rebooked"),
    (2, 9, 0, 15, "dr-smith", "P008", "Wound dressing",
        AppointmentType::FollowUp, Status::Scheduled, ""),
    (2, 9, 10, 50, "dr-smith", "P009", "Knee pain",
        AppointmentType::NewPatient, Status::Scheduled, "Bring X-ray"),
    (2, 13, 30, 30, "dr-lee", "P010", "Asthma review",
        AppointmentType::FollowUp, Status::Scheduled, "Inhaler technique"),
    (3, 10, 0, 30, "dr-patel", "P011", "Allergy consultation",
        AppointmentType::NewPatient, Status::Scheduled, ""),
    (3, 15, 30, 20, "dr-lee", "P012", "Laceration",
        AppointmentType::Emergency, Status::Scheduled, "Possible sutures"),
    (4, 7, 30, 30, "dr-smith", "P013", "Early lab draw",
        AppointmentType::Routine, Status::Scheduled, "Outside clinic hours"),
    (4, 11, 30, 30, "dr-patel", "P014", "Cholesterol results",
        AppointmentType::FollowUp, Status::Scheduled, "Discuss statins"),
    (4, 18, 30, 60, "dr-lee", "P015", "Evening physio",
        AppointmentType::Routine, Status::Scheduled, ""),
];

/// Reads a JSON array of appointment records exported by the data service.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        JsonFileSource { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and convert the whole file.
    pub fn load(&self) -> Result<LoadReport, CalendarError> {
        let text = fs::read_to_string(&self.path)?;
        let rows: Vec<Value> = serde_json::from_str(&text)?;
        let report = decode_rows(rows);
        debug!(
            path = %self.path.display(),
            loaded = report.appointments.len(),
            rejected = report.rejected.len(),
            "loaded appointment file"
        );
        Ok(report)
    }
}

impl AppointmentSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, range: &DateRange) -> Result<Vec<Appointment>, CalendarError> {
        let report = self.load()?;
        Ok(within(&report.appointments, range))
    }
}
