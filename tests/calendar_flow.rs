use chrono::{NaiveDate, NaiveDateTime};
use clinic_calendar::{
    Appointment, AppointmentType, CalendarCommand, CalendarController, CalendarError, Direction,
    FilterUpdate, FixtureSource, JsonFileSource, Selection, Status, ViewMode, ViewState,
};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, 0).unwrap()
}

fn scratch_file(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("clinic-calendar-{}.json", Uuid::new_v4()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn week_navigation_moves_appointments_in_and_out_of_view() {
    let controller = CalendarController::default();
    let source = FixtureSource::demo(date(2026, 10, 14));
    let state = ViewState::initial(date(2026, 10, 14));

    let view = controller.render(&state, &source);
    assert_eq!(view.title, "Week of Oct 11, 2026");
    assert_eq!(view.appointment_count(), 15);

    let next = CalendarCommand::Navigate(Direction::Next);
    let (state, view) = controller.dispatch(state, next, &source);
    assert_eq!(state.anchor_date, date(2026, 10, 21));
    assert_eq!(view.appointment_count(), 0);
    assert!(view.error.is_none());

    let previous = CalendarCommand::Navigate(Direction::Previous);
    let (state, view) = controller.dispatch(state, previous, &source);
    assert_eq!(state.anchor_date, date(2026, 10, 14));
    assert_eq!(view.appointment_count(), 15);
}

#[test]
fn day_view_lays_out_overlapping_morning() {
    let controller = CalendarController::default();
    let source = FixtureSource::demo(date(2026, 10, 14));
    let state = ViewState::initial(date(2026, 10, 14));
    let day_view = CalendarCommand::SetViewMode(ViewMode::Day);
    let (_, view) = controller.dispatch(state, day_view, &source);

    assert_eq!(view.cells.len(), 1);
    let cell = view.cell(date(2026, 10, 14)).unwrap();
    let titles: Vec<&str> = cell.appointments.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Wound dressing", "Knee pain", "Asthma review"]);

    let layout = view.layout_for(date(2026, 10, 14)).unwrap();
    let dressing = layout.find(&cell.appointments[0].id).unwrap();
    let knee = layout.find(&cell.appointments[1].id).unwrap();
    assert_eq!((dressing.top_offset, dressing.height), (60, 20));
    assert_eq!((knee.top_offset, knee.height), (70, 50));
    assert!(knee.z_index > dressing.z_index);

    let order = layout.paint_order(Some(dressing.appointment_id.as_str()));
    assert_eq!(order.last().unwrap().appointment_id, dressing.appointment_id);
}

#[test]
fn filters_combine_across_commands() {
    let controller = CalendarController::default();
    let source = FixtureSource::demo(date(2026, 10, 14));
    let state = ViewState::initial(date(2026, 10, 14));

    let (state, view) = controller.dispatch(
        state,
        CalendarCommand::SetFilter(FilterUpdate::Doctor(Selection::Only("dr-lee".to_string()))),
        &source,
    );
    assert_eq!(view.appointment_count(), 5);

    let (state, view) = controller.dispatch(
        state,
        CalendarCommand::SetFilter(FilterUpdate::Kind(Selection::Only(AppointmentType::Emergency))),
        &source,
    );
    assert_eq!(view.appointment_count(), 2);

    let (_, view) = controller.dispatch(
        state,
        CalendarCommand::SetFilter(FilterUpdate::Query("SUTURES".to_string())),
        &source,
    );
    assert_eq!(view.appointment_count(), 1);
    let placed: Vec<&Appointment> = view.cells.iter().flat_map(|c| &c.appointments).collect();
    assert_eq!(placed[0].title, "Laceration");
}

#[test]
fn unreachable_source_keeps_grid_shape() {
    let controller = CalendarController::default();
    let state = ViewState {
        view_mode: ViewMode::Month,
        ..ViewState::initial(date(2026, 10, 14))
    };
    let view = controller.render(&state, &FixtureSource::unavailable("503 Service Unavailable"));

    assert_eq!(view.cells.len(), 42);
    assert_eq!(view.appointment_count(), 0);
    assert!(view.error.unwrap().contains("503"));
}

#[test]
fn json_file_source_skips_malformed_rows() {
    let path = scratch_file(
        r#"[
            {"id": "a1", "patientId": "p1", "doctorId": "d1", "title": "Checkup",
             "startTime": "2026-10-14T09:00:00", "endTime": "2026-10-14T09:30:00",
             "status": "scheduled", "type": "routine", "notes": ""},
            {"id": "a2", "doctorId": "d1", "title": "Broken",
             "startTime": "soon", "endTime": "2026-10-14T10:30:00",
             "status": "scheduled", "type": "routine"},
            {"id": "a3", "doctorId": "d2", "title": "Flu shot",
             "startTime": "2026-10-15 08:00", "endTime": "2026-10-15 08:10",
             "status": "completed", "type": "follow-up"},
            {"id": "a4", "doctorId": "d2", "title": "Next month",
             "startTime": "2026-11-20 08:00", "endTime": "2026-11-20 08:10",
             "status": "completed", "type": "follow-up"}
        ]"#,
    );
    let source = JsonFileSource::new(&path);

    let report = source.load().unwrap();
    assert_eq!(report.appointments.len(), 3);
    assert_eq!(report.rejected.len(), 1);
    assert!(matches!(
        report.rejected[0],
        CalendarError::MalformedRecord { ref id, .. } if id == "a2"
    ));

    let controller = CalendarController::default();
    let view = controller.render(&ViewState::initial(date(2026, 10, 14)), &source);
    assert_eq!(view.appointment_count(), 2);
    let flu = view.cell(date(2026, 10, 15)).unwrap();
    assert_eq!(flu.appointments[0].status, Status::Completed);
    assert_eq!(view.layout_for(date(2026, 10, 15)).unwrap().boxes[0].height, 20);

    fs::remove_file(path).unwrap();
}

#[test]
fn wrongly_typed_timestamp_drops_one_row_not_the_week() {
    let path = scratch_file(
        r#"[
            {"id": "good", "doctorId": "d1", "title": "Checkup",
             "startTime": "2026-10-14 09:00", "endTime": "2026-10-14 09:30",
             "status": "scheduled", "type": "routine"},
            {"id": "epoch", "doctorId": "d1", "title": "Epoch millis",
             "startTime": 1791997200000, "endTime": "2026-10-14 10:30",
             "status": "scheduled", "type": "routine"}
        ]"#,
    );
    let source = JsonFileSource::new(&path);

    let report = source.load().unwrap();
    assert_eq!(report.appointments.len(), 1);
    assert_eq!(report.rejected.len(), 1);
    assert!(matches!(
        report.rejected[0],
        CalendarError::MalformedRecord { ref id, .. } if id == "epoch"
    ));

    let state = ViewState::initial(date(2026, 10, 14));
    let view = CalendarController::default().render(&state, &source);
    assert!(view.error.is_none());
    assert_eq!(view.appointment_count(), 1);

    fs::remove_file(path).unwrap();
}

#[test]
fn json_file_that_is_not_an_array_is_a_decode_error() {
    let path = scratch_file(r#"{"appointments": []}"#);
    let source = JsonFileSource::new(&path);
    let state = ViewState::initial(date(2026, 10, 14));
    let view = CalendarController::default().render(&state, &source);

    assert_eq!(view.cells.len(), 7);
    assert!(view.error.unwrap().starts_with("failed to decode appointments"));
    fs::remove_file(path).unwrap();
}

#[test]
fn appointments_outside_visible_hours_are_still_shown() {
    let controller = CalendarController::default();
    let day = date(2026, 10, 16);
    let early = Appointment::new("early", "Early lab draw", at(day, 7, 30), at(day, 8, 0))
        .unwrap()
        .with_kind(AppointmentType::Routine);
    let source = FixtureSource::new(vec![early]);
    let state = ViewState {
        anchor_date: day,
        view_mode: ViewMode::Day,
        ..ViewState::initial(day)
    };

    let view = controller.render(&state, &source);
    let b = &view.layout_for(day).unwrap().boxes[0];
    assert_eq!(b.top_offset, -30);
    assert!(b.outside_window);
}
