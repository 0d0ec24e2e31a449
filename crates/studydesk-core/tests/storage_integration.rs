//! GradeBook persistence against the SQLite store.

use studydesk_core::calendar::NewTask;
use studydesk_core::grading::{templates, Average, ModuleEdit, PassStatus};
use studydesk_core::storage::{keys, Database, GradeBook, KvStore};
use studydesk_core::{Event, FocusTimer, TimerState};

use chrono::{NaiveDate, NaiveTime};

fn file_book(dir: &tempfile::TempDir) -> GradeBook<Database> {
    GradeBook::new(Database::open_at(dir.path().join("studydesk.db")).unwrap())
}

#[test]
fn semester_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let semester = templates::default_semester()
        .with_module("unit5", "mod7", ModuleEdit::Exam(Some(12.0)))
        .unwrap()
        .with_module("unit5", "mod7", ModuleEdit::Practical(Some(15.0)))
        .unwrap();
    {
        let book = file_book(&dir);
        book.save_semester(&semester.calculate()).unwrap();
    }

    let book = file_book(&dir);
    let record = book.load_semester().expect("saved semester");
    assert_eq!(record.units.len(), 5);
    assert_eq!(record.semester_average, Average::Incomplete);
    assert_eq!(record.units[4].average, Average::Complete(13.0));
    assert_eq!(record.completed_modules, 1);
    assert!(book.last_semester_update().is_some());

    let restored = record.to_semester().recompute();
    assert_eq!(restored.units[4].average, Average::Complete(13.0));
}

#[test]
fn dashboard_blob_is_readable() {
    let book = GradeBook::new(Database::open_memory().unwrap());
    book.store()
        .set(
            keys::SEMESTER,
            r#"{
                "semesterName": "Semester 1",
                "units": [{
                    "id": "unit1", "name": "Unit 1", "coefficient": 2,
                    "modules": [{
                        "id": "mod1", "name": "Clonage", "coefficient": 3,
                        "hasTD": true, "hasTP": false,
                        "grades": {"emd": "", "td": 14, "tp": null},
                        "moyenne": null
                    }],
                    "moyenne": null
                }],
                "semesterAverage": null,
                "calculationTimestamp": "2025-05-20T10:00:00.000Z"
            }"#,
        )
        .unwrap();
    // A string exam score is not a stored number: the blob does not decode.
    assert!(book.load_semester().is_none());

    book.store()
        .set(
            keys::SEMESTER,
            r#"{
                "semesterName": "Semester 1",
                "units": [{
                    "id": "unit1", "name": "Unit 1", "coefficient": 2,
                    "modules": [{
                        "id": "mod1", "name": "Clonage", "coefficient": 3,
                        "hasTD": true, "hasTP": false,
                        "grades": {"emd": 12, "td": 14, "tp": null},
                        "moyenne": null
                    }],
                    "moyenne": null
                }],
                "semesterAverage": null,
                "calculationTimestamp": "2025-05-20T10:00:00.000Z"
            }"#,
        )
        .unwrap();
    let record = book.load_semester().unwrap();
    assert!(record.calculation_timestamp.is_some());
    let report = record.to_semester().calculate();
    assert_eq!(report.average.value().map(|v| (v * 1e6).round() / 1e6), Some(12.666667));
}

#[test]
fn partial_records_count_as_no_state() {
    let book = GradeBook::new(Database::open_memory().unwrap());
    book.store().set(keys::SEMESTER, r#"{"semesterName": "S1"}"#).unwrap();
    book.store().set(keys::YEAR, r#"{"semesters": []}"#).unwrap();
    book.store().set(keys::UNIT, "null").unwrap();
    assert!(book.load_semester().is_none());
    assert!(book.load_year().is_none());
    assert!(book.load_unit().is_none());
}

#[test]
fn year_roundtrip_keeps_status() {
    let book = GradeBook::new(Database::open_memory().unwrap());
    let report = templates::default_year().calculate();
    assert_eq!(report.status, Some(PassStatus::Admis));
    book.save_year(&report).unwrap();

    let record = book.load_year().unwrap();
    assert_eq!(record.academic_year, "2025-2026");
    assert_eq!(record.annual_average, Average::Complete(15.0));
    assert_eq!(record.status, Some(PassStatus::Admis));
    assert_eq!(record.to_year().calculate().average, Average::Complete(15.0));

    let event = book.clear_year().unwrap();
    assert!(matches!(event, Event::DataCleared { .. }));
    assert!(book.load_year().is_none());
}

#[test]
fn plain_dashboard_year_entries_load_as_manual() {
    let book = GradeBook::new(Database::open_memory().unwrap());
    book.store()
        .set(
            keys::YEAR,
            r#"{"academicYear": "2024-2025", "semesters": [
                {"id": "s1", "name": "Semester 1", "moyenne": 11, "coefficient": 1},
                {"id": "s2", "name": "Semester 2", "moyenne": null, "coefficient": 1}
            ], "annualAverage": null, "status": null}"#,
        )
        .unwrap();
    let year = book.load_year().unwrap().to_year();
    let report = year.calculate();
    assert!(report.status.is_none());

    let year = year
        .with_semester("s2", studydesk_core::SemesterEdit::Manual(Some(8.0)))
        .unwrap();
    let report = year.calculate();
    assert_eq!(report.average, Average::Complete(9.5));
    assert_eq!(report.status, Some(PassStatus::ARattraper));
}

#[test]
fn calendar_and_timer_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let book = file_book(&dir);

    let mut calendar = book.load_calendar();
    assert!(calendar.tasks().is_empty());
    let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    let time = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
    let id = calendar.add(NewTask::new("Lab Report", date, time)).unwrap().0.id.clone();
    book.save_calendar(&calendar).unwrap();

    let mut timer = FocusTimer::default();
    timer.start_at(1_000);
    timer.pause_at(61_000);
    book.save_timer(&timer).unwrap();

    let book = file_book(&dir);
    let calendar = book.load_calendar();
    assert_eq!(calendar.get(&id).unwrap().title, "Lab Report");
    let timer = book.load_timer().unwrap();
    assert_eq!(timer.state(), TimerState::Paused);
    assert_eq!(timer.format_remaining(), "24:00");
}

#[test]
fn corrupt_calendar_yields_empty() {
    let book = GradeBook::new(Database::open_memory().unwrap());
    book.store().set(keys::CALENDAR, "[{\"id\": 1}]").unwrap();
    assert!(book.load_calendar().tasks().is_empty());
}
