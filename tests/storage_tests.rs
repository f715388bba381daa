use flexsheet::db::pool::DbPool;
use flexsheet::errors::AppError;
use flexsheet::models::{DayState, EmployeeRecord, WorkingDay};
use flexsheet::storage::{Backend, DatabaseBackend, Days, FileBackend};
use std::fs;

mod common;
use common::{Sandbox, at, date, time};

fn sample_days() -> Days {
    let mut days = Days::new();

    let mut full = WorkingDay::new(date(2024, 3, 4));
    full.start_time = Some(time(8, 0));
    full.end_time = Some(time(16, 30));
    full.break_time = Some(1800);
    days.insert(full.date(), full);

    let mut vacation = WorkingDay::new(date(2024, 3, 5));
    vacation.state = DayState::Vacation;
    days.insert(vacation.date(), vacation);

    let mut open = WorkingDay::new(date(2024, 3, 6));
    open.start_time = Some(time(9, 15));
    days.insert(open.date(), open);

    let mut inverted = WorkingDay::new(date(2024, 3, 7));
    inverted.start_time = Some(time(17, 0));
    inverted.end_time = Some(time(9, 0));
    inverted.state = DayState::Sick;
    days.insert(inverted.date(), inverted);

    days
}

fn backends(sb: &Sandbox) -> Vec<Box<dyn Backend>> {
    vec![
        Box::new(FileBackend::new(sb.data_dir())),
        Box::new(DatabaseBackend::new(sb.db_file(), true)),
    ]
}

#[test]
fn test_round_trip_preserves_days() {
    let sb = Sandbox::new("storage_round_trip");
    let days = sample_days();

    for backend in backends(&sb) {
        let report = backend.save_working_days("e1", &days).unwrap();
        assert_eq!(report.inserted, 4, "{:?}", backend.kind());

        let loaded = backend.load_working_days("e1").unwrap();
        assert_eq!(loaded, days, "{:?}", backend.kind());
        assert!(backend.load_working_days("someone-else").unwrap().is_empty());
    }
}

#[test]
fn test_empty_days_are_not_stored() {
    let sb = Sandbox::new("storage_empty_days");
    let mut days = sample_days();
    days.insert(date(2024, 3, 8), WorkingDay::new(date(2024, 3, 8)));

    for backend in backends(&sb) {
        let report = backend.save_working_days("e1", &days).unwrap();
        assert_eq!(report.inserted, 4);
        assert!(
            !backend
                .load_working_days("e1")
                .unwrap()
                .contains_key(&date(2024, 3, 8))
        );
    }
}

#[test]
fn test_second_save_changes_nothing() {
    let sb = Sandbox::new("storage_idempotent");
    let days = sample_days();

    let file = FileBackend::new(sb.data_dir());
    file.save_working_days("e1", &days).unwrap();
    let first = fs::read_to_string(file.timesheet_path("e1")).unwrap();
    let report = file.save_working_days("e1", &days).unwrap();
    assert_eq!(report.written(), 0);
    assert_eq!(report.unchanged, 4);
    assert_eq!(fs::read_to_string(file.timesheet_path("e1")).unwrap(), first);

    let db = DatabaseBackend::new(sb.db_file(), true);
    db.save_working_days("e1", &days).unwrap();
    let stored = db.load_working_days("e1").unwrap();
    let report = db.save_working_days("e1", &days).unwrap();
    assert_eq!(report.written(), 0);
    assert_eq!(report.unchanged, 4);
    assert_eq!(db.load_working_days("e1").unwrap(), stored);
}

#[test]
fn test_full_traffic_rewrites_rows_with_same_result() {
    let sb = Sandbox::new("storage_full_traffic");
    let days = sample_days();
    let db = DatabaseBackend::new(sb.db_file(), false);

    db.save_working_days("e1", &days).unwrap();
    let report = db.save_working_days("e1", &days).unwrap();
    assert_eq!(report.updated, 4);
    assert_eq!(db.load_working_days("e1").unwrap(), days);
}

#[test]
fn test_changed_day_is_updated() {
    let sb = Sandbox::new("storage_update");
    let mut days = sample_days();

    for backend in backends(&sb) {
        backend.save_working_days("e1", &days).unwrap();
        if let Some(d) = days.get_mut(&date(2024, 3, 6)) {
            d.end_time = Some(time(18, 0));
        }
        let report = backend.save_working_days("e1", &days).unwrap();
        assert_eq!((report.updated, report.unchanged), (1, 3));
        assert_eq!(
            backend.load_working_days("e1").unwrap()[&date(2024, 3, 6)].end_time,
            Some(time(18, 0))
        );
        if let Some(d) = days.get_mut(&date(2024, 3, 6)) {
            d.end_time = None;
        }
    }
}

#[test]
fn test_cleared_day_disappears_after_save() {
    let sb = Sandbox::new("storage_clear");

    for backend in backends(&sb) {
        let mut days = sample_days();
        backend.save_working_days("e1", &days).unwrap();

        if let Some(d) = days.get_mut(&date(2024, 3, 4)) {
            d.clear();
        }
        days.remove(&date(2024, 3, 7));
        let report = backend.save_working_days("e1", &days).unwrap();
        assert_eq!(report.deleted, 2, "{:?}", backend.kind());

        let loaded = backend.load_working_days("e1").unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(!loaded.contains_key(&date(2024, 3, 4)));
    }
}

#[test]
fn test_delete_day() {
    let sb = Sandbox::new("storage_delete_day");

    for backend in backends(&sb) {
        backend.save_working_days("e1", &sample_days()).unwrap();
        assert!(backend.delete_day("e1", date(2024, 3, 5)).unwrap());
        assert!(!backend.delete_day("e1", date(2024, 3, 5)).unwrap());
        assert_eq!(backend.load_working_days("e1").unwrap().len(), 3);
    }
}

#[test]
fn test_employee_records() {
    let sb = Sandbox::new("storage_employees");
    let record = EmployeeRecord {
        employee_id: "e1".into(),
        vacation_days: 28,
        old_vacation_days: 2,
        on_break: Some(at(2024, 3, 4, 12, 0, 0) + chrono::Duration::milliseconds(250)),
    };
    let other = EmployeeRecord {
        employee_id: "e2".into(),
        vacation_days: 30,
        old_vacation_days: 0,
        on_break: None,
    };

    for backend in backends(&sb) {
        assert_eq!(backend.load_employee("e1").unwrap(), None);
        backend.save_employee(&record).unwrap();
        backend.save_employee(&other).unwrap();
        assert_eq!(backend.load_employee("e1").unwrap(), Some(record.clone()));
        assert_eq!(backend.load_employee("e2").unwrap(), Some(other.clone()));

        let closed = EmployeeRecord {
            on_break: None,
            ..record.clone()
        };
        backend.save_employee(&closed).unwrap();
        assert_eq!(backend.load_employee("e1").unwrap(), Some(closed));
    }
}

#[test]
fn test_file_backend_reads_legacy_rows() {
    let sb = Sandbox::new("storage_legacy_csv");
    let backend = FileBackend::new(sb.data_dir());
    fs::create_dir_all(backend.timesheet_path("e1").parent().unwrap()).unwrap();
    fs::write(
        backend.timesheet_path("e1"),
        "Date,Start Time,End Time,Break Time,State\n\
         2024-03-04,08:00,16:30,1800.0,default\n\
         2024-03-05,,,,\n\
         2024-03-06,zz,17:00,,sick\n\
         not-a-date,08:00,16:00,,default\n",
    )
    .unwrap();

    let days = backend.load_working_days("e1").unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[&date(2024, 3, 4)].break_time, Some(1800));
    let sick = &days[&date(2024, 3, 6)];
    assert_eq!(sick.start_time, None);
    assert_eq!(sick.end_time, Some(time(17, 0)));
    assert_eq!(sick.state, DayState::Sick);
}

#[test]
fn test_file_header_written_for_empty_sheet() {
    let sb = Sandbox::new("storage_empty_header");
    let backend = FileBackend::new(sb.data_dir());
    backend.save_working_days("e1", &Days::new()).unwrap();

    let content = fs::read_to_string(backend.timesheet_path("e1")).unwrap();
    assert_eq!(content.trim_end(), "Date,Start Time,End Time,Break Time,State");
}

#[test]
fn test_database_rows_hold_net_seconds() {
    let sb = Sandbox::new("storage_db_columns");
    let db = DatabaseBackend::new(sb.db_file(), true);
    db.save_working_days("e1", &sample_days()).unwrap();

    let pool = DbPool::new(db.path()).unwrap();
    let (start, workhours): (String, Option<f64>) = pool
        .conn
        .query_row(
            "SELECT starttime, workhours FROM timesheet WHERE employee_id = 'e1' AND date = '2024-03-04'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(start, "2024-03-04 08:00:00");
    assert_eq!(workhours, Some(28800.0));

    let inverted: Option<f64> = pool
        .conn
        .query_row(
            "SELECT workhours FROM timesheet WHERE date = '2024-03-07'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(inverted, None);
}

#[test]
fn test_migrations_upgrade_old_schema() {
    let sb = Sandbox::new("storage_migrations");
    let path = sb.db_file();
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE timesheet (employee_id TEXT, date DATE, starttime DATETIME,
                 endtime DATETIME, workhours REAL, breaktime REAL, state TEXT);
             CREATE TABLE employees (employee_id TEXT PRIMARY KEY, vacation_days INTEGER,
                 old_vacation_days INTEGER);
             INSERT INTO timesheet VALUES ('e1', '2024-03-04', '2024-03-04 07:00:00', NULL, NULL, NULL, 'default');
             INSERT INTO timesheet VALUES ('e1', '2024-03-04', '2024-03-04 08:00:00', '2024-03-04 16:00:00', 28800, 0, 'default');
             INSERT INTO employees VALUES ('e1', 25, 1);",
        )
        .unwrap();
    }

    let db = DatabaseBackend::new(&path, true);
    let days = db.load_working_days("e1").unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[&date(2024, 3, 4)].start_time, Some(time(8, 0)));
    assert_eq!(days[&date(2024, 3, 4)].break_time, Some(0));

    let record = db.load_employee("e1").unwrap().unwrap();
    assert_eq!((record.vacation_days, record.old_vacation_days), (25, 1));
    assert_eq!(record.on_break, None);

    // running the migrations again is a no-op
    DbPool::new(db.path()).unwrap();
    let applied: i64 = DbPool::new(db.path())
        .unwrap()
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(applied, 2);
}

#[test]
fn test_employee_id_cannot_overwrite_records_file() {
    let sb = Sandbox::new("storage_id_employees");
    let backend = FileBackend::new(sb.data_dir());
    let alice = EmployeeRecord {
        employee_id: "alice".into(),
        vacation_days: 25,
        old_vacation_days: 3,
        on_break: None,
    };
    backend.save_employee(&alice).unwrap();

    let mut days = Days::new();
    let mut day = WorkingDay::new(date(2024, 3, 4));
    day.start_time = Some(time(8, 0));
    days.insert(day.date(), day);
    backend
        .save_employee(&EmployeeRecord {
            employee_id: "employees".into(),
            vacation_days: 30,
            old_vacation_days: 0,
            on_break: None,
        })
        .unwrap();
    backend.save_working_days("employees", &days).unwrap();

    assert_eq!(backend.load_employee("alice").unwrap(), Some(alice));
    assert_eq!(backend.load_working_days("employees").unwrap(), days);
    assert_ne!(backend.timesheet_path("employees"), std::path::Path::new(&sb.data_dir()).join("employees.csv"));
}

#[test]
fn test_file_save_keeps_unreadable_timesheet() {
    let sb = Sandbox::new("storage_unreadable_csv");
    let backend = FileBackend::new(sb.data_dir());
    let path = backend.timesheet_path("e1");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let broken = "Date,Start Time,End Time,Break Time,State\n2024-03-04,08:00\n";
    fs::write(&path, broken).unwrap();

    let result = backend.save_working_days("e1", &sample_days());
    assert!(matches!(result, Err(AppError::Csv(_))), "{result:?}");
    assert_eq!(fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn test_failed_database_save_rolls_back() {
    let sb = Sandbox::new("storage_db_rollback");
    let db = DatabaseBackend::new(sb.db_file(), true);

    let mut vacation = WorkingDay::new(date(2024, 3, 5));
    vacation.state = DayState::Vacation;
    let mut days = Days::new();
    days.insert(vacation.date(), vacation.clone());
    db.save_working_days("e1", &days).unwrap();

    rusqlite::Connection::open(db.path())
        .unwrap()
        .execute_batch(
            "CREATE TRIGGER no_updates BEFORE UPDATE ON timesheet
             BEGIN SELECT RAISE(ABORT, 'updates disabled'); END;",
        )
        .unwrap();

    // 03-04 is inserted first, then the update of 03-05 aborts
    let mut full = WorkingDay::new(date(2024, 3, 4));
    full.start_time = Some(time(8, 0));
    full.end_time = Some(time(16, 0));
    days.insert(full.date(), full);
    days.get_mut(&date(2024, 3, 5)).unwrap().state = DayState::Sick;

    let result = db.save_working_days("e1", &days);
    assert!(matches!(result, Err(AppError::Db(_))), "{result:?}");

    let stored = db.load_working_days("e1").unwrap();
    assert!(!stored.contains_key(&date(2024, 3, 4)));
    assert_eq!(stored[&date(2024, 3, 5)], vacation);
}
