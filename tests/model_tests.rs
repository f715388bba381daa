use flexsheet::core::flex;
use flexsheet::errors::AppError;
use flexsheet::models::{DayState, WorkTimeEmployee, WorkingDay};
use flexsheet::utils::time::{
    duration_seconds, format_duration, parse_break, parse_datetime, parse_time,
};

mod common;
use common::{at, date, time};

fn day(d: chrono::NaiveDate, start: u32, end: u32, break_secs: Option<i64>) -> WorkingDay {
    let mut day = WorkingDay::new(d);
    day.start_time = Some(time(start / 100, start % 100));
    day.end_time = Some(time(end / 100, end % 100));
    day.break_time = break_secs;
    day
}

#[test]
fn test_parse_time_accepts_hh_mm_and_seconds() {
    assert_eq!(parse_time("08:15").unwrap(), Some(time(8, 15)));
    assert_eq!(parse_time("8:15").unwrap(), Some(time(8, 15)));
    assert_eq!(parse_time("08:15:59").unwrap(), Some(time(8, 15)));
    assert_eq!(parse_time("   ").unwrap(), None);
}

#[test]
fn test_parse_time_rejects_garbage() {
    for bad in ["24:00", "12:60", "noon", "12", "12:5"] {
        let err = parse_time(bad).unwrap_err();
        assert!(err.is_format_error(), "{bad} gave {err:?}");
    }
}

#[test]
fn test_parse_break_forms() {
    assert_eq!(parse_break("1800").unwrap(), Some(1800));
    assert_eq!(parse_break("1800.4").unwrap(), Some(1800));
    assert_eq!(parse_break("00:45").unwrap(), Some(2700));
    assert_eq!(parse_break("").unwrap(), None);
    assert!(parse_break("-5").is_err());
}

#[test]
fn test_parse_datetime_keeps_fraction() {
    let dt = parse_datetime("2024-03-04 12:00:30.250").unwrap();
    assert_eq!(dt.time().format("%H:%M:%S%.3f").to_string(), "12:00:30.250");
    assert_eq!(parse_datetime("2024-03-04 12:00").unwrap(), at(2024, 3, 4, 12, 0, 0));
}

#[test]
fn test_duration_seconds_rejects_inverted_pair() {
    assert_eq!(duration_seconds(time(8, 0), time(16, 30)).unwrap(), 30600);
    assert_eq!(duration_seconds(time(9, 0), time(9, 0)).unwrap(), 0);
    assert!(matches!(
        duration_seconds(time(17, 0), time(9, 0)),
        Err(AppError::EndBeforeStart { .. })
    ));
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Some(1800), true), "+ 00:30");
    assert_eq!(format_duration(Some(0), true), "+ 00:00");
    assert_eq!(format_duration(Some(-5400), true), "- 01:30");
    assert_eq!(format_duration(Some(-59), true), "- 00:00");
    assert_eq!(format_duration(Some(36_059), false), "10:00");
    assert_eq!(format_duration(None, true), "--:--");
}

#[test]
fn test_work_time_subtracts_break() {
    let d = day(date(2024, 3, 4), 800, 1630, Some(1800));
    assert_eq!(
        d.get_work_time(),
        Some(duration_seconds(time(8, 0), time(16, 30)).unwrap() - 1800)
    );
    assert_eq!(day(date(2024, 3, 4), 800, 1630, None).get_work_time(), Some(30600));
}

#[test]
fn test_work_time_is_none_for_inverted_or_partial_days() {
    let inverted = day(date(2024, 3, 4), 1700, 900, None);
    assert_eq!(inverted.get_work_time(), None);
    assert!(inverted.validate().is_err());

    let mut partial = WorkingDay::new(date(2024, 3, 4));
    partial.start_time = Some(time(8, 0));
    assert_eq!(partial.get_work_time(), None);
    assert!(partial.has_entry());
}

#[test]
fn test_has_entry() {
    let mut d = WorkingDay::new(date(2024, 3, 4));
    assert!(!d.has_entry());
    d.state = DayState::Sick;
    assert!(d.has_entry());
    d.clear();
    assert!(!d.has_entry());
}

#[test]
fn test_flex_time_example_monday() {
    let mut emp = WorkTimeEmployee::new("e1", 30);
    *emp.create_day(date(2024, 3, 4)) = day(date(2024, 3, 4), 800, 1630, Some(1800));

    assert_eq!(emp.get_flex_time(8), 1800);
    assert_eq!(format_duration(Some(emp.get_flex_time(8)), true), "+ 00:30");
}

#[test]
fn test_flex_time_vacation_and_weekend_owe_nothing() {
    let mut emp = WorkTimeEmployee::new("e1", 30);
    emp.create_day(date(2024, 3, 4)).state = DayState::Vacation;
    assert_eq!(emp.get_flex_time(8), 0);

    // Saturday work is pure surplus
    *emp.create_day(date(2024, 3, 9)) = day(date(2024, 3, 9), 1000, 1200, None);
    assert_eq!(emp.get_flex_time(8), 7200);

    // an empty weekday is not counted
    emp.create_day(date(2024, 3, 5));
    assert_eq!(emp.get_flex_time(8), 7200);
}

#[test]
fn test_flex_time_deficit_and_until() {
    let mut emp = WorkTimeEmployee::new("e1", 30);
    *emp.create_day(date(2024, 3, 4)) = day(date(2024, 3, 4), 800, 1500, None);
    *emp.create_day(date(2024, 3, 5)) = day(date(2024, 3, 5), 800, 1800, None);

    assert_eq!(emp.get_flex_time(8), -3600 + 7200);
    assert_eq!(
        flex::flex_time_until(emp.working_days().values(), 8, date(2024, 3, 4)),
        -3600
    );
    assert_eq!(flex::worked_total(emp.working_days().values()), 25200 + 36000);
}

#[test]
fn test_inverted_day_still_owes_hours() {
    let mut emp = WorkTimeEmployee::new("e1", 30);
    *emp.create_day(date(2024, 3, 4)) = day(date(2024, 3, 4), 1700, 900, None);
    assert_eq!(emp.get_flex_time(8), -8 * 3600);
}

#[test]
fn test_discard_short_breaks() {
    let mut emp = WorkTimeEmployee::new("e1", 30);
    *emp.create_day(date(2024, 3, 4)) = day(date(2024, 3, 4), 800, 1600, Some(30));
    *emp.create_day(date(2024, 3, 5)) = day(date(2024, 3, 5), 800, 1600, Some(60));

    assert_eq!(emp.discard_short_breaks(60), 1);
    assert_eq!(emp.get_day(date(2024, 3, 4)).unwrap().break_time, None);
    assert_eq!(emp.get_day(date(2024, 3, 5)).unwrap().break_time, Some(60));
}

#[test]
fn test_day_state_parsing() {
    assert_eq!("Sick".parse::<DayState>().unwrap(), DayState::Sick);
    assert_eq!("".parse::<DayState>().unwrap(), DayState::Default);
    assert!(matches!(
        "holiday".parse::<DayState>(),
        Err(AppError::UnknownState(_))
    ));
}
