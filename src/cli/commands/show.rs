use crate::config::Config;
use crate::core::{Timesheet, flex};
use crate::errors::AppResult;
use crate::ui::messages::{balance, header, info};
use crate::utils::date::{month_bounds, parse_month, weekday_short};
use crate::utils::time::{format_duration, format_time};

pub fn handle(month: Option<&str>, cfg: &Config) -> AppResult<()> {
    let sheet = Timesheet::open(cfg.clone())?;
    let hours = cfg.daily_working_hours;

    let range = month.map(parse_month).transpose()?.map(month_bounds);
    let days: Vec<_> = sheet
        .employee()
        .working_days()
        .values()
        .filter(|d| d.has_entry())
        .filter(|d| range.is_none_or(|(first, last)| (first..=last).contains(&d.date())))
        .collect();

    if days.is_empty() {
        info("No recorded days");
        return Ok(());
    }

    header(format!("{} {}", sheet.employee().employee_id(), month.unwrap_or("all days")));
    println!(
        "{:<10} {:<2}  {:>5}  {:>5}  {:>5}  {:>5}  {:>8}  {}",
        "Date", "", "Start", "End", "Break", "Net", "Balance", "State"
    );
    for day in &days {
        println!(
            "{:<10} {:<2}  {:>5}  {:>5}  {:>5}  {:>5}  {:>8}  {}",
            day.date(),
            weekday_short(day.date()),
            format_time(day.start_time),
            format_time(day.end_time),
            format_duration(day.break_time, false),
            format_duration(day.get_work_time(), false),
            format_duration(Some(flex::day_balance(day, hours)), true),
            day.state
        );
    }

    println!();
    println!(
        "Worked : {}",
        format_duration(Some(flex::worked_total(days.iter().copied())), false)
    );
    println!("Flex   : {}", balance(flex::flex_time(days.iter().copied(), hours)));
    Ok(())
}
