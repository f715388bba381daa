use crate::config::Config;
use crate::core::Timesheet;
use crate::core::session::SessionState;
use crate::errors::AppResult;
use crate::ui::messages::{balance, header, info};
use crate::utils::time::{TIME_FORMAT, format_duration, format_time};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let sheet = Timesheet::open(cfg.clone())?;
    let today = sheet.today();
    let state = sheet.session_state();

    header(format!("{} {today}", sheet.employee().employee_id()));
    println!("Session : {state}");

    if let Some(day) = sheet.get_day(today) {
        println!("State   : {}", day.state);
        println!("Start   : {}", format_time(day.start_time));
        println!("End     : {}", format_time(day.end_time));
        println!("Break   : {}", format_duration(day.break_time, false));
        println!("Worked  : {}", format_duration(day.get_work_time(), false));
    }
    if state == SessionState::OnBreak
        && let Some(since) = sheet.employee().on_break
    {
        info(format!("On break since {}", since.format(TIME_FORMAT)));
    }

    println!("Flex    : {}", balance(sheet.get_flex_time()));
    Ok(())
}
