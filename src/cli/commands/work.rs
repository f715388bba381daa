use crate::config::Config;
use crate::core::Timesheet;
use crate::core::session::WorkOutcome;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::time::{TIME_FORMAT, format_duration};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut sheet = Timesheet::open(cfg.clone())?;

    match sheet.log_work_time()? {
        WorkOutcome::Started { at } => {
            success(format!("Work started at {}", at.format(TIME_FORMAT)));
        }
        WorkOutcome::Ended { at, closed_break } => {
            if let Some(secs) = closed_break {
                info(format!(
                    "Open break closed ({})",
                    format_duration(Some(secs), false)
                ));
            }
            success(format!("Work ended at {}", at.format(TIME_FORMAT)));
        }
        WorkOutcome::Extended { at } => {
            success(format!("End time moved to {}", at.format(TIME_FORMAT)));
        }
    }

    if let Some(day) = sheet.get_day(sheet.today()) {
        info(format!(
            "Worked today: {}",
            format_duration(day.get_work_time(), false)
        ));
    }
    Ok(())
}
