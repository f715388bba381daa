use super::parse_day;
use crate::config::Config;
use crate::core::Timesheet;
use crate::core::vacation::VacationOutcome;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(date: &str, cfg: &Config) -> AppResult<()> {
    let mut sheet = Timesheet::open(cfg.clone())?;
    let date = parse_day(date, sheet.today())?;

    match sheet.request_vacation(date)? {
        VacationOutcome::Granted { remaining, from_old } => {
            let kind = if from_old { " (carried over)" } else { "" };
            success(format!("Vacation booked for {date}{kind}"));
            info(format!("{remaining} vacation days left"));
        }
        VacationOutcome::AlreadyVacation => {
            info(format!("{date} is already a vacation day"));
        }
    }
    Ok(())
}
