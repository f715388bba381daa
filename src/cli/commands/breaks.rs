use crate::config::Config;
use crate::core::Timesheet;
use crate::core::session::BreakOutcome;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::time::{TIME_FORMAT, format_duration};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut sheet = Timesheet::open(cfg.clone())?;

    match sheet.log_break_time()? {
        BreakOutcome::Started { at } => {
            success(format!("Break started at {}", at.format(TIME_FORMAT)));
        }
        BreakOutcome::Ended { added, total } => {
            success(format!(
                "Break ended after {} (today {})",
                format_duration(Some(added), false),
                format_duration(Some(total), false)
            ));
            if total < cfg.min_break_seconds {
                warning(format!(
                    "Breaks under {} seconds are not kept",
                    cfg.min_break_seconds
                ));
            }
        }
        BreakOutcome::Rejected(reason) => {
            warning(format!("Break not recorded: {reason}"));
        }
    }
    Ok(())
}
