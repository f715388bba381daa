use super::parse_day;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Timesheet;
use crate::core::edit::{DayInput, FieldOutcome};
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};
use crate::utils::time::{format_duration, format_time};

/// Handle `set <DATE> [--start] [--end] [--break] [--state]`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Set {
        date,
        start,
        end,
        break_time,
        state,
    } = cmd
    else {
        return Ok(());
    };

    let input = DayInput {
        start: start.clone(),
        end: end.clone(),
        break_time: break_time.clone(),
        state: state.clone(),
    };
    if input.start.is_none()
        && input.end.is_none()
        && input.break_time.is_none()
        && input.state.is_none()
    {
        warning("Nothing to change: pass --start, --end, --break or --state");
        return Ok(());
    }

    let mut sheet = Timesheet::open(cfg.clone())?;
    let date = parse_day(date, sheet.today())?;
    let report = sheet.edit_day(date, &input)?;

    for (field, outcome) in report.fields() {
        match outcome {
            FieldOutcome::Unchanged => {}
            FieldOutcome::Stored => success(format!("{field} stored")),
            FieldOutcome::Cleared => info(format!("{field} cleared")),
            FieldOutcome::Rejected(e) => error(format!("{field} not changed: {e}")),
        }
    }

    if let Some(day) = sheet.get_day(date) {
        info(format!(
            "{date}: {} - {}, break {}, {}",
            format_time(day.start_time),
            format_time(day.end_time),
            format_duration(day.break_time, false),
            day.state
        ));
    }
    Ok(())
}
