use super::parse_day;
use crate::config::Config;
use crate::core::Timesheet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(date: &str, cfg: &Config) -> AppResult<()> {
    let mut sheet = Timesheet::open(cfg.clone())?;
    let date = parse_day(date, sheet.today())?;

    if sheet.clear_day(date)? {
        success(format!("{date} cleared"));
    } else {
        info(format!("Nothing stored for {date}"));
    }
    Ok(())
}
