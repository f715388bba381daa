pub mod breaks;
pub mod clear;
pub mod config;
pub mod flex;
pub mod init;
pub mod set;
pub mod show;
pub mod status;
pub mod vacation;
pub mod work;

use crate::errors::AppResult;
use crate::utils::time::parse_date;
use chrono::NaiveDate;

/// Date argument: `YYYY-MM-DD` or the word `today`.
pub(crate) fn parse_day(arg: &str, today: NaiveDate) -> AppResult<NaiveDate> {
    if arg.trim().eq_ignore_ascii_case("today") {
        Ok(today)
    } else {
        parse_date(arg)
    }
}
