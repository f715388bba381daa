use super::parse_day;
use crate::config::Config;
use crate::core::Timesheet;
use crate::errors::AppResult;
use crate::ui::messages::balance;

pub fn handle(until: Option<&str>, cfg: &Config) -> AppResult<()> {
    let sheet = Timesheet::open(cfg.clone())?;

    match until {
        Some(arg) => {
            let until = parse_day(arg, sheet.today())?;
            println!(
                "Flex time until {until}: {}",
                balance(sheet.flex_time_until(until))
            );
        }
        None => println!("Flex time: {}", balance(sheet.get_flex_time())),
    }
    Ok(())
}
