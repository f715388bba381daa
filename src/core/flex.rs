//! Flex-time accrual: worked seconds minus expected seconds, summed per day.
//!
//! Only days with an entry take part. A weekday that is neither sick nor
//! vacation owes `daily_working_hours`; weekends and absences owe nothing.

use crate::models::WorkingDay;
use chrono::NaiveDate;

pub fn expected_seconds(day: &WorkingDay, daily_working_hours: u32) -> i64 {
    if day.is_due() {
        i64::from(daily_working_hours) * 3600
    } else {
        0
    }
}

/// Contribution of a single day to the balance.
pub fn day_balance(day: &WorkingDay, daily_working_hours: u32) -> i64 {
    if !day.has_entry() {
        return 0;
    }
    day.get_work_time().unwrap_or(0) - expected_seconds(day, daily_working_hours)
}

/// Balance over `days`. Callers pass days in date order.
pub fn flex_time<'a, I>(days: I, daily_working_hours: u32) -> i64
where
    I: IntoIterator<Item = &'a WorkingDay>,
{
    days.into_iter()
        .map(|d| day_balance(d, daily_working_hours))
        .sum()
}

/// Balance over the days up to and including `until`.
pub fn flex_time_until<'a, I>(days: I, daily_working_hours: u32, until: NaiveDate) -> i64
where
    I: IntoIterator<Item = &'a WorkingDay>,
{
    flex_time(
        days.into_iter().filter(|d| d.date() <= until),
        daily_working_hours,
    )
}

/// Sum of net work time over `days`, ignoring days without a valid pair.
pub fn worked_total<'a, I>(days: I) -> i64
where
    I: IntoIterator<Item = &'a WorkingDay>,
{
    days.into_iter().filter_map(WorkingDay::get_work_time).sum()
}
