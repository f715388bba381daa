pub mod day_state;
pub mod employee;
pub mod working_day;

pub use day_state::DayState;
pub use employee::{EmployeeRecord, WorkTimeEmployee};
pub use working_day::WorkingDay;
