pub mod date;
pub mod path;
pub mod time;

pub use time::{duration_seconds, format_duration, parse_date, parse_time};
