pub mod clock;
pub mod edit;
pub mod flex;
pub mod session;
pub mod vacation;
pub mod workspace;

pub use clock::{Clock, ManualClock, SystemClock};
pub use workspace::Timesheet;
