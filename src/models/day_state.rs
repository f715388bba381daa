use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a day. Sick and vacation days carry no expected hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayState {
    #[default]
    Default,
    Sick,
    Vacation,
}

impl DayState {
    /// Convert enum → stored string (file and DB use the same spelling)
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DayState::Default => "default",
            DayState::Sick => "sick",
            DayState::Vacation => "vacation",
        }
    }

    /// Convert stored string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "default" => Some(DayState::Default),
            "sick" => Some(DayState::Sick),
            "vacation" => Some(DayState::Vacation),
            _ => None,
        }
    }

    pub fn is_absence(&self) -> bool {
        matches!(self, DayState::Sick | DayState::Vacation)
    }
}

impl FromStr for DayState {
    type Err = AppError;

    /// Lenient parse for CLI input; an empty cell reads as `default`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s.is_empty() {
            return Ok(DayState::Default);
        }
        DayState::from_db_str(&s).ok_or(AppError::UnknownState(s))
    }
}

impl fmt::Display for DayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
