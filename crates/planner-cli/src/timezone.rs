use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use planner_core::date::Date;
use planner_core::error::CoreError;
use std::str::FromStr;

/// Parses an IANA timezone name.
pub fn validate_timezone(timezone: &str) -> Result<Tz, CoreError> {
    Tz::from_str(timezone).map_err(|_| {
        CoreError::InvalidInput(format!(
            "Invalid timezone: '{}'. Use IANA timezone names like 'Europe/Moscow'",
            timezone
        ))
    })
}

/// Detect system timezone
pub fn detect_system_timezone() -> Tz {
    if let Ok(tz) = std::env::var("TZ") {
        if let Ok(tz) = Tz::from_str(&tz) {
            return tz;
        }
    }

    if let Ok(tz) = iana_time_zone::get_timezone() {
        if let Ok(tz) = Tz::from_str(&tz) {
            return tz;
        }
    }

    Tz::UTC
}

/// Source of the current calendar date.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    /// The wall clock in a timezone.
    Zone(Tz),
    /// A fixed day, for tests and reproducible runs.
    Fixed(Date),
}

impl Clock {
    /// Uses the configured timezone, or the detected one when none is set.
    pub fn from_config(timezone: Option<&str>) -> Result<Self, CoreError> {
        match timezone.filter(|tz| !tz.is_empty()) {
            Some(tz) => Ok(Clock::Zone(validate_timezone(tz)?)),
            None => Ok(Clock::Zone(detect_system_timezone())),
        }
    }

    pub fn now(&self) -> DateTime<Tz> {
        match self {
            Clock::Zone(tz) => Utc::now().with_timezone(tz),
            Clock::Fixed(date) => Tz::UTC.from_utc_datetime(&date.naive().and_time(NaiveTime::MIN)),
        }
    }

    pub fn today(&self) -> Date {
        match self {
            Clock::Zone(_) => Date::from(self.now().date_naive()),
            Clock::Fixed(date) => *date,
        }
    }
}
