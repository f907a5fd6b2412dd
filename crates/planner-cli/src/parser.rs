use anyhow::{anyhow, Result};
use chrono_english::{parse_date_string, Dialect};
use planner_core::date::{Date, DATE_LEN};

use crate::timezone::Clock;

/// Turns a date argument into the `YYYYMMDD` form the scheduler stores.
///
/// Eight digits are passed through untouched so the scheduler can validate
/// them. Anything else is read as natural language ("tomorrow", "next friday",
/// "2024-03-01") relative to the clock.
pub fn parse_date_input(input: &str, clock: &Clock) -> Result<String> {
    let input = input.trim();
    if input.is_empty() || (input.len() == DATE_LEN && input.bytes().all(|b| b.is_ascii_digit())) {
        return Ok(input.to_string());
    }

    let parsed = parse_date_string(input, clock.now(), Dialect::Uk)
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", input, e))?;
    Ok(Date::from(parsed.date_naive()).to_string())
}
