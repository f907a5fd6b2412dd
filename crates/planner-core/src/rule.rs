//! Parsing of the compact repeat rules: `d <n>`, `y`, `w <days>`, `m <days> [months]`.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::RecurrenceError;

/// Largest accepted interval for daily rules.
pub const MAX_DAILY_INTERVAL: u32 = 399;

const WEEKDAYS: RangeInclusive<i32> = 1..=7;
const MONTH_DAYS: RangeInclusive<i32> = 1..=31;
const MONTHS: RangeInclusive<i32> = 1..=12;

/// A parsed repeat rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceRule {
    /// Every `n` days, `1 <= n <= 399`.
    Daily(u32),
    /// Every year on the anchor's month and day.
    Yearly,
    /// On the listed weekdays, 1 = Monday through 7 = Sunday.
    Weekly(BTreeSet<u32>),
    /// On the listed days of the listed months; an empty month set means every month.
    Monthly {
        days: Vec<MonthDay>,
        months: BTreeSet<u32>,
    },
}

/// A day-of-month selector inside a monthly rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthDay {
    Day(u32),
    /// `-1`
    Last,
    /// `-2`
    SecondToLast,
}

impl MonthDay {
    /// Concrete day in a month whose last day is `last_day`, or `None` when
    /// the selector does not exist in that month.
    pub fn resolve(self, last_day: u32) -> Option<u32> {
        match self {
            MonthDay::Day(day) if day <= last_day => Some(day),
            MonthDay::Day(_) => None,
            MonthDay::Last => Some(last_day),
            MonthDay::SecondToLast if last_day > 1 => Some(last_day - 1),
            MonthDay::SecondToLast => None,
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthDay::Day(day) => write!(f, "{}", day),
            MonthDay::Last => write!(f, "-1"),
            MonthDay::SecondToLast => write!(f, "-2"),
        }
    }
}

/// Parses a raw repeat string. Equivalent to `rule.parse::<RecurrenceRule>()`.
pub fn parse(rule: &str) -> Result<RecurrenceRule, RecurrenceError> {
    rule.parse()
}

impl FromStr for RecurrenceRule {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let shape = || RecurrenceError::InvalidRuleShape(s.to_string());
        let tokens: Vec<&str> = s.split_whitespace().collect();

        match tokens.as_slice() {
            ["d", interval] => parse_interval(interval).map(RecurrenceRule::Daily),
            ["d"] => Err(RecurrenceError::InvalidInterval(String::new())),
            ["d", ..] => Err(shape()),
            ["y"] => Ok(RecurrenceRule::Yearly),
            ["y", ..] => Err(shape()),
            ["w", days] => parse_weekdays(days).map(RecurrenceRule::Weekly),
            ["w", ..] => Err(shape()),
            ["m", days] => Ok(RecurrenceRule::Monthly {
                days: parse_month_days(days)?,
                months: BTreeSet::new(),
            }),
            ["m", days, months] => Ok(RecurrenceRule::Monthly {
                days: parse_month_days(days)?,
                months: parse_months(months)?,
            }),
            ["m", ..] => Err(shape()),
            [kind, ..] => Err(RecurrenceError::UnsupportedRuleKind(kind.to_string())),
            [] => Err(RecurrenceError::UnsupportedRuleKind(String::new())),
        }
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::Daily(interval) => write!(f, "d {}", interval),
            RecurrenceRule::Yearly => write!(f, "y"),
            RecurrenceRule::Weekly(days) => write!(f, "w {}", join(days.iter())),
            RecurrenceRule::Monthly { days, months } => {
                write!(f, "m {}", join(days.iter()))?;
                if !months.is_empty() {
                    write!(f, " {}", join(months.iter()))?;
                }
                Ok(())
            }
        }
    }
}

fn join<T: fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join(",")
}

fn parse_interval(token: &str) -> Result<u32, RecurrenceError> {
    let invalid = || RecurrenceError::InvalidInterval(token.to_string());
    let interval: i64 = token.parse().map_err(|_| invalid())?;
    if interval <= 0 || interval > MAX_DAILY_INTERVAL as i64 {
        return Err(invalid());
    }
    u32::try_from(interval).map_err(|_| invalid())
}

/// Splits a comma-separated list and parses every item as an integer within `range`.
fn parse_list(
    token: &str,
    range: RangeInclusive<i32>,
    error: fn(String) -> RecurrenceError,
) -> Result<Vec<i32>, RecurrenceError> {
    token
        .split(',')
        .map(|item| match item.parse::<i32>() {
            Ok(value) if range.contains(&value) => Ok(value),
            _ => Err(error(item.to_string())),
        })
        .collect()
}

fn parse_weekdays(token: &str) -> Result<BTreeSet<u32>, RecurrenceError> {
    let days = parse_list(token, WEEKDAYS, RecurrenceError::InvalidWeekday)?;
    Ok(days.into_iter().map(|day| day as u32).collect())
}

fn parse_month_days(token: &str) -> Result<Vec<MonthDay>, RecurrenceError> {
    token
        .split(',')
        .map(|item| match item.parse::<i32>() {
            Ok(-1) => Ok(MonthDay::Last),
            Ok(-2) => Ok(MonthDay::SecondToLast),
            Ok(day) if MONTH_DAYS.contains(&day) => Ok(MonthDay::Day(day as u32)),
            _ => Err(RecurrenceError::InvalidMonthDay(item.to_string())),
        })
        .collect()
}

fn parse_months(token: &str) -> Result<BTreeSet<u32>, RecurrenceError> {
    let months = parse_list(token, MONTHS, RecurrenceError::InvalidMonth)?;
    Ok(months.into_iter().map(|month| month as u32).collect())
}
