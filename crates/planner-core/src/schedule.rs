//! Date policy applied when a task is submitted or completed.

use crate::date::Date;
use crate::error::RecurrenceError;
use crate::recurrence::next_occurrence;
use crate::rule::parse;

/// Resolves the date a submitted task should be stored with.
///
/// # Arguments
/// * `date` - The stated date in `YYYYMMDD` form, or empty for today.
/// * `rule` - The raw repeat rule, or empty when the task does not repeat.
/// * `today` - The caller's current calendar date.
///
/// # Behavior
/// - A non-empty rule is always parsed and evaluated, so a bad rule is
///   rejected even when the stated date lies in the future.
/// - A date in the past moves to `today` for one-off tasks and to the next
///   occurrence for repeating ones.
/// - Any other date is kept as stated.
pub fn normalize_task_date(date: &str, rule: &str, today: Date) -> Result<Date, RecurrenceError> {
    let stated = if date.is_empty() {
        today
    } else {
        date.parse::<Date>()?
    };

    let next = if rule.is_empty() {
        None
    } else {
        Some(next_occurrence(stated, today, &parse(rule)?)?)
    };

    if !today.is_strictly_after(stated) {
        return Ok(stated);
    }
    Ok(next.unwrap_or(today))
}

/// Next date for a raw anchor and rule, as answered by the "next date" query
/// and used when a repeating task is marked done.
pub fn next_date(anchor: &str, rule: &str, now: Date) -> Result<Date, RecurrenceError> {
    let anchor: Date = anchor.parse()?;
    next_occurrence(anchor, now, &parse(rule)?)
}
