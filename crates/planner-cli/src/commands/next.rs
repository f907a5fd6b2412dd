use anyhow::Result;
use planner_core::date::Date;
use planner_core::service;

use crate::cli::NextCommand;
use crate::parser::parse_date_input;
use crate::timezone::Clock;

/// Prints the next date of a rule, without touching the task store.
pub fn next_date(command: NextCommand, clock: &Clock) -> Result<()> {
    let now = match command.now.as_deref() {
        Some(now) => parse_date_input(now, clock)?.parse::<Date>()?,
        None => clock.today(),
    };
    let next = service::next_date(&command.date, &command.repeat, now)?;
    println!("{}", next);
    Ok(())
}
