use anyhow::{anyhow, Result};
use owo_colors::{OwoColorize, Style};
use planner_core::error::CoreError;
use planner_core::models::UpdateTaskData;
use planner_core::repository::TaskRepository;
use planner_core::service::TaskService;

use crate::cli::EditCommand;
use crate::parser::parse_date_input;
use crate::timezone::Clock;
use crate::util::resolve_task_id;

pub async fn edit_task<R: TaskRepository>(
    service: &TaskService<R>,
    command: EditCommand,
    clock: &Clock,
) -> Result<()> {
    let edits = UpdateTaskData {
        date: command
            .date
            .as_deref()
            .map(|d| parse_date_input(d, clock))
            .transpose()?,
        title: command.title,
        comment: command.comment,
        repeat: if command.no_repeat {
            Some(String::new())
        } else {
            command.repeat
        },
    };
    if edits.is_empty() {
        return Err(anyhow!(CoreError::InvalidInput(
            "Nothing to change. Pass --title, --date, --comment, --repeat or --no-repeat.".to_string()
        )));
    }

    let task_id = resolve_task_id(service.repository(), &command.id).await?;
    let current = service.get_task(task_id).await?;
    let updated = service
        .update_task(task_id, edits.apply_to(&current), clock.today())
        .await?;

    let success_style = Style::new().green().bold();
    println!(
        "{} Updated task '{}' for {}",
        "✓".style(success_style),
        updated.title.bold(),
        updated.date
    );
    if current.date != updated.date {
        println!("  Date: {} → {}", current.date.dimmed(), updated.date);
    }
    if current.repeat != updated.repeat {
        if updated.is_repeating() {
            println!("  Repeats: {}", updated.repeat.cyan());
        } else {
            println!("  No longer repeats");
        }
    }
    Ok(())
}
