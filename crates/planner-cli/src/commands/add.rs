use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use planner_core::models::NewTaskData;
use planner_core::repository::TaskRepository;
use planner_core::service::TaskService;

use crate::cli::AddCommand;
use crate::parser::parse_date_input;
use crate::timezone::Clock;
use crate::util::short_id;

pub async fn add_task<R: TaskRepository>(
    service: &TaskService<R>,
    command: AddCommand,
    clock: &Clock,
) -> Result<()> {
    let date = command
        .date
        .as_deref()
        .map(|d| parse_date_input(d, clock))
        .transpose()?
        .unwrap_or_default();

    let draft = NewTaskData {
        date,
        title: command.title,
        comment: command.comment.unwrap_or_default(),
        repeat: command.repeat.unwrap_or_default(),
    };

    let task = service.add_task(draft, clock.today()).await?;

    let success_style = Style::new().green().bold();
    println!(
        "{} Added task '{}' ({}) for {}",
        "✓".style(success_style),
        task.title.bold(),
        short_id(&task.id).yellow(),
        task.date
    );
    if task.is_repeating() {
        println!("  Repeats: {}", task.repeat.cyan());
    }
    Ok(())
}
