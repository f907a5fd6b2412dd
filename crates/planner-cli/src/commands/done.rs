use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use planner_core::models::CompletionResult;
use planner_core::repository::TaskRepository;
use planner_core::service::TaskService;

use crate::cli::DoneCommand;
use crate::timezone::Clock;
use crate::util::resolve_task_id;

pub async fn done_task<R: TaskRepository>(
    service: &TaskService<R>,
    command: DoneCommand,
    clock: &Clock,
) -> Result<()> {
    let task_id = resolve_task_id(service.repository(), &command.id).await?;
    let success_style = Style::new().green().bold();

    match service.complete_task(task_id, clock.today()).await? {
        CompletionResult::Removed(task) => {
            println!("{} Completed task: '{}'", "✓".style(success_style), task.title);
        }
        CompletionResult::Rescheduled { task, previous } => {
            println!("{} Completed task: '{}'", "✓".style(success_style), task.title);
            println!(
                "  Next due {} (was {}, repeats {})",
                task.date.to_string().bold(),
                previous,
                task.repeat.cyan()
            );
        }
    }
    Ok(())
}
