use anyhow::Result;
use planner_core::repository::TaskRepository;
use planner_core::service::TaskService;

use crate::cli::ListCommand;
use crate::config::Config;
use crate::timezone::Clock;
use crate::views::table::display_tasks;

pub async fn list_tasks<R: TaskRepository>(
    service: &TaskService<R>,
    command: ListCommand,
    config: &Config,
    clock: &Clock,
) -> Result<()> {
    let limit = command.limit.unwrap_or(config.list_limit);
    let tasks = service.list_tasks(command.search.as_deref(), limit).await?;
    display_tasks(&tasks, clock.today());
    Ok(())
}
