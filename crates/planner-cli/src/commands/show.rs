use anyhow::Result;
use planner_core::repository::TaskRepository;
use planner_core::service::TaskService;

use crate::cli::ShowCommand;
use crate::timezone::Clock;
use crate::util::resolve_task_id;
use crate::views::table::display_task;

pub async fn show_task<R: TaskRepository>(
    service: &TaskService<R>,
    command: ShowCommand,
    clock: &Clock,
) -> Result<()> {
    let task_id = resolve_task_id(service.repository(), &command.id).await?;
    let task = service.get_task(task_id).await?;
    display_task(&task, clock.today());
    Ok(())
}
