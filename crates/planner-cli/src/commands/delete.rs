use anyhow::Result;
use dialoguer::Confirm;
use planner_core::repository::TaskRepository;
use planner_core::service::TaskService;

use crate::cli::DeleteCommand;
use crate::util::resolve_task_id;

pub async fn delete_task<R: TaskRepository>(service: &TaskService<R>, command: DeleteCommand) -> Result<()> {
    let task_id = resolve_task_id(service.repository(), &command.id).await?;
    let task = service.get_task(task_id).await?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete task '{}'?", task.title))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    service.delete_task(task_id).await?;
    println!("Deleted task: '{}'", task.title);
    Ok(())
}
