//! Task operations shared by the command line and the HTTP API.

use uuid::Uuid;

use crate::date::Date;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, TaskFields};
use crate::query::SearchQuery;
use crate::repository::TaskRepository;
use crate::schedule;

/// Validates a submitted task and normalizes its date against `today`.
pub fn validate_draft(draft: NewTaskData, today: Date) -> Result<TaskFields, CoreError> {
    if draft.title.trim().is_empty() {
        return Err(CoreError::InvalidInput("task title is required".to_string()));
    }
    let date = schedule::normalize_task_date(&draft.date, &draft.repeat, today)?;
    Ok(TaskFields {
        date,
        title: draft.title,
        comment: draft.comment,
        repeat: draft.repeat,
    })
}

/// Answers the "next date" query for a raw anchor date and rule.
pub fn next_date(date: &str, rule: &str, now: Date) -> Result<Date, CoreError> {
    if date.is_empty() {
        return Err(CoreError::InvalidInput("date is required".to_string()));
    }
    if rule.is_empty() {
        return Err(CoreError::InvalidInput("repeat rule is required".to_string()));
    }
    Ok(schedule::next_date(date, rule, now)?)
}

pub struct TaskService<R> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub async fn add_task(&self, draft: NewTaskData, today: Date) -> Result<Task, CoreError> {
        let fields = validate_draft(draft, today)?;
        let task = self.repo.add_task(fields).await?;
        tracing::info!(id = %task.id, date = %task.date, "task added");
        Ok(task)
    }

    pub async fn get_task(&self, id: Uuid) -> Result<Task, CoreError> {
        self.repo
            .find_task_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    pub async fn update_task(&self, id: Uuid, draft: NewTaskData, today: Date) -> Result<Task, CoreError> {
        let fields = validate_draft(draft, today)?;
        self.repo.update_task(id, fields).await
    }

    pub async fn delete_task(&self, id: Uuid) -> Result<(), CoreError> {
        self.repo.delete_task(id).await
    }

    /// Marks a task done: one-off tasks are deleted, repeating tasks move to
    /// their next occurrence after `today`.
    pub async fn complete_task(&self, id: Uuid, today: Date) -> Result<CompletionResult, CoreError> {
        let task = self.get_task(id).await?;

        if !task.is_repeating() {
            self.repo.delete_task(id).await?;
            tracing::info!(%id, "one-off task done and removed");
            return Ok(CompletionResult::Removed(task));
        }

        let previous = task.date;
        let next = schedule::next_date(&previous.to_string(), &task.repeat, today)?;
        self.repo.update_task_date(id, next).await?;
        tracing::info!(%id, %previous, %next, "repeating task rescheduled");

        Ok(CompletionResult::Rescheduled {
            task: Task { date: next, ..task },
            previous,
        })
    }

    /// Lists tasks by date, optionally filtered by a search string.
    pub async fn list_tasks(&self, search: Option<&str>, limit: u32) -> Result<Vec<Task>, CoreError> {
        match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(search) => self.repo.search_tasks(&SearchQuery::parse(search), limit).await,
            None => self.repo.list_tasks(limit).await,
        }
    }
}
