use async_trait::async_trait;
use uuid::Uuid;

use crate::date::Date;
use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{Task, TaskFields};
use crate::query::SearchQuery;

pub mod tasks;

/// Storage operations for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task under a freshly generated id.
    async fn add_task(&self, fields: TaskFields) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError>;
    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError>;
    /// Replaces every field of an existing task.
    async fn update_task(&self, id: Uuid, fields: TaskFields) -> Result<Task, CoreError>;
    async fn update_task_date(&self, id: Uuid, date: Date) -> Result<(), CoreError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError>;
    /// Tasks ordered by date, at most `limit` of them.
    async fn list_tasks(&self, limit: u32) -> Result<Vec<Task>, CoreError>;
    async fn search_tasks(&self, query: &SearchQuery, limit: u32) -> Result<Vec<Task>, CoreError>;
}

pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
