use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use crate::date::Date;
use crate::error::CoreError;
use crate::models::{Task, TaskFields};
use crate::query::{escape_like, SearchQuery};
use crate::repository::SqliteRepository;

const SELECT_TASKS: &str = "SELECT id, date, title, comment, repeat FROM scheduler";

/// A `scheduler` row as stored; ids and dates are kept as text.
#[derive(Debug, FromRow)]
struct TaskRow {
    id: String,
    date: String,
    title: String,
    comment: String,
    repeat: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = CoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|_| CoreError::CorruptRow(format!("bad id '{}'", row.id)))?;
        let date = row
            .date
            .parse::<Date>()
            .map_err(|_| CoreError::CorruptRow(format!("task {} has bad date '{}'", row.id, row.date)))?;
        Ok(Task {
            id,
            date,
            title: row.title,
            comment: row.comment,
            repeat: row.repeat,
        })
    }
}

fn into_tasks(rows: Vec<TaskRow>) -> Result<Vec<Task>, CoreError> {
    rows.into_iter().map(Task::try_from).collect()
}

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn add_task(&self, fields: TaskFields) -> Result<Task, CoreError> {
        let task = Task {
            id: Uuid::new_v4(),
            date: fields.date,
            title: fields.title,
            comment: fields.comment,
            repeat: fields.repeat,
        };

        sqlx::query("INSERT INTO scheduler (id, date, title, comment, repeat) VALUES (?, ?, ?, ?, ?)")
            .bind(task.id.to_string())
            .bind(task.date.to_string())
            .bind(&task.title)
            .bind(&task.comment)
            .bind(&task.repeat)
            .execute(self.pool())
            .await?;

        tracing::debug!(id = %task.id, date = %task.date, "inserted task");
        Ok(task)
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError> {
        let row: Option<TaskRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_TASKS))
            .bind(id.to_string())
            .fetch_optional(self.pool())
            .await?;
        row.map(Task::try_from).transpose()
    }

    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError> {
        let pattern = format!("{}%", escape_like(&short_id.to_lowercase()));

        let rows: Vec<TaskRow> =
            sqlx::query_as(&format!("{} WHERE id LIKE ? ESCAPE '\\' ORDER BY date, id", SELECT_TASKS))
                .bind(pattern)
                .fetch_all(self.pool())
                .await?;
        into_tasks(rows)
    }

    async fn update_task(&self, id: Uuid, fields: TaskFields) -> Result<Task, CoreError> {
        let result = sqlx::query(
            "UPDATE scheduler SET date = ?, title = ?, comment = ?, repeat = ? WHERE id = ?",
        )
        .bind(fields.date.to_string())
        .bind(&fields.title)
        .bind(&fields.comment)
        .bind(&fields.repeat)
        .bind(id.to_string())
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        tracing::debug!(%id, date = %fields.date, "updated task");

        Ok(Task {
            id,
            date: fields.date,
            title: fields.title,
            comment: fields.comment,
            repeat: fields.repeat,
        })
    }

    async fn update_task_date(&self, id: Uuid, date: Date) -> Result<(), CoreError> {
        let result = sqlx::query("UPDATE scheduler SET date = ? WHERE id = ?")
            .bind(date.to_string())
            .bind(id.to_string())
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        tracing::debug!(%id, %date, "moved task");
        Ok(())
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM scheduler WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        tracing::debug!(%id, "deleted task");
        Ok(())
    }

    async fn list_tasks(&self, limit: u32) -> Result<Vec<Task>, CoreError> {
        let rows: Vec<TaskRow> = sqlx::query_as(&format!("{} ORDER BY date, id LIMIT ?", SELECT_TASKS))
            .bind(i64::from(limit))
            .fetch_all(self.pool())
            .await?;
        into_tasks(rows)
    }

    async fn search_tasks(&self, query: &SearchQuery, limit: u32) -> Result<Vec<Task>, CoreError> {
        let rows: Vec<TaskRow> = match query {
            SearchQuery::Date(date) => {
                sqlx::query_as(&format!("{} WHERE date = ? ORDER BY date, id LIMIT ?", SELECT_TASKS))
                    .bind(date.to_string())
                    .bind(i64::from(limit))
                    .fetch_all(self.pool())
                    .await?
            }
            SearchQuery::Text(text) => {
                let pattern = SearchQuery::like_pattern(text);
                sqlx::query_as(&format!(
                    "{} WHERE title LIKE ? ESCAPE '\\' OR comment LIKE ? ESCAPE '\\' ORDER BY date, id LIMIT ?",
                    SELECT_TASKS
                ))
                .bind(&pattern)
                .bind(&pattern)
                .bind(i64::from(limit))
                .fetch_all(self.pool())
                .await?
            }
        };
        tracing::debug!(?query, found = rows.len(), "searched tasks");
        into_tasks(rows)
    }
}
