use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date::Date;

/// A stored task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub date: Date,
    pub title: String,
    pub comment: String,
    /// Raw repeat rule, empty when the task does not repeat.
    pub repeat: String,
}

impl Task {
    pub fn is_repeating(&self) -> bool {
        !self.repeat.is_empty()
    }

    /// Task fields without the id, as they would be submitted again.
    pub fn to_draft(&self) -> NewTaskData {
        NewTaskData {
            date: self.date.to_string(),
            title: self.title.clone(),
            comment: self.comment.clone(),
            repeat: self.repeat.clone(),
        }
    }
}

/// A task as submitted by a caller, before its date has been normalized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NewTaskData {
    /// `YYYYMMDD`, or empty for today.
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

/// Validated task fields, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub date: Date,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

/// Field-by-field edits; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub date: Option<String>,
    pub title: Option<String>,
    pub comment: Option<String>,
    /// `Some("")` stops the task from repeating.
    pub repeat: Option<String>,
}

impl UpdateTaskData {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.title.is_none() && self.comment.is_none() && self.repeat.is_none()
    }

    /// Applies the edits on top of an existing task.
    pub fn apply_to(self, task: &Task) -> NewTaskData {
        let current = task.to_draft();
        NewTaskData {
            date: self.date.unwrap_or(current.date),
            title: self.title.unwrap_or(current.title),
            comment: self.comment.unwrap_or(current.comment),
            repeat: self.repeat.unwrap_or(current.repeat),
        }
    }
}

/// Outcome of marking a task done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// A one-off task, now deleted.
    Removed(Task),
    /// A repeating task moved to its next date.
    Rescheduled { task: Task, previous: Date },
}
