//! Task and project records as handed over by the persistence layer.
//!
//! Field names follow the stored camelCase shape (`createdAt`, `projectId`,
//! `userId`). Collections that arrive as `null` deserialize as empty.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Literal status value that marks a task as done
pub const STATUS_COMPLETE: &str = "complete";

/// Literal status value for open tasks
pub const STATUS_PENDING: &str = "pending";

/// Task status. Anything other than the exact `"complete"` literal is
/// treated as not complete; unknown values survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Pending,
    Complete,
    Other(String),
}

impl TaskStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Complete)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => STATUS_PENDING,
            TaskStatus::Complete => STATUS_COMPLETE,
            TaskStatus::Other(value) => value.as_str(),
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            STATUS_COMPLETE => TaskStatus::Complete,
            STATUS_PENDING => TaskStatus::Pending,
            _ => TaskStatus::Other(value),
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(value: &str) -> Self {
        TaskStatus::from(value.to_string())
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Other(value) => value,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    pub deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub project_id: String,
}

impl Task {
    pub fn is_complete(&self) -> bool {
        self.status.is_complete()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub client: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<Task>,
}

impl Project {
    /// Client grouping key; absent and empty names are not clients.
    pub fn client_name(&self) -> Option<&str> {
        self.client.as_deref().filter(|name| !name.is_empty())
    }

    /// At least one owned task is not complete. Empty projects are not active.
    pub fn is_active(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_complete())
    }

    /// Has tasks and every one is complete. Empty projects are not completed.
    pub fn is_completed(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(Task::is_complete)
    }

    pub fn completed_task_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_complete()).count()
    }
}

/// Deserialize `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
