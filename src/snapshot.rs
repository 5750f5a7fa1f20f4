//! Snapshot loading
//!
//! A snapshot is one JSON document holding the projects (with their
//! embedded tasks) and optionally a flat task list, as exported by the
//! persistence layer:
//!
//! ```text
//! {
//!   "projects": [ { "id": ..., "client": ..., "tasks": [ ... ] } ],
//!   "tasks": [ ... ]            # optional, derived from projects when absent
//! }
//! ```

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{null_as_default, Project, Task};

/// Path value that selects stdin
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Clone, Default, Deserialize)]
struct RawSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    projects: Vec<Project>,
    #[serde(default)]
    tasks: Option<Vec<Task>>,
}

/// In-memory view of one export: projects plus the flat task list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
}

impl Snapshot {
    pub fn new(projects: Vec<Project>, tasks: Vec<Task>) -> Self {
        Self { projects, tasks }
    }

    /// Build a snapshot whose flat task list is taken from the projects.
    pub fn from_projects(projects: Vec<Project>) -> Self {
        let tasks = flatten_tasks(&projects);
        Self { projects, tasks }
    }

    /// Parse a snapshot document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: Option<RawSnapshot> = serde_json::from_str(raw)?;
        let parsed = parsed.unwrap_or_default();
        let snapshot = match parsed.tasks {
            Some(tasks) => Self::new(parsed.projects, tasks),
            None => Self::from_projects(parsed.projects),
        };
        tracing::debug!(
            projects = snapshot.projects.len(),
            tasks = snapshot.tasks.len(),
            "parsed snapshot"
        );
        Ok(snapshot)
    }

    /// Load a snapshot from a file, or stdin when the path is `-`.
    pub fn load(path: &Path) -> Result<Self> {
        if path.as_os_str() == STDIN_PATH {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            return Self::from_json(&raw);
        }

        if !path.exists() {
            return Err(Error::SnapshotNotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(Error::InvalidArgument(format!(
                "snapshot is not a file: {}",
                path.display()
            )));
        }

        tracing::debug!(path = %path.display(), "loading snapshot");
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Write the snapshot as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Restrict to projects owned by `user_id` and the tasks that belong to them.
    pub fn for_user(&self, user_id: &str) -> Self {
        let projects: Vec<Project> = self
            .projects
            .iter()
            .filter(|project| project.user_id == user_id)
            .cloned()
            .collect();
        let owned: HashSet<&str> = projects.iter().map(|project| project.id.as_str()).collect();
        let tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| owned.contains(task.project_id.as_str()))
            .cloned()
            .collect();

        tracing::debug!(
            user = user_id,
            projects = projects.len(),
            tasks = tasks.len(),
            "scoped snapshot to user"
        );
        Self { projects, tasks }
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.tasks.is_empty()
    }
}

fn flatten_tasks(projects: &[Project]) -> Vec<Task> {
    projects
        .iter()
        .flat_map(|project| project.tasks.iter().cloned())
        .collect()
}
