use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use super::percent;
use crate::humanize::relative_days;
use crate::model::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectState {
    Empty,
    Active,
    Completed,
}

impl ProjectState {
    pub fn of(project: &Project) -> Self {
        if project.is_completed() {
            ProjectState::Completed
        } else if project.is_active() {
            ProjectState::Active
        } else {
            ProjectState::Empty
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectState::Empty => "empty",
            ProjectState::Active => "active",
            ProjectState::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectProgress {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Completed share of tasks, whole percent
    pub progress: u32,
    pub state: ProjectState,
    pub created_at: DateTime<Utc>,
    pub created_label: String,
}

pub fn project_progress(projects: &[Project], now: DateTime<FixedOffset>) -> Vec<ProjectProgress> {
    projects
        .iter()
        .map(|project| {
            let total_tasks = project.tasks.len();
            let completed_tasks = project.completed_task_count();
            ProjectProgress {
                id: project.id.clone(),
                title: project.title.clone(),
                client: project.client_name().map(str::to_string),
                total_tasks,
                completed_tasks,
                progress: percent(completed_tasks, total_tasks),
                state: ProjectState::of(project),
                created_at: project.created_at,
                created_label: relative_days(&project.created_at, &now),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollup::testing::{now, project, project_created, task_with_status};

    #[test]
    fn reports_progress_and_state() {
        let projects = vec![
            project_created(
                "p1",
                Some("Acme"),
                "2026-10-13T12:00:00Z",
                vec![
                    task_with_status("t1", "complete"),
                    task_with_status("t2", "pending"),
                    task_with_status("t3", "pending"),
                ],
            ),
            project("p2", None, vec![task_with_status("t4", "complete")]),
            project_created("p3", Some(""), "2026-10-16T09:00:00Z", vec![]),
        ];

        let rows = project_progress(&projects, now());
        assert_eq!(rows[0].progress, 33);
        assert_eq!(rows[0].state, ProjectState::Active);
        assert_eq!(rows[0].client.as_deref(), Some("Acme"));
        assert_eq!(rows[0].created_label, "3 days ago");

        assert_eq!(rows[1].progress, 100);
        assert_eq!(rows[1].state, ProjectState::Completed);

        assert_eq!(rows[2].progress, 0);
        assert_eq!(rows[2].state, ProjectState::Empty);
        assert_eq!(rows[2].client, None);
        assert_eq!(rows[2].created_label, "today");
    }
}
