//! Task list rows and filter tabs.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use super::deadlines::{classify_deadline, DeadlineState};
use crate::error::Error;
use crate::humanize::{calendar_days_between, pluralize, relative_days};
use crate::model::{Project, Task, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    #[default]
    All,
    /// Not complete and not overdue
    Pending,
    Overdue,
    Complete,
}

impl TaskFilter {
    pub fn matches(&self, state: DeadlineState) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => {
                matches!(state, DeadlineState::DueToday | DeadlineState::Upcoming)
            }
            TaskFilter::Overdue => state == DeadlineState::Overdue,
            TaskFilter::Complete => state == DeadlineState::Completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Pending => "pending",
            TaskFilter::Overdue => "overdue",
            TaskFilter::Complete => "complete",
        }
    }
}

impl FromStr for TaskFilter {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TaskFilter::All),
            "pending" => Ok(TaskFilter::Pending),
            "overdue" => Ok(TaskFilter::Overdue),
            "complete" | "completed" => Ok(TaskFilter::Complete),
            other => Err(Error::InvalidArgument(format!(
                "invalid task filter '{other}' (expected all|pending|overdue|complete)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskTabCounts {
    pub all: usize,
    pub pending: usize,
    pub overdue: usize,
    pub complete: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub deadline: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub state: DeadlineState,
    pub due_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskList {
    pub filter: TaskFilter,
    pub counts: TaskTabCounts,
    pub tasks: Vec<TaskRow>,
}

fn due_label(state: DeadlineState, deadline: &DateTime<Utc>, now: &DateTime<FixedOffset>) -> String {
    match state {
        DeadlineState::Completed => "completed".to_string(),
        DeadlineState::DueToday => "due today".to_string(),
        DeadlineState::Overdue => {
            // Overdue deadlines sit on an earlier calendar date, so at least one day back.
            let days = calendar_days_between(deadline, now).max(1);
            format!("overdue, due {} ago", pluralize(days.unsigned_abs() as usize, "day"))
        }
        DeadlineState::Upcoming => format!("due {}", relative_days(deadline, now)),
    }
}

/// Rows for the selected tab plus the counts shown on every tab.
pub fn task_list(
    tasks: &[Task],
    projects: &[Project],
    now: DateTime<FixedOffset>,
    filter: TaskFilter,
) -> TaskList {
    let by_id: HashMap<&str, &Project> = projects
        .iter()
        .map(|project| (project.id.as_str(), project))
        .collect();

    let mut counts = TaskTabCounts {
        all: tasks.len(),
        ..TaskTabCounts::default()
    };
    let mut rows = Vec::new();

    for task in tasks {
        let state = classify_deadline(task, &now);
        match state {
            DeadlineState::Completed => counts.complete += 1,
            DeadlineState::Overdue => counts.overdue += 1,
            DeadlineState::DueToday | DeadlineState::Upcoming => counts.pending += 1,
        }

        if !filter.matches(state) {
            continue;
        }

        let project = by_id.get(task.project_id.as_str());
        if project.is_none() {
            tracing::warn!(
                task = %task.id,
                project = %task.project_id,
                "task references unknown project"
            );
        }

        rows.push(TaskRow {
            id: task.id.clone(),
            title: task.title.clone(),
            status: task.status.clone(),
            deadline: task.deadline,
            project: project.map(|p| p.title.clone()),
            client: project.and_then(|p| p.client_name()).map(str::to_string),
            state,
            due_label: due_label(state, &task.deadline, &now),
        });
    }

    TaskList {
        filter,
        counts,
        tasks: rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollup::testing::{now, project, task};

    const CREATED: &str = "2026-10-01T00:00:00Z";

    fn fixture() -> (Vec<Task>, Vec<Project>) {
        let tasks = vec![
            task("late", "pending", "2026-10-13T12:00:00Z", CREATED),
            task("today", "pending", "2026-10-16T08:00:00Z", CREATED),
            task("next", "pending", "2026-10-19T12:00:00Z", CREATED),
            task("done", "complete", "2026-10-02T00:00:00Z", CREATED),
        ];
        let projects = vec![project("p1", Some("Acme"), tasks.clone())];
        let tasks = projects[0].tasks.clone();
        (tasks, projects)
    }

    fn ids(list: &TaskList) -> Vec<&str> {
        list.tasks.iter().map(|row| row.id.as_str()).collect()
    }

    #[test]
    fn tab_counts_partition_tasks() {
        let (tasks, projects) = fixture();
        let list = task_list(&tasks, &projects, now(), TaskFilter::All);
        assert_eq!(
            list.counts,
            TaskTabCounts {
                all: 4,
                pending: 2,
                overdue: 1,
                complete: 1,
            }
        );
        assert_eq!(ids(&list), vec!["late", "today", "next", "done"]);
    }

    #[test]
    fn filters_select_rows() {
        let (tasks, projects) = fixture();
        let pending = task_list(&tasks, &projects, now(), TaskFilter::Pending);
        assert_eq!(ids(&pending), vec!["today", "next"]);
        assert_eq!(pending.counts.all, 4);

        let overdue = task_list(&tasks, &projects, now(), TaskFilter::Overdue);
        assert_eq!(ids(&overdue), vec!["late"]);

        let complete = task_list(&tasks, &projects, now(), TaskFilter::Complete);
        assert_eq!(ids(&complete), vec!["done"]);
    }

    #[test]
    fn rows_carry_project_and_labels() {
        let (tasks, projects) = fixture();
        let list = task_list(&tasks, &projects, now(), TaskFilter::All);
        let labels: Vec<&str> = list.tasks.iter().map(|row| row.due_label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["overdue, due 3 days ago", "due today", "due in 3 days", "completed"]
        );
        assert_eq!(list.tasks[0].project.as_deref(), Some("Project p1"));
        assert_eq!(list.tasks[0].client.as_deref(), Some("Acme"));
    }

    #[test]
    fn overdue_label_counts_calendar_days() {
        let tasks = vec![
            task("last_night", "pending", "2026-10-15T23:00:00Z", CREATED),
            task("last_week", "pending", "2026-10-09T18:00:00Z", CREATED),
        ];
        let list = task_list(&tasks, &[], now(), TaskFilter::Overdue);
        let labels: Vec<&str> = list.tasks.iter().map(|row| row.due_label.as_str()).collect();
        assert_eq!(labels, vec!["overdue, due 1 day ago", "overdue, due 7 days ago"]);
        assert!(list.tasks.iter().all(|row| row.state == DeadlineState::Overdue));
    }

    #[test]
    fn orphan_task_has_no_project() {
        let tasks = vec![task("loose", "pending", "2026-10-30T00:00:00Z", CREATED)];
        let list = task_list(&tasks, &[], now(), TaskFilter::All);
        assert_eq!(list.tasks[0].project, None);
        assert_eq!(list.tasks[0].client, None);
    }

    #[test]
    fn parses_filter_names() {
        assert_eq!("overdue".parse::<TaskFilter>().expect("filter"), TaskFilter::Overdue);
        assert_eq!("Completed".parse::<TaskFilter>().expect("filter"), TaskFilter::Complete);
        assert!("later".parse::<TaskFilter>().is_err());
    }
}
