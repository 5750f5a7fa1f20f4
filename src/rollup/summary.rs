use serde::Serialize;

use super::{completed_count, distinct_clients, percent};
use crate::model::{Project, Task};

/// Headline counts for the tasks and projects pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryCounts {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_rate: u32,
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub unique_clients: usize,
}

pub fn compute_summary_counts(tasks: &[Task], projects: &[Project]) -> SummaryCounts {
    let total_tasks = tasks.len();
    let completed_tasks = completed_count(tasks);

    SummaryCounts {
        total_tasks,
        completed_tasks,
        completion_rate: percent(completed_tasks, total_tasks),
        total_projects: projects.len(),
        active_projects: projects.iter().filter(|p| p.is_active()).count(),
        completed_projects: projects.iter().filter(|p| p.is_completed()).count(),
        unique_clients: distinct_clients(projects),
    }
}
