use serde::Serialize;

use super::{completed_count, distinct_clients, percent, round1};
use crate::model::{Project, Task};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    /// Tasks per project, one decimal place
    pub avg_tasks_per_project: f64,
    pub completion_rate: u32,
    pub active_clients: usize,
}

pub fn compute_productivity_insights(tasks: &[Task], projects: &[Project]) -> Insights {
    let avg_tasks_per_project = if projects.is_empty() {
        0.0
    } else {
        round1(tasks.len() as f64 / projects.len() as f64)
    };

    Insights {
        avg_tasks_per_project,
        completion_rate: percent(completed_count(tasks), tasks.len()),
        active_clients: distinct_clients(projects),
    }
}
