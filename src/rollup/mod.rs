//! Rollup engine
//!
//! Pure aggregations over one user's tasks and projects. Nothing in here
//! performs I/O or fails: empty input yields zeroed output, and every
//! time-sensitive rollup takes the reference instant `now` explicitly.
//! The offset carried by `now` defines calendar days and months.
//!
//! - [`summary`]: totals, completion rate, active/completed projects
//! - [`monthly`]: trailing calendar-month series
//! - [`deadlines`]: overdue / due today / due soon counts
//! - [`clients`]: client ranking and client directory
//! - [`insights`]: averages and ratios
//! - [`tasks`]: task list rows and filter tabs
//! - [`projects`]: per-project progress

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::config::AnalyticsConfig;
use crate::model::{Project, Task};
use crate::snapshot::Snapshot;

pub mod clients;
pub mod deadlines;
pub mod insights;
pub mod monthly;
pub mod projects;
pub mod summary;
pub mod tasks;

pub use clients::{
    client_directory, compute_client_ranking, ClientCount, ClientDirectory, ClientOverview,
    ClientProfile, ClientSort,
};
pub use deadlines::{classify_deadline, compute_deadline_buckets, DeadlineCounts, DeadlineState};
pub use insights::{compute_productivity_insights, Insights};
pub use monthly::{compute_monthly_series, MonthBucket};
pub use projects::{project_progress, ProjectProgress, ProjectState};
pub use summary::{compute_summary_counts, SummaryCounts};
pub use tasks::{task_list, TaskFilter, TaskList, TaskRow, TaskTabCounts};

/// Everything the analytics page shows, computed in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub generated_at: DateTime<FixedOffset>,
    pub summary: SummaryCounts,
    pub pending_tasks: usize,
    pub this_month_tasks: usize,
    pub monthly: Vec<MonthBucket>,
    pub deadlines: DeadlineCounts,
    pub top_clients: Vec<ClientCount>,
    pub insights: Insights,
}

pub fn compute_dashboard(
    snapshot: &Snapshot,
    now: DateTime<FixedOffset>,
    config: &AnalyticsConfig,
) -> Dashboard {
    let tasks = snapshot.tasks.as_slice();
    let projects = snapshot.projects.as_slice();

    let summary = compute_summary_counts(tasks, projects);
    let monthly = compute_monthly_series(tasks, projects, now, config.window_months);
    let this_month_tasks = monthly.last().map_or(0, |bucket| bucket.tasks_created);

    tracing::debug!(
        tasks = tasks.len(),
        projects = projects.len(),
        window_months = config.window_months,
        "computing dashboard"
    );

    Dashboard {
        generated_at: now,
        pending_tasks: summary.total_tasks - summary.completed_tasks,
        this_month_tasks,
        deadlines: compute_deadline_buckets(tasks, now, config.due_soon_days),
        top_clients: compute_client_ranking(projects, config.top_clients),
        insights: compute_productivity_insights(tasks, projects),
        summary,
        monthly,
    }
}

/// `round(part / whole * 100)`, or 0 when `whole` is 0.
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| task.is_complete()).count()
}

pub(crate) fn distinct_clients(projects: &[Project]) -> usize {
    projects
        .iter()
        .filter_map(Project::client_name)
        .collect::<HashSet<_>>()
        .len()
}


#[cfg(test)]
mod tests {
    use super::testing::{now, project, task, task_with_status};
    use super::*;

    #[test]
    fn percent_guards_zero() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
    }

    #[test]
    fn round1_rounds_half_up() {
        assert_eq!(round1(5.0 / 3.0), 1.7);
        assert_eq!(round1(2.25), 2.3);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn dashboard_combines_rollups() {
        let tasks = vec![
            task("t1", "complete", "2026-10-10T00:00:00Z", "2026-10-02T00:00:00Z"),
            task("t2", "pending", "2026-10-14T00:00:00Z", "2026-10-03T00:00:00Z"),
            task("t3", "pending", "2026-10-18T00:00:00Z", "2026-08-03T00:00:00Z"),
        ];
        let projects = vec![
            project("p1", Some("Acme"), tasks[..1].to_vec()),
            project("p2", Some("Globex"), tasks[1..].to_vec()),
            project("p3", Some("Acme"), vec![task_with_status("t4", "pending")]),
        ];
        let snapshot = Snapshot::new(projects, tasks);

        let dashboard = compute_dashboard(&snapshot, now(), &AnalyticsConfig::default());
        assert_eq!(dashboard.generated_at, now());
        assert_eq!(dashboard.summary.total_tasks, 3);
        assert_eq!(dashboard.pending_tasks, 2);
        assert_eq!(dashboard.this_month_tasks, 2);
        assert_eq!(dashboard.monthly.len(), 6);
        assert_eq!(dashboard.deadlines.overdue, 1);
        assert_eq!(dashboard.deadlines.due_this_week, 1);
        assert_eq!(dashboard.top_clients[0].name, "Acme");
        assert_eq!(dashboard.top_clients[0].count, 2);
        assert_eq!(dashboard.insights.active_clients, 2);
        assert_eq!(dashboard.insights.avg_tasks_per_project, 1.0);
    }

    #[test]
    fn dashboard_of_empty_snapshot_is_zeroed() {
        let dashboard =
            compute_dashboard(&Snapshot::default(), now(), &AnalyticsConfig::default());
        assert_eq!(dashboard.summary, SummaryCounts::default());
        assert_eq!(dashboard.pending_tasks, 0);
        assert_eq!(dashboard.this_month_tasks, 0);
        assert_eq!(dashboard.monthly.len(), 6);
        assert!(dashboard.top_clients.is_empty());
    }
}
