//! Summary, monthly, deadline, insight and dashboard commands.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::humanize::pluralize;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::rollup::{
    compute_dashboard, compute_deadline_buckets, compute_monthly_series,
    compute_productivity_insights, compute_summary_counts, DeadlineCounts, Insights, MonthBucket,
    SummaryCounts,
};

use super::{load_context, snapshot_label, Context, SourceOptions};

const MAX_WINDOW_MONTHS: u32 = 120;

pub struct MonthlyOptions {
    pub window: Option<u32>,
    pub source: SourceOptions,
}

#[derive(Serialize)]
struct MonthlyReport<'a> {
    window_months: u32,
    months: &'a [MonthBucket],
}

#[derive(Serialize)]
struct DeadlinesReport<'a> {
    horizon_days: u32,
    #[serde(flatten)]
    counts: &'a DeadlineCounts,
}

fn output_options(source: &SourceOptions) -> OutputOptions {
    OutputOptions {
        json: source.json,
        quiet: source.quiet,
    }
}

/// Header plus the empty-snapshot warning every analytics command shares.
fn human_for(header: &str, ctx: &Context) -> HumanOutput {
    let mut human = HumanOutput::new(header);
    if ctx.snapshot.is_empty() {
        human.push_warning(format!(
            "no projects or tasks in {}",
            snapshot_label(&ctx.snapshot_path)
        ));
    }
    human
}

fn push_summary_lines(human: &mut HumanOutput, summary: &SummaryCounts) {
    human.push_summary(
        "tasks",
        format!(
            "{} ({} completed, {}%)",
            summary.total_tasks, summary.completed_tasks, summary.completion_rate
        ),
    );
    human.push_summary(
        "projects",
        format!(
            "{} ({} active, {} completed)",
            summary.total_projects, summary.active_projects, summary.completed_projects
        ),
    );
    human.push_summary("clients", summary.unique_clients.to_string());
}

fn push_deadline_lines(human: &mut HumanOutput, counts: &DeadlineCounts) {
    human.push_summary("overdue", counts.overdue.to_string());
    human.push_summary("due today", counts.due_today.to_string());
    human.push_summary("due this week", counts.due_this_week.to_string());
    human.push_summary("completed", counts.completed.to_string());
}

fn month_line(bucket: &MonthBucket) -> String {
    format!(
        "{}: {} created, {} completed, {}",
        bucket.label,
        pluralize(bucket.tasks_created, "task"),
        bucket.tasks_completed,
        pluralize(bucket.projects_created, "project"),
    )
}

fn push_insight_lines(human: &mut HumanOutput, insights: &Insights) {
    human.push_summary(
        "avg tasks/project",
        format!("{:.1}", insights.avg_tasks_per_project),
    );
    human.push_summary("completion rate", format!("{}%", insights.completion_rate));
    human.push_summary("active clients", insights.active_clients.to_string());
}

pub fn run_summary(source: SourceOptions) -> Result<()> {
    let ctx = load_context(&source)?;
    let summary = compute_summary_counts(&ctx.snapshot.tasks, &ctx.snapshot.projects);

    let mut human = human_for("gigdash summary", &ctx);
    push_summary_lines(&mut human, &summary);

    emit_success(output_options(&source), "summary", &summary, Some(&human))
}

pub fn run_monthly(options: MonthlyOptions) -> Result<()> {
    let ctx = load_context(&options.source)?;
    let window_months = match options.window {
        Some(window) if window == 0 || window > MAX_WINDOW_MONTHS => {
            return Err(Error::InvalidArgument(format!(
                "--window must be between 1 and {MAX_WINDOW_MONTHS}"
            )));
        }
        Some(window) => window,
        None => ctx.config.analytics.window_months,
    };

    let months = compute_monthly_series(
        &ctx.snapshot.tasks,
        &ctx.snapshot.projects,
        ctx.now,
        window_months,
    );

    let mut human = human_for(&format!("gigdash monthly: last {window_months} months"), &ctx);
    for bucket in &months {
        human.push_detail(month_line(bucket));
    }

    let report = MonthlyReport {
        window_months,
        months: &months,
    };
    emit_success(
        output_options(&options.source),
        "monthly",
        &report,
        Some(&human),
    )
}

pub fn run_deadlines(source: SourceOptions) -> Result<()> {
    let ctx = load_context(&source)?;
    let horizon_days = ctx.config.analytics.due_soon_days;
    let counts = compute_deadline_buckets(&ctx.snapshot.tasks, ctx.now, horizon_days);

    let mut human = human_for("gigdash deadlines", &ctx);
    push_deadline_lines(&mut human, &counts);
    if counts.overdue > 0 {
        human.push_next_step("gigdash tasks --filter overdue");
    }

    let report = DeadlinesReport {
        horizon_days,
        counts: &counts,
    };
    emit_success(output_options(&source), "deadlines", &report, Some(&human))
}

pub fn run_insights(source: SourceOptions) -> Result<()> {
    let ctx = load_context(&source)?;
    let insights = compute_productivity_insights(&ctx.snapshot.tasks, &ctx.snapshot.projects);

    let mut human = human_for("gigdash insights", &ctx);
    push_insight_lines(&mut human, &insights);

    emit_success(output_options(&source), "insights", &insights, Some(&human))
}

pub fn run_dashboard(source: SourceOptions) -> Result<()> {
    let ctx = load_context(&source)?;
    let dashboard = compute_dashboard(&ctx.snapshot, ctx.now, &ctx.config.analytics);

    let mut human = human_for("gigdash dashboard", &ctx);
    push_summary_lines(&mut human, &dashboard.summary);
    human.push_summary("pending", dashboard.pending_tasks.to_string());
    human.push_summary("this month", pluralize(dashboard.this_month_tasks, "task"));
    push_deadline_lines(&mut human, &dashboard.deadlines);
    push_insight_lines(&mut human, &dashboard.insights);

    for bucket in &dashboard.monthly {
        human.push_detail(month_line(bucket));
    }
    for client in &dashboard.top_clients {
        human.push_detail(format!(
            "client {}: {}",
            client.name,
            pluralize(client.count, "project")
        ));
    }
    if dashboard.deadlines.overdue > 0 {
        human.push_next_step("gigdash tasks --filter overdue");
    }

    emit_success(output_options(&source), "dashboard", &dashboard, Some(&human))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    #[test]
    fn month_line_pluralizes() {
        let start: DateTime<FixedOffset> =
            DateTime::parse_from_rfc3339("2026-10-01T00:00:00+00:00").expect("start");
        let bucket = MonthBucket {
            label: "Oct".to_string(),
            start,
            end: start,
            tasks_created: 1,
            projects_created: 2,
            tasks_completed: 0,
        };
        assert_eq!(
            month_line(&bucket),
            "Oct: 1 task created, 0 completed, 2 projects"
        );
    }
}
