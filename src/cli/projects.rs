//! gigdash projects command implementation

use serde::Serialize;

use crate::error::Result;
use crate::humanize::pluralize;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::rollup::{project_progress, ProjectProgress};

use super::{load_context, SourceOptions};

#[derive(Serialize)]
struct ProjectsReport<'a> {
    count: usize,
    projects: &'a [ProjectProgress],
}

pub fn run(source: SourceOptions) -> Result<()> {
    let ctx = load_context(&source)?;
    let projects = project_progress(&ctx.snapshot.projects, ctx.now);

    let mut human = HumanOutput::new(format!(
        "gigdash projects: {}",
        pluralize(projects.len(), "project")
    ));
    for project in &projects {
        let client = project.client.as_deref().unwrap_or("no client");
        human.push_detail(format!(
            "{} ({}): {}/{} tasks, {}% {}, created {}",
            project.title,
            client,
            project.completed_tasks,
            project.total_tasks,
            project.progress,
            project.state.as_str(),
            project.created_label,
        ));
    }
    if projects.is_empty() {
        human.push_warning("no projects in snapshot");
    }

    let report = ProjectsReport {
        count: projects.len(),
        projects: &projects,
    };
    emit_success(
        OutputOptions {
            json: source.json,
            quiet: source.quiet,
        },
        "projects",
        &report,
        Some(&human),
    )
}
