//! gigdash tasks command implementation

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::rollup::{task_list, TaskFilter};

use super::{load_context, SourceOptions};

pub struct TasksOptions {
    pub filter: String,
    pub source: SourceOptions,
}

pub fn run(options: TasksOptions) -> Result<()> {
    let filter: TaskFilter = options.filter.parse()?;
    let ctx = load_context(&options.source)?;
    let list = task_list(&ctx.snapshot.tasks, &ctx.snapshot.projects, ctx.now, filter);

    let counts = &list.counts;
    let mut human = HumanOutput::new(format!("gigdash tasks: {}", filter.as_str()));
    human.push_summary("all", counts.all.to_string());
    human.push_summary("pending", counts.pending.to_string());
    human.push_summary("overdue", counts.overdue.to_string());
    human.push_summary("complete", counts.complete.to_string());

    for row in &list.tasks {
        let mut line = format!("{} {} ({})", row.id, row.title, row.due_label);
        match (&row.project, &row.client) {
            (Some(project), Some(client)) => line.push_str(&format!(" [{project} / {client}]")),
            (Some(project), None) => line.push_str(&format!(" [{project}]")),
            _ => {}
        }
        human.push_detail(line);
    }
    if list.tasks.is_empty() && counts.all > 0 {
        human.push_next_step("gigdash tasks --filter all");
    }

    emit_success(
        OutputOptions {
            json: options.source.json,
            quiet: options.source.quiet,
        },
        "tasks",
        &list,
        Some(&human),
    )
}
