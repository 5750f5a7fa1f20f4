//! gigdash clients command implementation

use serde::Serialize;

use crate::error::{Error, Result};
use crate::humanize::{pluralize, relative_days};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::rollup::{client_directory, compute_client_ranking, ClientCount, ClientSort};

use super::{load_context, SourceOptions};

pub struct TopOptions {
    pub limit: Option<usize>,
    pub source: SourceOptions,
}

pub struct ListOptions {
    pub sort: String,
    pub search: Option<String>,
    pub source: SourceOptions,
}

#[derive(Serialize)]
struct TopReport<'a> {
    limit: usize,
    clients: &'a [ClientCount],
}

pub fn run_top(options: TopOptions) -> Result<()> {
    let ctx = load_context(&options.source)?;
    let limit = match options.limit {
        Some(0) => {
            return Err(Error::InvalidArgument(
                "--limit must be at least 1".to_string(),
            ))
        }
        Some(limit) => limit,
        None => ctx.config.analytics.top_clients,
    };

    let clients = compute_client_ranking(&ctx.snapshot.projects, limit);

    let mut human = HumanOutput::new(format!(
        "gigdash clients top: {}",
        pluralize(clients.len(), "client")
    ));
    for (rank, client) in clients.iter().enumerate() {
        human.push_detail(format!(
            "{}. {} ({})",
            rank + 1,
            client.name,
            pluralize(client.count, "project")
        ));
    }
    if clients.is_empty() {
        human.push_warning("no projects have a client");
    }

    let report = TopReport {
        limit,
        clients: &clients,
    };
    emit_success(
        OutputOptions {
            json: options.source.json,
            quiet: options.source.quiet,
        },
        "clients top",
        &report,
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let sort: ClientSort = options.sort.parse()?;
    let ctx = load_context(&options.source)?;
    let directory = client_directory(&ctx.snapshot.projects, options.search.as_deref(), sort);

    let overview = &directory.overview;
    let mut human = HumanOutput::new("gigdash clients list");
    human.push_summary(
        "clients",
        format!(
            "{} ({} active)",
            overview.total_clients, overview.active_clients
        ),
    );
    human.push_summary("projects", overview.total_projects.to_string());
    human.push_summary(
        "avg projects/client",
        format!("{:.1}", overview.avg_projects_per_client),
    );
    if let Some(search) = options.search.as_deref() {
        human.push_summary("search", search);
    }

    for client in &directory.clients {
        human.push_detail(format!(
            "{}: {}, {} tasks ({}% complete), last activity {}",
            client.name,
            pluralize(client.project_count, "project"),
            client.total_tasks,
            client.completion_rate,
            relative_days(&client.last_activity, &ctx.now),
        ));
    }
    if directory.clients.is_empty() && overview.total_clients > 0 {
        human.push_warning("no clients match the search");
    }

    emit_success(
        OutputOptions {
            json: options.source.json,
            quiet: options.source.quiet,
        },
        "clients list",
        &directory,
        Some(&human),
    )
}
