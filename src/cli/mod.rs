//! Command-line interface for gigdash
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command group is implemented in its own submodule.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::snapshot::{Snapshot, STDIN_PATH};

mod analytics;
mod clients;
mod init;
mod projects;
mod tasks;

/// gigdash - freelancer dashboard rollups
///
/// Summaries, monthly trends, deadlines and client rankings computed from a
/// snapshot of your tasks and projects.
#[derive(Parser, Debug)]
#[command(name = "gigdash")]
#[command(author, version, long_about = None)]
#[command(about = "gigdash - freelancer dashboard rollups")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding .gigdash.toml (defaults to current directory)
    #[arg(long, global = true, env = "GIGDASH_DIR")]
    pub dir: Option<PathBuf>,

    /// Snapshot file to read ("-" for stdin); overrides data.snapshot
    #[arg(long, global = true, env = "GIGDASH_DATA")]
    pub data: Option<PathBuf>,

    /// Only include projects owned by this user
    #[arg(long, global = true, env = "GIGDASH_USER")]
    pub user: Option<String>,

    /// Reference instant (RFC 3339) instead of the wall clock
    #[arg(long, global = true, env = "GIGDASH_NOW")]
    pub now: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging for gigdash
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .gigdash.toml and an empty snapshot
    Init,

    /// Task, project and client totals
    Summary,

    /// Tasks and projects created per calendar month
    Monthly {
        /// Number of months, ending with the current one
        #[arg(long)]
        window: Option<u32>,
    },

    /// Overdue, due today and due soon counts
    Deadlines,

    /// Client ranking and directory
    #[command(subcommand)]
    Clients(ClientsCommands),

    /// Averages and ratios
    Insights,

    /// Task list with deadline state
    Tasks {
        /// all, pending, overdue or complete
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Per-project progress
    Projects,

    /// Full analytics view
    Dashboard,
}

/// Client subcommands
#[derive(Subcommand, Debug)]
pub enum ClientsCommands {
    /// Clients ranked by project count
    Top {
        /// Number of clients to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Every client with task and activity totals
    List {
        /// name, projects or activity
        #[arg(long, default_value = "name")]
        sort: String,

        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,
    },
}

/// Where the snapshot comes from and how output is rendered.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    pub dir: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub user: Option<String>,
    pub now: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

/// Loaded inputs shared by every rollup command.
pub(crate) struct Context {
    pub config: Config,
    pub snapshot: Snapshot,
    pub now: DateTime<FixedOffset>,
    pub snapshot_path: PathBuf,
}

pub(crate) fn load_context(source: &SourceOptions) -> Result<Context> {
    let dir = resolve_dir(source.dir.as_ref())?;
    let config = Config::load_from_dir(&dir)?;
    let now = resolve_now(source.now.as_deref(), config.time.offset()?)?;

    let snapshot_path = match &source.data {
        Some(path) => path.clone(),
        None => config.snapshot_path(&dir),
    };
    let snapshot = Snapshot::load(&snapshot_path)?;

    let user = source.user.clone().or_else(|| config.data.user.clone());
    let snapshot = match user.as_deref() {
        Some(user) => snapshot.for_user(user),
        None => snapshot,
    };

    Ok(Context {
        config,
        snapshot,
        now,
        snapshot_path,
    })
}

pub(crate) fn resolve_dir(dir: Option<&PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(path) => Ok(path.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

/// Parse `--now`, or take the wall clock, expressed in the calendar offset.
pub fn resolve_now(value: Option<&str>, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    let Some(value) = value else {
        return Ok(Utc::now().with_timezone(&offset));
    };
    let parsed = DateTime::parse_from_rfc3339(value.trim()).map_err(|err| {
        Error::InvalidArgument(format!("invalid --now '{value}': {err}"))
    })?;
    Ok(parsed.with_timezone(&offset))
}

pub(crate) fn snapshot_label(path: &std::path::Path) -> String {
    if path.as_os_str() == STDIN_PATH {
        "stdin".to_string()
    } else {
        path.display().to_string()
    }
}

impl Cli {
    fn source(&self) -> SourceOptions {
        SourceOptions {
            dir: self.dir.clone(),
            data: self.data.clone(),
            user: self.user.clone(),
            now: self.now.clone(),
            json: self.json,
            quiet: self.quiet,
        }
    }

    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let source = self.source();
        match self.command {
            Commands::Init => init::run(init::InitOptions {
                dir: source.dir,
                json: source.json,
                quiet: source.quiet,
            }),
            Commands::Summary => analytics::run_summary(source),
            Commands::Monthly { window } => {
                analytics::run_monthly(analytics::MonthlyOptions { window, source })
            }
            Commands::Deadlines => analytics::run_deadlines(source),
            Commands::Insights => analytics::run_insights(source),
            Commands::Dashboard => analytics::run_dashboard(source),
            Commands::Clients(cmd) => match cmd {
                ClientsCommands::Top { limit } => {
                    clients::run_top(clients::TopOptions { limit, source })
                }
                ClientsCommands::List { sort, search } => {
                    clients::run_list(clients::ListOptions {
                        sort,
                        search,
                        source,
                    })
                }
            },
            Commands::Tasks { filter } => tasks::run(tasks::TasksOptions { filter, source }),
            Commands::Projects => projects::run(source),
        }
    }
}
