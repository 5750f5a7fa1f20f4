//! Client rollups.
//!
//! Clients exist only as the `client` string on projects. Grouping keeps
//! first-seen order so equal counts rank in the order clients appeared.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{completed_count, percent, round1};
use crate::error::Error;
use crate::model::Project;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientCount {
    pub name: String,
    pub count: usize,
}

/// Projects grouped by client name in first-seen order.
fn group_by_client(projects: &[Project]) -> Vec<(&str, Vec<&Project>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Project>)> = Vec::new();

    for project in projects {
        let Some(name) = project.client_name() else {
            continue;
        };
        match index.get(name) {
            Some(&slot) => groups[slot].1.push(project),
            None => {
                index.insert(name, groups.len());
                groups.push((name, vec![project]));
            }
        }
    }

    groups
}

/// Clients ranked by project count, descending, ties in first-seen order.
pub fn compute_client_ranking(projects: &[Project], top_n: usize) -> Vec<ClientCount> {
    let mut ranking: Vec<ClientCount> = group_by_client(projects)
        .into_iter()
        .map(|(name, projects)| ClientCount {
            name: name.to_string(),
            count: projects.len(),
        })
        .collect();

    ranking.sort_by(|left, right| right.count.cmp(&left.count));
    ranking.truncate(top_n);
    ranking
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientProjectRef {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientProfile {
    pub name: String,
    pub projects: Vec<ClientProjectRef>,
    pub project_count: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_rate: u32,
    pub active_projects: usize,
    pub active: bool,
    pub last_activity: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientOverview {
    pub total_clients: usize,
    pub active_clients: usize,
    pub total_projects: usize,
    pub avg_projects_per_client: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientDirectory {
    pub overview: ClientOverview,
    pub clients: Vec<ClientProfile>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientSort {
    #[default]
    Name,
    Projects,
    Activity,
}

impl FromStr for ClientSort {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(ClientSort::Name),
            "projects" => Ok(ClientSort::Projects),
            "activity" => Ok(ClientSort::Activity),
            other => Err(Error::InvalidArgument(format!(
                "invalid client sort '{other}' (expected name|projects|activity)"
            ))),
        }
    }
}

fn profile(name: &str, projects: &[&Project]) -> ClientProfile {
    let total_tasks: usize = projects.iter().map(|project| project.tasks.len()).sum();
    let completed_tasks: usize = projects
        .iter()
        .map(|project| completed_count(&project.tasks))
        .sum();
    let active_projects = projects.iter().filter(|project| project.is_active()).count();
    // Groups are never empty; the fallback only satisfies the type.
    let last_activity = projects
        .iter()
        .map(|project| project.created_at)
        .max()
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    ClientProfile {
        name: name.to_string(),
        projects: projects
            .iter()
            .map(|project| ClientProjectRef {
                id: project.id.clone(),
                title: project.title.clone(),
            })
            .collect(),
        project_count: projects.len(),
        total_tasks,
        completed_tasks,
        completion_rate: percent(completed_tasks, total_tasks),
        active_projects,
        active: active_projects > 0,
        last_activity,
    }
}

fn compare_names(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Per-client profiles plus overview totals.
///
/// The overview always covers every client; `search` (case-insensitive
/// substring) only narrows the listed profiles.
pub fn client_directory(
    projects: &[Project],
    search: Option<&str>,
    sort: ClientSort,
) -> ClientDirectory {
    let all: Vec<ClientProfile> = group_by_client(projects)
        .into_iter()
        .map(|(name, projects)| profile(name, &projects))
        .collect();

    let total_clients = all.len();
    let total_projects: usize = all.iter().map(|client| client.project_count).sum();
    let overview = ClientOverview {
        total_clients,
        active_clients: all.iter().filter(|client| client.active).count(),
        total_projects,
        avg_projects_per_client: if total_clients > 0 {
            round1(total_projects as f64 / total_clients as f64)
        } else {
            0.0
        },
    };

    let needle = search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase);
    let mut clients: Vec<ClientProfile> = match needle {
        Some(needle) => all
            .into_iter()
            .filter(|client| client.name.to_lowercase().contains(&needle))
            .collect(),
        None => all,
    };

    match sort {
        ClientSort::Name => clients.sort_by(|left, right| compare_names(&left.name, &right.name)),
        ClientSort::Projects => {
            clients.sort_by(|left, right| right.project_count.cmp(&left.project_count))
        }
        ClientSort::Activity => {
            clients.sort_by(|left, right| right.last_activity.cmp(&left.last_activity))
        }
    }

    ClientDirectory { overview, clients }
}
