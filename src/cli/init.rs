//! gigdash init command implementation
//!
//! Creates `.gigdash.toml` and an empty snapshot file in a directory.

use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::snapshot::Snapshot;

use super::resolve_dir;

pub struct InitOptions {
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct InitReport {
    dir: PathBuf,
    snapshot: PathBuf,
    created: InitCreated,
}

#[derive(serde::Serialize)]
struct InitCreated {
    config: bool,
    snapshot: bool,
}

pub fn run(options: InitOptions) -> Result<()> {
    let dir = resolve_dir(options.dir.as_ref())?;
    if !dir.is_dir() {
        return Err(Error::InvalidArgument(format!(
            "not a directory: {}",
            dir.display()
        )));
    }

    let created_config = ensure_config(&dir)?;
    // Read back so an existing config decides where the snapshot lives.
    let config = Config::load_from_dir(&dir)?;
    let snapshot_path = config.snapshot_path(&dir);
    let created_snapshot = ensure_snapshot(&snapshot_path)?;

    let report = InitReport {
        dir: dir.clone(),
        snapshot: snapshot_path.clone(),
        created: InitCreated {
            config: created_config,
            snapshot: created_snapshot,
        },
    };

    let mut created_items = Vec::new();
    if created_config {
        created_items.push(CONFIG_FILE.to_string());
    }
    if created_snapshot {
        created_items.push(config.data.snapshot.display().to_string());
    }

    let header = if created_items.is_empty() {
        "gigdash init: nothing to do".to_string()
    } else {
        "gigdash init: initialized".to_string()
    };

    let mut human = HumanOutput::new(header);
    human.push_summary("dir", dir.display().to_string());
    human.push_summary(
        "created",
        if created_items.is_empty() {
            "none".to_string()
        } else {
            created_items.join(", ")
        },
    );
    human.push_next_step(format!(
        "export projects to {}",
        snapshot_path.display()
    ));
    human.push_next_step("gigdash dashboard");

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "init",
        &report,
        Some(&human),
    )?;

    Ok(())
}

fn ensure_config(dir: &Path) -> Result<bool> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() {
        if !config_path.is_file() {
            return Err(Error::OperationFailed(format!(
                "{CONFIG_FILE} exists but is not a file: {}",
                config_path.display()
            )));
        }
        return Ok(false);
    }

    Config::default().save(&config_path)?;
    Ok(true)
}

fn ensure_snapshot(path: &Path) -> Result<bool> {
    if path.exists() {
        if !path.is_file() {
            return Err(Error::OperationFailed(format!(
                "snapshot exists but is not a file: {}",
                path.display()
            )));
        }
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Snapshot::default().save(path)?;
    Ok(true)
}
