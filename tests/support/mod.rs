#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Fixed reference instant used by the CLI tests.
pub const NOW: &str = "2026-10-16T12:00:00Z";

pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        self.write_file(".gigdash.toml", contents)
    }

    pub fn write_snapshot(&self, snapshot: &Value) -> std::io::Result<PathBuf> {
        let contents = serde_json::to_string_pretty(snapshot).expect("snapshot json");
        self.write_file("gigdash.json", &contents)
    }
}

pub fn gigdash_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gigdash").expect("binary");
    cmd.env_remove("GIGDASH_DIR")
        .env_remove("GIGDASH_DATA")
        .env_remove("GIGDASH_USER")
        .env_remove("GIGDASH_NOW")
        .env_remove("RUST_LOG");
    cmd
}

/// Command rooted in `dir` with the reference instant pinned.
pub fn gigdash_in(dir: &TestDir) -> Command {
    let mut cmd = gigdash_cmd();
    cmd.current_dir(dir.path()).args(["--now", NOW]);
    cmd
}

/// Run with `--json` and return the parsed envelope.
pub fn run_json(dir: &TestDir, args: &[&str]) -> Value {
    let output = gigdash_in(dir)
        .args(args)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("json envelope")
}

pub fn task(id: &str, project_id: &str, status: &str, deadline: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Task {id}"),
        "status": status,
        "deadline": deadline,
        "createdAt": created_at,
        "projectId": project_id,
    })
}

pub fn project(id: &str, client: Option<&str>, created_at: &str, tasks: Vec<Value>) -> Value {
    json!({
        "id": id,
        "title": format!("Project {id}"),
        "client": client,
        "createdAt": created_at,
        "userId": "u1",
        "tasks": tasks,
    })
}

/// Two Acme projects (one finished, one in flight), one Globex project with
/// an overdue task, and a project without a client.
pub fn sample_snapshot() -> Value {
    json!({
        "projects": [
            project("p1", Some("Acme"), "2026-08-03T09:00:00Z", vec![
                task("t1", "p1", "complete", "2026-08-20T00:00:00Z", "2026-08-03T10:00:00Z"),
                task("t2", "p1", "complete", "2026-09-01T00:00:00Z", "2026-08-04T10:00:00Z"),
            ]),
            project("p2", Some("Acme"), "2026-10-02T09:00:00Z", vec![
                task("t3", "p2", "pending", "2026-10-16T18:00:00Z", "2026-10-02T10:00:00Z"),
                task("t4", "p2", "pending", "2026-10-20T00:00:00Z", "2026-10-03T10:00:00Z"),
            ]),
            project("p3", Some("Globex"), "2026-09-10T09:00:00Z", vec![
                task("t5", "p3", "pending", "2026-10-10T00:00:00Z", "2026-09-10T10:00:00Z"),
            ]),
            project("p4", None, "2026-10-05T09:00:00Z", vec![]),
        ]
    })
}
