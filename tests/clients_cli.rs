mod support;

use predicates::str::contains;
use serde_json::json;

use support::{gigdash_in, project, run_json, sample_snapshot, TestDir};

#[test]
fn clients_top_ranks_by_project_count() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    dir.write_snapshot(&sample_snapshot())?;

    let value = run_json(&dir, &["clients", "top"]);
    assert_eq!(value["command"], "clients top");
    assert_eq!(value["data"]["limit"], 5);
    assert_eq!(
        value["data"]["clients"],
        json!([{ "name": "Acme", "count": 2 }, { "name": "Globex", "count": 1 }])
    );
    Ok(())
}

#[test]
fn clients_top_keeps_first_seen_order_on_ties() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    dir.write_snapshot(&json!({
        "projects": [
            project("p1", Some("Beta"), "2026-10-01T00:00:00Z", vec![]),
            project("p2", Some("Alpha"), "2026-10-01T00:00:00Z", vec![]),
            project("p3", Some("Gamma"), "2026-10-01T00:00:00Z", vec![]),
            project("p4", Some("Gamma"), "2026-10-01T00:00:00Z", vec![]),
            project("p5", Some(""), "2026-10-01T00:00:00Z", vec![]),
        ]
    }))?;

    let value = run_json(&dir, &["clients", "top", "--limit", "2"]);
    assert_eq!(
        value["data"]["clients"],
        json!([{ "name": "Gamma", "count": 2 }, { "name": "Beta", "count": 1 }])
    );
    Ok(())
}

#[test]
fn clients_top_rejects_zero_limit() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    dir.write_snapshot(&sample_snapshot())?;

    gigdash_in(&dir)
        .args(["clients", "top", "--limit", "0"])
        .assert()
        .code(2)
        .stderr(contains("--limit"));
    Ok(())
}

#[test]
fn clients_top_uses_configured_count() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    dir.write_snapshot(&sample_snapshot())?;
    dir.write_config("[analytics]\ntop_clients = 1\n")?;

    let value = run_json(&dir, &["clients", "top"]);
    assert_eq!(value["data"]["clients"], json!([{ "name": "Acme", "count": 2 }]));
    Ok(())
}

#[test]
fn clients_list_profiles_each_client() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    dir.write_snapshot(&sample_snapshot())?;

    let value = run_json(&dir, &["clients", "list"]);
    assert_eq!(value["command"], "clients list");

    let data = &value["data"];
    assert_eq!(data["overview"]["total_clients"], 2);
    assert_eq!(data["overview"]["active_clients"], 2);
    assert_eq!(data["overview"]["total_projects"], 3);
    assert_eq!(data["overview"]["avg_projects_per_client"], 1.5);

    let acme = &data["clients"][0];
    assert_eq!(acme["name"], "Acme");
    assert_eq!(acme["project_count"], 2);
    assert_eq!(acme["total_tasks"], 4);
    assert_eq!(acme["completed_tasks"], 2);
    assert_eq!(acme["completion_rate"], 50);
    assert_eq!(acme["active_projects"], 1);
    assert_eq!(acme["projects"][1]["id"], "p2");

    assert_eq!(data["clients"][1]["name"], "Globex");
    Ok(())
}

#[test]
fn clients_list_sorts_and_searches() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    dir.write_snapshot(&sample_snapshot())?;

    let value = run_json(&dir, &["clients", "list", "--sort", "activity"]);
    assert_eq!(value["data"]["clients"][0]["name"], "Acme");

    let value = run_json(&dir, &["clients", "list", "--search", "glo"]);
    let clients = value["data"]["clients"].as_array().expect("clients");
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["name"], "Globex");
    assert_eq!(value["data"]["overview"]["total_clients"], 2);
    Ok(())
}

#[test]
fn clients_list_rejects_unknown_sort() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    dir.write_snapshot(&sample_snapshot())?;

    let output = gigdash_in(&dir)
        .args(["clients", "list", "--sort", "revenue", "--json"])
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(value["status"], "error");
    assert_eq!(value["command"], "clients list");
    assert_eq!(value["error"]["kind"], "user_error");
    assert_eq!(value["error"]["code"], 2);
    Ok(())
}

#[test]
fn clients_list_human_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    dir.write_snapshot(&sample_snapshot())?;

    gigdash_in(&dir)
        .args(["clients", "list"])
        .assert()
        .success()
        .stdout(contains("- clients: 2 (2 active)"))
        .stdout(contains(
            "- Acme: 2 projects, 4 tasks (50% complete), last activity 14 days ago",
        ));
    Ok(())
}
