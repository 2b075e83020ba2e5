use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("items.json");
    let items = json!([
        {
            "id": "L-1", "type": "lost", "userId": "alice",
            "title": "iPhone 14", "category": "Electronics",
            "description": "black phone with case",
            "location": "Central Station", "date": "2024-01-15",
            "contactInfo": "alice@example.com"
        },
        {
            "id": "L-2", "type": "lost", "userId": "bob",
            "title": "Car keys", "category": "Keys",
            "description": "toyota key", "location": "Library", "date": "2024-01-14"
        },
        {
            "id": "F-1", "type": "found", "userId": "bob",
            "title": "iPhone", "category": "Electronics",
            "description": "black phone found near station",
            "location": "Central Station", "date": "2024-01-16"
        },
        {
            "id": "F-3", "type": "found", "userId": "carol",
            "title": "Keys", "category": "Keys",
            "description": "", "location": "City Mall", "date": "2024-01-16"
        }
    ]);
    fs::write(&path, serde_json::to_string_pretty(&items).unwrap()).unwrap();
    (dir, path)
}

fn retrievix(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("retrievix").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RETRIEVIX_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.path());
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn categories_need_no_store() {
    let dir = TempDir::new().unwrap();
    retrievix(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sports Equipment"))
        .stdout(predicate::str::contains("Electronics"));
}

#[test]
fn score_explains_each_signal() {
    let (dir, data) = fixture();
    let value = json_stdout(
        retrievix(&dir)
            .arg("--data")
            .arg(&data)
            .args(["--format", "json", "score", "L-1", "F-1"]),
    );
    assert_eq!(value["percent"], 82);
    assert_eq!(value["isMatch"], true);
    assert_eq!(value["breakdown"]["category"], 0.4);
}

#[test]
fn score_rejects_items_of_the_same_type() {
    let (dir, data) = fixture();
    retrievix(&dir)
        .arg("--data")
        .arg(&data)
        .args(["score", "L-1", "L-2"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("both lost"));
}

#[test]
fn suggest_lists_matches() {
    let (dir, data) = fixture();
    retrievix(&dir)
        .arg("--data")
        .arg(&data)
        .args(["suggest", "--user", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("82%"))
        .stdout(predicate::str::contains("F-1"));
}

#[test]
fn dashboard_with_metrics() {
    let (dir, data) = fixture();
    let value = json_stdout(
        retrievix(&dir)
            .arg("--data")
            .arg(&data)
            .args(["-f", "json", "dashboard", "--user", "alice", "--with-metrics"]),
    );
    let dashboard = &value["dashboard"];
    assert_eq!(dashboard["my_lost"].as_array().unwrap().len(), 1);
    assert_eq!(dashboard["suggestions"][0]["sourceLostItemId"], "L-1");
    assert_eq!(value["metrics"]["gauges"]["match.suggestions"], 1);
}

#[test]
fn similar_items_of_opposite_type() {
    let (dir, data) = fixture();
    let value = json_stdout(
        retrievix(&dir)
            .arg("--data")
            .arg(&data)
            .args(["-f", "json", "similar", "L-2"]),
    );
    let ids: Vec<&str> = value["similar"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["item"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["F-3"]);
}

#[test]
fn browse_filters_and_pages() {
    let (dir, data) = fixture();
    let value = json_stdout(
        retrievix(&dir)
            .arg("--data")
            .arg(&data)
            .args(["-f", "json", "browse", "--type", "found", "--search", "BLACK"]),
    );
    assert_eq!(value["total_items"], 1);
    assert_eq!(value["items"][0]["id"], "F-1");

    let past_end = json_stdout(
        retrievix(&dir)
            .arg("--data")
            .arg(&data)
            .args(["-f", "json", "browse", "--type", "lost", "--page", "5"]),
    );
    assert_eq!(past_end["items"].as_array().unwrap().len(), 0);
    assert_eq!(past_end["total_items"], 2);
}

#[test]
fn report_is_saved_to_snapshot() {
    let (dir, data) = fixture();
    let stored = json_stdout(retrievix(&dir).arg("--data").arg(&data).args([
        "-f",
        "json",
        "report",
        "--type",
        "found",
        "--title",
        "Blue umbrella",
        "--category",
        "Other",
        "--description",
        "folding umbrella",
        "--location",
        "Bus stop",
        "--date",
        "2024-02-01",
        "--contact",
        "dan@example.com",
        "--user",
        "dan",
    ]));
    assert_eq!(stored["userId"], "dan");
    assert_eq!(stored["status"], "active");

    let snapshot = fs::read_to_string(&data).unwrap();
    assert!(snapshot.contains("Blue umbrella"));
}

#[test]
fn report_in_new_snapshot_file() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("fresh.json");
    retrievix(&dir)
        .arg("--data")
        .arg(&data)
        .args([
            "report", "--type", "lost", "--title", "Wallet", "--category", "Accessories",
            "--description", "brown leather", "--location", "Park", "--date", "2024-03-03",
            "--contact", "eve@example.com", "--user", "eve",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reported"));
    assert!(data.exists());
}

#[test]
fn invalid_report_exits_with_validation_error() {
    let (dir, data) = fixture();
    retrievix(&dir)
        .arg("--data")
        .arg(&data)
        .args([
            "report", "--type", "lost", "--title", "Cat", "--category", "Pets",
            "--description", "ginger", "--location", "Yard", "--date", "yesterday",
            "--contact", "x@example.com", "--user", "alice",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("category"))
        .stderr(predicate::str::contains("date"));
}

#[test]
fn only_owner_may_delete() {
    let (dir, data) = fixture();
    retrievix(&dir)
        .arg("--data")
        .arg(&data)
        .args(["delete", "F-1", "--user", "alice"])
        .assert()
        .code(5);

    retrievix(&dir)
        .arg("--data")
        .arg(&data)
        .args(["delete", "F-1", "--user", "bob"])
        .assert()
        .success();
    assert!(!fs::read_to_string(&data).unwrap().contains("\"F-1\""));
}

#[test]
fn resolve_twice_fails() {
    let (dir, data) = fixture();
    retrievix(&dir)
        .arg("--data")
        .arg(&data)
        .args(["resolve", "L-1", "--user", "alice"])
        .assert()
        .success();

    retrievix(&dir)
        .arg("--data")
        .arg(&data)
        .args(["--format", "json", "resolve", "L-1", "--user", "alice"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("ALREADY_RESOLVED"));
}

#[test]
fn unknown_item_is_a_store_error() {
    let (dir, data) = fixture();
    retrievix(&dir)
        .arg("--data")
        .arg(&data)
        .args(["similar", "nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn missing_store_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    retrievix(&dir)
        .args(["suggest", "--user", "alice"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("--data"));
}

#[test]
fn data_file_from_config() {
    let (dir, data) = fixture();
    fs::write(
        dir.path().join(".retrievix.toml"),
        format!(
            "[store]\ndata_file = {:?}\n\n[matching]\nmax_suggestions = 1\n",
            data.display().to_string()
        ),
    )
    .unwrap();

    let value = json_stdout(retrievix(&dir).args(["-f", "json", "suggest", "--user", "alice"]));
    assert_eq!(value.as_array().unwrap().len(), 1);
}

#[test]
fn data_and_remote_conflict() {
    let (dir, data) = fixture();
    retrievix(&dir)
        .arg("--data")
        .arg(&data)
        .args(["--remote", "suggest", "--user", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn register_needs_a_password() {
    let dir = TempDir::new().unwrap();
    retrievix(&dir)
        .env_remove("RETRIEVIX_PASSWORD")
        .args(["register", "--name", "Ana", "--email", "ana@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--password"));
}

#[test]
fn register_against_unreachable_service() {
    let dir = TempDir::new().unwrap();
    retrievix(&dir)
        .env("RETRIEVIX_API_URL", "http://127.0.0.1:9/api")
        .env("RETRIEVIX_PASSWORD", "correct horse")
        .env_remove("RETRIEVIX_ENV")
        .args(["register", "--name", "Ana", "--email", "ana@example.com"])
        .assert()
        .code(69)
        .stderr(predicate::str::contains("correct horse").not());
}

#[test]
fn unknown_item_type_is_rejected() {
    let (dir, data) = fixture();
    retrievix(&dir)
        .arg("--data")
        .arg(&data)
        .args(["browse", "--type", "stolen"])
        .assert()
        .failure();
}
