//! End-to-end tests of the `campus` binary against a temporary SQLite file.

use assert_cmd::Command;
use migration::{Migrator, MigratorTrait};
use std::process::Output;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn database_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.dir.path().join("campus.db").display())
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::cargo_bin("campus")
            .unwrap()
            .current_dir(self.dir.path())
            .env("CAMPUS_DATABASE_URL", self.database_url())
            .env("CAMPUS_LOG_LEVEL", "warn")
            .env_remove("RUST_LOG")
            .args(args)
            .output()
            .unwrap()
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "campus {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }
}

#[test]
fn migrate_verify_and_seed() {
    let ws = Workspace::new();
    let total = Migrator::migrations().len();

    ws.run_ok(&["migrate", "up"]);
    let status = ws.run_ok(&["migrate", "status"]);
    assert!(status.contains(&format!("{total}/{total} applied")), "{status}");
    assert!(!status.contains("pending"));

    let verify = ws.run_ok(&["schema", "verify"]);
    assert!(verify.contains("no issues"), "{verify}");

    ws.run_ok(&["seed"]);
    ws.run_ok(&["seed"]);

    let users: serde_json::Value =
        serde_json::from_str(&ws.run_ok(&["schema", "inspect", "--table", "users"])).unwrap();
    let columns: Vec<&str> = users["columns"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert!(columns.contains(&"deleted_at"));
    assert!(columns.contains(&"locale"));
}

#[test]
fn down_rolls_back_one_step_by_default() {
    let ws = Workspace::new();
    let total = Migrator::migrations().len();

    ws.run_ok(&["migrate", "up"]);
    ws.run_ok(&["migrate", "down"]);

    let status = ws.run_ok(&["migrate", "status"]);
    assert!(status.contains(&format!("{}/{total} applied", total - 1)), "{status}");
    assert!(status.contains("pending  m2024_03_01_000002_add_locale_columns_to_users"));

    ws.run_ok(&["migrate", "reset"]);
    let snapshot: serde_json::Value =
        serde_json::from_str(&ws.run_ok(&["schema", "inspect"])).unwrap();
    assert_eq!(snapshot["tables"], serde_json::json!({}));
}

#[test]
fn verify_fails_on_partially_migrated_schema() {
    let ws = Workspace::new();
    ws.run_ok(&["migrate", "up", "--steps", "3"]);

    let output = ws.run(&["schema", "verify"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("has no deleted_at column"), "{stdout}");
}

#[test]
fn inspecting_an_unknown_table_fails() {
    let ws = Workspace::new();
    ws.run_ok(&["migrate", "up", "--steps", "1"]);

    let output = ws.run(&["schema", "inspect", "--table", "spaceships"]);
    assert!(!output.status.success());
}

#[test]
fn database_url_flag_overrides_unusable_environment() {
    let ws = Workspace::new();
    let output = Command::cargo_bin("campus")
        .unwrap()
        .current_dir(ws.dir.path())
        .env("CAMPUS_DATABASE_URL", "mysql://root@localhost/campus")
        .env("CAMPUS_LOG_LEVEL", "warn")
        .env_remove("RUST_LOG")
        .args(["migrate", "status", "--database-url", &ws.database_url()])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0/"), "{stdout}");
}
