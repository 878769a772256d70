//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn nclex(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nclex").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("NCLEX_DATABASE")
        .env_remove("NCLEX_BIND")
        .env_remove("RUST_LOG");
    cmd
}

// === Help Tests ===

#[test]
fn test_top_level_help() {
    let dir = TempDir::new().unwrap();
    nclex(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init-db"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn test_serve_help() {
    let dir = TempDir::new().unwrap();
    nclex(&dir)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--cors-origin"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let dir = TempDir::new().unwrap();
    nclex(&dir).arg("frobnicate").assert().failure();
}

// === Database Command Tests ===

#[test]
fn test_init_db_creates_file() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("data").join("reviews.db");

    nclex(&dir)
        .arg("--database")
        .arg(&db)
        .arg("init-db")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(db.exists());
}

#[test]
fn test_stats_on_empty_database() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("reviews.db");

    nclex(&dir)
        .arg("--database")
        .arg(&db)
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_reviews\": 0"))
        .stdout(predicate::str::contains("\"avg_study_months\": 4"));
}

#[test]
fn test_import_then_stats() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("reviews.db");
    let seed = dir.path().join("seed.json");
    std::fs::write(
        &seed,
        r#"[
            {"title": "Passed at 85", "author": "A", "content": "UWorld twice",
             "study_period_months": 3},
            {"title": "Retake next month", "author": "B", "content": "Ran out of time",
             "pass_status": "Fail", "study_period_months": 5}
        ]"#,
    )
    .unwrap();

    nclex(&dir)
        .env("NCLEX_DATABASE", &db)
        .arg("import")
        .arg(&seed)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 reviews"));

    nclex(&dir)
        .env("NCLEX_DATABASE", &db)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reviews:          2"))
        .stdout(predicate::str::contains("50%"))
        .stdout(predicate::str::contains("Avg study months: 4"));
}

#[test]
fn test_import_rejects_invalid_entry() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("reviews.db");
    let seed = dir.path().join("seed.json");
    std::fs::write(&seed, r#"[{"title": "", "author": "A", "content": "x"}]"#).unwrap();

    nclex(&dir)
        .arg("--database")
        .arg(&db)
        .arg("import")
        .arg(&seed)
        .assert()
        .failure()
        .stderr(predicate::str::contains("entry 0"));
}
