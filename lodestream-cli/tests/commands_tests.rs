// Subcommand tests
// Drive handlers against temporary config files and replica directories

use lodestream_cli::commands::{self, databases, generations, replicate, restore, validate, wal};
use lodestream_cli::{Router, RouterError};
use lodestream_core::{ConfigLoader, ReplicaState};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Config with one database and a file replica rooted inside `dir`
fn setup(dir: &TempDir) -> String {
    let db_path = dir.path().join("app.db");
    let replica_path = dir.path().join("replica");
    let config_path = dir.path().join("lodestream.yml");

    fs::write(
        &config_path,
        format!(
            "dbs:\n  - path: {}\n    replicas:\n      - name: local\n        path: file://{}\n",
            db_path.display(),
            replica_path.display()
        ),
    )
    .unwrap();

    let generation = replica_path.join("generations").join("0001");
    fs::create_dir_all(generation.join("wal")).unwrap();
    fs::write(generation.join("wal").join("00000000.wal"), b"").unwrap();

    config_path.display().to_string()
}

#[tokio::test]
async fn test_no_arguments_requests_help() {
    let router = Router::new("0.0.0-test");
    let err = router.run(&[]).await.unwrap_err();
    assert!(matches!(err, RouterError::HelpRequested));
}

#[tokio::test]
async fn test_bogus_command() {
    let router = Router::new("0.0.0-test");
    let err = router.run(&args(&["bogus"])).await.unwrap_err();
    assert!(matches!(err, RouterError::UnknownCommand(c) if c == "bogus"));
}

#[tokio::test]
async fn test_subcommand_help_is_help_requested() {
    let router = Router::new("0.0.0-test");
    let err = router.run(&args(&["databases", "--help"])).await.unwrap_err();
    assert!(matches!(err, RouterError::HelpRequested));
}

#[tokio::test]
async fn test_version_command() {
    let router = Router::new("1.2.3");
    assert_eq!(router.version(), "1.2.3");
    router.run(&args(&["version"])).await.unwrap();
}

#[tokio::test]
async fn test_missing_config_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yml");
    let router = Router::new("0.0.0-test");

    let err = router
        .run(&args(&["validate", "--config", missing.to_str().unwrap()]))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("config file not found"));
}

#[test]
fn test_databases_lists_replica_names() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = setup(&dir);
    let config = ConfigLoader::new().load(&config_path).unwrap();

    let mut out = Vec::new();
    databases::execute(&config, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.starts_with("path"));
    assert!(out.contains("app.db"));
    assert!(out.trim_end().ends_with("local"));
}

#[test]
fn test_validate_reports_each_database() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = setup(&dir);
    let config = ConfigLoader::new().load(&config_path).unwrap();

    let mut out = Vec::new();
    validate::execute(&config, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("ok (1 replicas)"));
    assert!(out.contains("local (file)"));
    assert!(out.contains("retention=1day"));
}

#[test]
fn test_generations_and_wal_listing() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = setup(&dir);
    let db_path = dir.path().join("app.db").display().to_string();

    let parsed: generations::GenerationsArgs = commands::parse(
        lodestream_cli::Command::Generations,
        &args(&["--config", &config_path, &db_path]),
    )
    .unwrap();
    let db = parsed.db.open().unwrap();
    let replicas = parsed.db.select(&db).unwrap();

    let mut out = Vec::new();
    generations::execute(&replicas, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "name\tgeneration\nlocal\t0001\n");

    let mut out = Vec::new();
    wal::execute(&replicas, None, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "replica\tgeneration\tpath\nlocal\t0001\t00000000.wal\n"
    );
}

#[test]
fn test_unknown_database_and_replica() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = setup(&dir);
    let config = ConfigLoader::new().load(&config_path).unwrap();

    let err = commands::open_db(&config, "/not/configured.db").unwrap_err();
    assert!(err.to_string().contains("database not found in config"));

    let db_path = dir.path().join("app.db").display().to_string();
    let parsed: generations::GenerationsArgs = commands::parse(
        lodestream_cli::Command::Generations,
        &args(&["--config", &config_path, "--replica", "nope", &db_path]),
    )
    .unwrap();
    let db = parsed.db.open().unwrap();
    assert!(parsed.db.select(&db).is_err());
}

#[test]
fn test_restore_is_left_to_engine() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = setup(&dir);
    let db_path = dir.path().join("app.db").display().to_string();
    let output = dir.path().join("restored.db");

    let parsed: restore::RestoreArgs = commands::parse(
        lodestream_cli::Command::Restore,
        &args(&["--config", &config_path, "-o", output.to_str().unwrap(), &db_path]),
    )
    .unwrap();
    let db = parsed.db.open().unwrap();

    let err = restore::execute(&parsed, &db).unwrap_err();
    assert!(format!("{err:#}").contains("restore is provided by the replication engine"));
    assert!(!Path::new(&output).exists());
}

#[test]
fn test_replicate_starts_and_stops_replicas() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = setup(&dir);
    let config = ConfigLoader::new().load(&config_path).unwrap();

    let mut dbs = replicate::start(&config).unwrap();
    assert_eq!(dbs[0].replicas()[0].status().state, ReplicaState::Running);

    replicate::stop(&mut dbs);
    assert_eq!(dbs[0].replicas()[0].status().state, ReplicaState::Stopped);
}

#[test]
fn test_replicate_requires_databases() {
    let config = lodestream_core::Config::default();
    assert!(replicate::start(&config).is_err());
}
