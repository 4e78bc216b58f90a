use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs in an empty temp dir with no database, so every command uses a fresh
/// in-memory store.
fn postboard_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("postboard"));
    cmd.current_dir(dir.path())
        .env_remove("DATABASE_URL")
        .env_remove("POSTBOARD_LOG_FILE")
        .env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GraphQL API for posts"));
}

#[test]
fn test_version() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("postboard"));
}

// =============================================================================
// Init
// =============================================================================

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();

    postboard_cmd(&temp_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    let config = std::fs::read_to_string(temp_dir.path().join("postboard.toml")).unwrap();
    assert!(config.contains("port = 4000"));
    assert!(config.contains("x-user-id"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir).arg("init").assert().success();

    postboard_cmd(&temp_dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    postboard_cmd(&temp_dir)
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_invalid_config_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("postboard.toml"), "[server]\nport = \"x\"\n").unwrap();

    postboard_cmd(&temp_dir)
        .arg("schema")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

// =============================================================================
// Schema and Query
// =============================================================================

#[test]
fn test_schema_prints_sdl() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("type PaginatedPosts"))
        .stdout(predicate::str::contains("deletePost(id: Int!): DeletePostPayload!"));
}

#[test]
fn test_query_empty_listing() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .args(["query", "{ posts(limit: 5) { hasMore posts { id } } }"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hasMore\": false"));
}

#[test]
fn test_query_with_variables() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .args([
            "query",
            "query Get($id: Int!) { post(id: $id) { id } }",
            "--variables",
            r#"{"id": 3}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"post\": null"));
}

#[test]
fn test_query_rejects_bad_variables() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .args(["query", "{ post(id: 1) { id } }", "--variables", "not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Variables must be a JSON object"));
}

#[test]
fn test_mutation_without_identity_fails() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .args(["query", "mutation { deletePost(id: 1) { deleted } }"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("not authenticated"));
}

#[test]
fn test_mutation_as_unknown_user_returns_field_error() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .args([
            "query",
            "--as-user",
            "1",
            r#"mutation { createPost(input: { title: "T", text: "x" }) { errors { field message } } }"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"field\": \"general\""));
}

#[test]
fn test_delete_as_user_reports_not_found() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .args([
            "query",
            "--as-user",
            "1",
            "mutation { deletePost(id: 1) { deleted outcome } }",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deleted\": true"))
        .stdout(predicate::str::contains("NOT_FOUND"));
}

// =============================================================================
// Seeded in-memory store
// =============================================================================

const CREATE_POST: &str = r#"mutation { createPost(input: { title: "T", text: "x" }) {
    errors { field message }
    post { id title creatorName creatorId creator { firstName } }
} }"#;

#[test]
fn test_create_post_as_seeded_user() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .args(["query", "--seed-user", "Ada Lovelace", "--as-user", "1", CREATE_POST])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"creatorName\": \"Ada Lovelace\""))
        .stdout(predicate::str::contains("\"firstName\": \"Ada\""))
        .stdout(predicate::str::contains("\"errors\": null"));
}

#[test]
fn test_create_post_as_user_seeded_from_config() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("postboard.toml"),
        r#"
[[seed.users]]
first_name = "Ada"
last_name = "Lovelace"

[[seed.users]]
first_name = "Grace"
last_name = "Hopper"
"#,
    )
    .unwrap();

    postboard_cmd(&temp_dir)
        .args(["query", "--as-user", "2", CREATE_POST])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"creatorName\": \"Grace Hopper\""))
        .stdout(predicate::str::contains("\"creatorId\": 2"));
}

#[test]
fn test_seed_user_needs_first_and_last_name() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .args(["query", "--seed-user", "Ada", "{ posts(limit: 1) { hasMore } }"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FIRST LAST"));
}

// =============================================================================
// Users and Migrations
// =============================================================================

#[test]
fn test_user_add_requires_database() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .args(["user", "add", "Ada", "Lovelace", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No database configured"));
}

#[test]
fn test_user_rename_requires_database() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .args(["user", "rename", "5", "Augusta", "King"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No database configured"));
}

#[test]
fn test_migrate_requires_database() {
    let temp_dir = TempDir::new().unwrap();
    postboard_cmd(&temp_dir)
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No database configured"));
}
