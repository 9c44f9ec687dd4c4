use std::fs;
use std::path::Path;

use auth_service::config::environment;
use auth_service::config::Config;
use chrono::Duration;
use config::Map;
use tempfile::TempDir;

const DEFAULT_TOML: &str = r#"
[database]
url = "postgresql://localhost/auth"

[nats]
url = "nats://localhost:4222"
queue_group = "auth-service"

[jwt]
secret = ""
expiration_hours = 2
"#;

fn config_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create config dir");
    fs::write(dir.path().join("default.toml"), DEFAULT_TOML).expect("Failed to write default.toml");
    dir
}

fn vars(pairs: &[(&str, &str)]) -> Map<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn load(dir: &Path, run_mode: &str, pairs: &[(&str, &str)]) -> Result<Config, config::ConfigError> {
    Config::load_from(dir, run_mode, environment().source(Some(vars(pairs))))
}

#[test]
fn test_environment_sets_secret() {
    let dir = config_dir();

    let config = load(dir.path(), "development", &[("JWT__SECRET", "from-env-secret")])
        .expect("Failed to load config");

    assert_eq!(config.jwt.secret, "from-env-secret");
    assert_eq!(config.jwt.token_ttl().unwrap(), Duration::hours(2));
    assert_eq!(config.database.max_connections, 5);
}

#[test]
fn test_empty_secret_fails_validation() {
    let dir = config_dir();

    let error = load(dir.path(), "development", &[]).unwrap_err();

    assert!(error.to_string().contains("jwt.secret"));
}

#[test]
fn test_layering_precedence() {
    let dir = config_dir();
    fs::write(
        dir.path().join("production.toml"),
        "[nats]\nurl = \"nats://bus:4222\"\nqueue_group = \"auth-prod\"\n\n[jwt]\nsecret = \"file-secret\"\n",
    )
    .unwrap();

    let from_file = load(dir.path(), "production", &[]).unwrap();
    assert_eq!(from_file.nats.url, "nats://bus:4222");
    assert_eq!(from_file.nats.queue_group, "auth-prod");
    assert_eq!(from_file.jwt.secret, "file-secret");
    assert_eq!(from_file.database.url, "postgresql://localhost/auth");

    let overridden = load(
        dir.path(),
        "production",
        &[
            ("NATS__URL", "nats://override:4222"),
            ("DATABASE__MAX_CONNECTIONS", "20"),
        ],
    )
    .unwrap();
    assert_eq!(overridden.nats.url, "nats://override:4222");
    assert_eq!(overridden.nats.queue_group, "auth-prod");
    assert_eq!(overridden.database.max_connections, 20);
}

#[test]
fn test_environment_rejects_oversized_expiry() {
    let dir = config_dir();

    let result = load(
        dir.path(),
        "development",
        &[
            ("JWT__SECRET", "from-env-secret"),
            ("JWT__EXPIRATION_HOURS", "9223372036854775807"),
        ],
    );

    assert!(result.is_err());
}

// Only test in this binary that touches the process environment
#[test]
fn test_load_reads_process_environment() {
    std::env::set_var("JWT__SECRET", "process-env-secret");

    let config = Config::load().expect("Failed to load config");

    assert_eq!(config.jwt.secret, "process-env-secret");
    assert_eq!(config.nats.queue_group, "auth-service");
}
