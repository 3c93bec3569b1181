//! Configuration resolution tests
//!
//! Priority order: command line, environment, TOML file, compiled default.
//!
//! Uses serial_test because these tests manipulate process environment
//! variables.

use hitlabel_common::config::{
    load_toml_config, parse_toml_config, resolve_database, resolve_seed, resolve_server,
    TomlConfig, DATABASE_ENV, HOST_ENV, PORT_ENV, SEED_ENV,
};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn clear_env() {
    env::remove_var(DATABASE_ENV);
    env::remove_var(HOST_ENV);
    env::remove_var(PORT_ENV);
    env::remove_var(SEED_ENV);
}

fn file_config() -> TomlConfig {
    parse_toml_config(
        r#"
        [database]
        path = "/srv/label/from-toml.db"
        busy_timeout_ms = 750

        [server]
        host = "10.0.0.1"
        port = 6000

        [generator]
        seed = 9
        "#,
    )
    .unwrap()
}

#[test]
#[serial]
fn test_database_defaults_without_overrides() {
    clear_env();

    let db = resolve_database(None, &TomlConfig::default());
    assert_eq!(db.path, hitlabel_common::config::default_database_path());
    assert_eq!(db.busy_timeout, Duration::from_millis(5000));
}

#[test]
#[serial]
fn test_database_toml_beats_default() {
    clear_env();

    let db = resolve_database(None, &file_config());
    assert_eq!(db.path, PathBuf::from("/srv/label/from-toml.db"));
    assert_eq!(db.busy_timeout, Duration::from_millis(750));
}

#[test]
#[serial]
fn test_database_env_beats_toml() {
    clear_env();
    env::set_var(DATABASE_ENV, "/tmp/from-env.db");

    let db = resolve_database(None, &file_config());
    assert_eq!(db.path, PathBuf::from("/tmp/from-env.db"));

    env::remove_var(DATABASE_ENV);
}

#[test]
#[serial]
fn test_database_cli_beats_env() {
    clear_env();
    env::set_var(DATABASE_ENV, "/tmp/from-env.db");

    let db = resolve_database(Some(Path::new("/tmp/from-cli.db")), &file_config());
    assert_eq!(db.path, PathBuf::from("/tmp/from-cli.db"));

    env::remove_var(DATABASE_ENV);
}

#[test]
#[serial]
fn test_server_resolution_order() {
    clear_env();

    let server = resolve_server(None, None, &TomlConfig::default()).unwrap();
    assert_eq!(server.host, "0.0.0.0");
    assert_eq!(server.port, 5000);

    let server = resolve_server(None, None, &file_config()).unwrap();
    assert_eq!(server.bind_addr(), "10.0.0.1:6000");

    env::set_var(PORT_ENV, "7000");
    let server = resolve_server(None, None, &file_config()).unwrap();
    assert_eq!(server.port, 7000);

    let server = resolve_server(Some("127.0.0.1"), Some(8000), &file_config()).unwrap();
    assert_eq!(server.bind_addr(), "127.0.0.1:8000");

    env::remove_var(PORT_ENV);
}

#[test]
#[serial]
fn test_invalid_port_env_is_config_error() {
    clear_env();
    env::set_var(PORT_ENV, "not-a-port");

    let result = resolve_server(None, None, &TomlConfig::default());
    assert!(matches!(result, Err(hitlabel_common::Error::Config(_))));

    env::remove_var(PORT_ENV);
}

#[test]
#[serial]
fn test_seed_resolution_order() {
    clear_env();

    assert_eq!(resolve_seed(None, &TomlConfig::default()).unwrap(), 42);
    assert_eq!(resolve_seed(None, &file_config()).unwrap(), 9);

    env::set_var(SEED_ENV, "1234");
    assert_eq!(resolve_seed(None, &file_config()).unwrap(), 1234);
    assert_eq!(resolve_seed(Some(5), &file_config()).unwrap(), 5);

    env::remove_var(SEED_ENV);
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_toml_config(Some(&dir.path().join("absent.toml"))).unwrap();

    assert!(config.database.path.is_none());
    assert_eq!(config.generator.artists, 60);
}

#[test]
fn test_config_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[server]\nport = 5123\n").unwrap();

    let config = load_toml_config(Some(&path)).unwrap();
    assert_eq!(config.server.port, Some(5123));
}

#[test]
fn test_malformed_config_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[server\nport = ").unwrap();

    let result = load_toml_config(Some(&path));
    assert!(matches!(result, Err(hitlabel_common::Error::Config(_))));
}

#[test]
fn test_unreadable_config_path_is_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = load_toml_config(Some(dir.path()));
    assert!(matches!(result, Err(hitlabel_common::Error::ConfigFile { .. })));
}
