//! Configuration loading and resolution
//!
//! Every setting is resolved in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: a warning is logged and defaults are
//! used. A config file that exists but does not parse is a configuration error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "HITLABEL_CONFIG";
/// Environment variable overriding the database file path
pub const DATABASE_ENV: &str = "HITLABEL_DATABASE";
/// Environment variable overriding the API bind host
pub const HOST_ENV: &str = "HITLABEL_HOST";
/// Environment variable overriding the API port
pub const PORT_ENV: &str = "HITLABEL_PORT";
/// Environment variable overriding the generator seed
pub const SEED_ENV: &str = "HITLABEL_SEED";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;
const DATABASE_FILE_NAME: &str = "music_label.db";

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub database: DatabaseSection,
    pub server: ServerSection,
    pub generator: GeneratorSection,
}

/// `[database]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub path: Option<PathBuf>,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

/// `[server]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// `[generator]` section: seed and per-entity target counts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    pub seed: Option<u64>,
    pub artists: usize,
    pub producers: usize,
    pub studios: usize,
    pub distributions: usize,
    pub staff: usize,
    pub albums: usize,
    pub engineers: usize,
    pub managers: usize,
    pub recording_sessions: usize,
    pub songs: usize,
    pub song_distributions: usize,
    pub contracts: usize,
    pub artist_albums: usize,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            seed: None,
            artists: 60,
            producers: 50,
            studios: 20,
            distributions: 10,
            staff: 40,
            albums: 100,
            engineers: 15,
            managers: 10,
            recording_sessions: 150,
            songs: 500,
            song_distributions: 300,
            contracts: 50,
            artist_albums: 150,
        }
    }
}

/// Resolved storage settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub busy_timeout: Duration,
}

/// Resolved HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` form accepted by `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load the TOML config file
///
/// `explicit` is the `--config` / `HITLABEL_CONFIG` value. Without it the
/// platform config locations are searched.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_file() {
            Some(path) => path,
            None => {
                info!("No config file found, using defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    if !path.exists() {
        warn!("Config file {} not found, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| Error::ConfigFile {
        path: path.clone(),
        source,
    })?;
    let config = parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    info!("Loaded config file {}", path.display());
    Ok(config)
}

/// Parse config file contents
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
}

/// Resolve the database settings
pub fn resolve_database(cli_path: Option<&Path>, config: &TomlConfig) -> DatabaseConfig {
    let path = if let Some(path) = cli_path {
        path.to_path_buf()
    } else if let Ok(path) = std::env::var(DATABASE_ENV) {
        PathBuf::from(path)
    } else if let Some(path) = &config.database.path {
        path.clone()
    } else {
        default_database_path()
    };

    DatabaseConfig {
        path,
        busy_timeout: Duration::from_millis(config.database.busy_timeout_ms),
    }
}

/// Resolve the API listener settings
pub fn resolve_server(
    cli_host: Option<&str>,
    cli_port: Option<u16>,
    config: &TomlConfig,
) -> Result<ServerConfig> {
    let host = if let Some(host) = cli_host {
        host.to_string()
    } else if let Ok(host) = std::env::var(HOST_ENV) {
        host
    } else {
        config
            .server
            .host
            .clone()
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    };

    let port = if let Some(port) = cli_port {
        port
    } else if let Ok(port) = std::env::var(PORT_ENV) {
        port.parse()
            .map_err(|_| Error::Config(format!("{} is not a valid port: {}", PORT_ENV, port)))?
    } else {
        config.server.port.unwrap_or(DEFAULT_PORT)
    };

    Ok(ServerConfig { host, port })
}

/// Resolve the generator seed
pub fn resolve_seed(cli_seed: Option<u64>, config: &TomlConfig) -> Result<u64> {
    if let Some(seed) = cli_seed {
        return Ok(seed);
    }
    if let Ok(seed) = std::env::var(SEED_ENV) {
        return seed
            .parse()
            .map_err(|_| Error::Config(format!("{} is not a valid seed: {}", SEED_ENV, seed)));
    }
    Ok(config.generator.seed.unwrap_or(DEFAULT_SEED))
}

/// Find the platform config file, if one exists
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("hitlabel").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/hitlabel/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("hitlabel"))
        .unwrap_or_else(|| PathBuf::from("./hitlabel_data"))
        .join(DATABASE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = parse_toml_config("").unwrap();
        assert!(config.database.path.is_none());
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert_eq!(config.generator, GeneratorSection::default());
        assert_eq!(config.generator.songs, 500);
    }

    #[test]
    fn test_partial_generator_section_keeps_other_defaults() {
        let config = parse_toml_config(
            r#"
            [generator]
            seed = 7
            songs = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.generator.seed, Some(7));
        assert_eq!(config.generator.songs, 25);
        assert_eq!(config.generator.artists, 60);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = parse_toml_config("[server]\nport = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_default_database_path_file_name() {
        let path = default_database_path();
        assert_eq!(path.file_name().unwrap(), "music_label.db");
    }

    #[test]
    fn test_bind_addr() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
        };
        assert_eq!(server.bind_addr(), "127.0.0.1:5000");
    }
}
