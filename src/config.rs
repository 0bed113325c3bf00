//! Runtime configuration loaded from the process environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `1234` |
//! | `ALLOWED_ORIGINS` | comma-separated, see [`DEFAULT_ALLOWED_ORIGINS`] |
//! | `MOVIES_SEED` | bundled catalogue; a file path, or `none` to start empty |
//! | `LOG_LEVEL` | `info` |

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::Level;

use crate::movie::Movie;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 1234;
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://127.0.0.1:5500",
    "http://localhost:8080",
    "http://localhost:3000",
    "http://david-movies.com",
];

/// Catalogue compiled into the binary, loaded when `MOVIES_SEED` is unset.
const BUNDLED_MOVIES: &str = include_str!("../data/movies.json");

/// Where the startup catalogue comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Seed {
    #[default]
    Bundled,
    File(PathBuf),
    Empty,
}

impl Seed {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("none") {
            Seed::Empty
        } else {
            Seed::File(PathBuf::from(value))
        }
    }

    /// Read and parse the catalogue.
    pub fn load(&self) -> Result<Vec<Movie>, ConfigError> {
        match self {
            Seed::Bundled => parse_catalogue(Path::new("<bundled>"), BUNDLED_MOVIES.as_bytes()),
            Seed::File(path) => {
                let bytes = std::fs::read(path).map_err(|e| ConfigError::Seed {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                parse_catalogue(path, &bytes)
            }
            Seed::Empty => Ok(Vec::new()),
        }
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Bundled => write!(f, "bundled"),
            Seed::File(path) => write!(f, "{}", path.display()),
            Seed::Empty => write!(f, "none"),
        }
    }
}

fn parse_catalogue(path: &Path, bytes: &[u8]) -> Result<Vec<Movie>, ConfigError> {
    serde_json::from_slice(bytes).map_err(|e| ConfigError::Seed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Snapshot of configuration values for the server binary.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub seed: Seed,
    pub log_level: Level,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            seed: Seed::default(),
            log_level: Level::INFO,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup. Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }
        if let Some(origins) = get("ALLOWED_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(seed) = get("MOVIES_SEED") {
            config.seed = Seed::parse(&seed);
        }
        if let Some(level) = get("LOG_LEVEL") {
            config.log_level = level.parse().map_err(|_| ConfigError::InvalidLogLevel(level))?;
        }

        Ok(config)
    }

    /// Bind address, `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Read the startup catalogue.
    pub fn load_seed(&self) -> Result<Vec<Movie>, ConfigError> {
        self.seed.load()
    }
}

/// Error type for configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidLogLevel(String),
    /// The seed catalogue could not be read or parsed.
    Seed { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(value) => write!(f, "invalid PORT: {}", value),
            ConfigError::InvalidLogLevel(value) => write!(f, "invalid LOG_LEVEL: {}", value),
            ConfigError::Seed { path, message } => {
                write!(f, "cannot load seed {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
