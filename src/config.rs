//! Server configuration read from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `PORT` | `3000` |
//! | `HOST` | `0.0.0.0` |
//! | `CORS_ALLOWED_ORIGINS` | `http://localhost:3000,http://localhost:8080,https://movies.com` |
//! | `MOVIES_SEED_PATH` | bundled fixture |
//! | `LOG_FORMAT` | `pretty` |

use std::fmt;
use std::path::PathBuf;

use crate::observability::LogFormat;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Origins browsers may call the API from.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:8080",
    "https://movies.com",
];

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub name: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Cross-origin settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    /// How long browsers may cache a preflight answer.
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            max_age_seconds: 600,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
    /// Replace the bundled fixture with this JSON file.
    pub seed_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors: CorsConfig::default(),
            seed_path: None,
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name).and_then(|v| {
                let trimmed = v.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        };

        let mut config = Self::default();

        if let Some(port) = var("PORT") {
            config.port = port.parse::<u16>().map_err(|e| ConfigError {
                name: "PORT",
                message: format!("must be a u16: {e}"),
            })?;
        }
        if let Some(host) = var("HOST") {
            config.host = host;
        }
        if let Some(origins) = var("CORS_ALLOWED_ORIGINS") {
            config.cors.allowed_origins = parse_origins(&origins);
        }
        if let Some(path) = var("MOVIES_SEED_PATH") {
            config.seed_path = Some(PathBuf::from(path));
        }
        if let Some(format) = var("LOG_FORMAT") {
            config.log_format = LogFormat::parse(&format).ok_or_else(|| ConfigError {
                name: "LOG_FORMAT",
                message: format!("must be `json` or `pretty`, got `{format}`"),
            })?;
        }

        Ok(config)
    }

    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
