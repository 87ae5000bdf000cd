use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:50051";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://logs.db";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_MAX_CELLS: usize = 65_536;

#[derive(Debug, Error)]
#[error("invalid value {value:?} for {name}: {reason}")]
pub struct ConfigError {
    name: &'static str,
    value: String,
    reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Requests with more cells than this are rejected before the search runs.
    pub max_cells: usize,
    pub log_level: String,
}

impl Config {
    /// Reads the `RECT_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`], with variables supplied by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str, default: &str| {
            lookup(name).unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            listen_addr: parse_value(
                "RECT_LISTEN_ADDR",
                &var("RECT_LISTEN_ADDR", DEFAULT_LISTEN_ADDR),
            )?,
            database_url: var("RECT_DATABASE_URL", DEFAULT_DATABASE_URL),
            db_max_connections: parse_value(
                "RECT_DB_MAX_CONNECTIONS",
                &var("RECT_DB_MAX_CONNECTIONS", &DEFAULT_DB_MAX_CONNECTIONS.to_string()),
            )?,
            max_cells: parse_value(
                "RECT_MAX_CELLS",
                &var("RECT_MAX_CELLS", &DEFAULT_MAX_CELLS.to_string()),
            )?,
            log_level: var("RECT_LOG_LEVEL", "info"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 50051)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            max_cells: DEFAULT_MAX_CELLS,
            log_level: "info".to_string(),
        }
    }
}

fn parse_value<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
