//! Server configuration read from environment variables.
//!
//! - `TASKTRACK_HOST`: bind host, default `127.0.0.1`
//! - `TASKTRACK_PORT`: bind port, default `8000`
//! - `DATABASE_URL`: selects `PostgreSQL` storage when set
//! - `TASKTRACK_DB_POOL_SIZE`: connection pool size, default `8`
//! - `TASKTRACK_SEED_PATH`: JSON seed for the in-memory store
//! - `TASKTRACK_PARENT_TOLERANCE`: recommendation tolerance band, default `2`
//!
//! Log filtering is controlled separately through `RUST_LOG`.

use crate::recommendation::domain::{DEFAULT_PARENT_TOLERANCE, RecommendationPolicy};
use camino::Utf8PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable naming the bind host.
pub const HOST_VAR: &str = "TASKTRACK_HOST";
/// Environment variable naming the bind port.
pub const PORT_VAR: &str = "TASKTRACK_PORT";
/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Environment variable holding the connection pool size.
pub const POOL_SIZE_VAR: &str = "TASKTRACK_DB_POOL_SIZE";
/// Environment variable naming the in-memory seed document.
pub const SEED_PATH_VAR: &str = "TASKTRACK_SEED_PATH";
/// Environment variable holding the recommendation tolerance band.
pub const PARENT_TOLERANCE_VAR: &str = "TASKTRACK_PARENT_TOLERANCE";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_POOL_SIZE: u32 = 8;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be used.
    #[error("invalid value for {name}: {reason}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Where tracker records are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Process-local store, optionally seeded from a JSON document.
    InMemory {
        /// Seed document to load at start-up.
        seed_path: Option<Utf8PathBuf>,
    },
    /// `PostgreSQL` store behind an r2d2 pool.
    Postgres {
        /// Connection URL.
        database_url: String,
        /// Maximum pool size.
        pool_size: u32,
    },
}

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Storage backend.
    pub storage: StorageConfig,
    /// Recommendation policy.
    pub policy: RecommendationPolicy,
}

impl ServiceConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let host = read(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = parse_or(read(PORT_VAR), PORT_VAR, DEFAULT_PORT)?;
        let parent_tolerance = parse_or(
            read(PARENT_TOLERANCE_VAR),
            PARENT_TOLERANCE_VAR,
            DEFAULT_PARENT_TOLERANCE,
        )?;

        let storage = match read(DATABASE_URL_VAR) {
            Some(database_url) => {
                let pool_size = parse_or(read(POOL_SIZE_VAR), POOL_SIZE_VAR, DEFAULT_POOL_SIZE)?;
                if pool_size == 0 {
                    return Err(ConfigError::InvalidValue {
                        name: POOL_SIZE_VAR,
                        reason: "pool size must be positive".to_owned(),
                    });
                }
                StorageConfig::Postgres {
                    database_url,
                    pool_size,
                }
            }
            None => StorageConfig::InMemory {
                seed_path: read(SEED_PATH_VAR).map(Utf8PathBuf::from),
            },
        };

        Ok(Self {
            host,
            port,
            storage,
            policy: RecommendationPolicy::new(parent_tolerance),
        })
    }

    /// Returns the `host:port` socket address string.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value.parse().map_err(|err: T::Err| ConfigError::InvalidValue {
            name,
            reason: format!("{value:?}: {err}"),
        })
    })
}
