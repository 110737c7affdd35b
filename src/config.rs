// src/config.rs
//
// Store configuration
//
// Read once at start-up from the environment. Tests build configs
// directly or through `from_lookup` with an explicit variable source.

use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const ENV_DB_PATH: &str = "DATAMESH_DB_PATH";
pub const ENV_POOL_SIZE: &str = "DATAMESH_POOL_SIZE";
pub const ENV_BUSY_TIMEOUT_MS: &str = "DATAMESH_BUSY_TIMEOUT_MS";

const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

/// Where the catalog lives and how connections to it are pooled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_path: PathBuf,
    pub pool_max_size: u32,
    pub busy_timeout_ms: u32,
}

impl StoreConfig {
    /// Config for a specific database file with default pool settings
    pub fn with_path(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            pool_max_size: DEFAULT_POOL_SIZE,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any variable source.
    ///
    /// Missing variables fall back to defaults; present but unparsable
    /// values are rejected instead of silently ignored.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup(ENV_DB_PATH).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path.trim()),
            None => default_database_path()?,
        };

        let pool_max_size = parse_u32(&lookup, ENV_POOL_SIZE, DEFAULT_POOL_SIZE)?;
        if pool_max_size == 0 {
            return Err(AppError::Config(format!("{} must be at least 1", ENV_POOL_SIZE)));
        }

        let busy_timeout_ms = parse_u32(&lookup, ENV_BUSY_TIMEOUT_MS, DEFAULT_BUSY_TIMEOUT_MS)?;

        Ok(Self {
            database_path,
            pool_max_size,
            busy_timeout_ms,
        })
    }
}

/// Default database location: {DATA_DIR}/datamesh/datamesh.db
pub fn default_database_path() -> AppResult<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Config("Could not determine data directory".to_string()))?;

    Ok(data_dir.join("datamesh").join("datamesh.db"))
}

fn parse_u32<F>(lookup: &F, key: &str, default: u32) -> AppResult<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|e| AppError::Config(format!("{}={:?} is not a valid number: {}", key, raw, e))),
    }
}
