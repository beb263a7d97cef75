use std::env;

use thiserror::Error;

use crate::projection::{BatchConfig, BatchOverflow, MAX_BATCH_SIZE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub batch: BatchConfig,
}

impl AppConfig {
    /// Reads `DATABASE_URL`, `HOST`, `PORT`, `BATCH_FETCH_SIZE` and
    /// `BATCH_OVERFLOW` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => 8080,
        };

        let defaults = BatchConfig::default();
        let size = match lookup("BATCH_FETCH_SIZE") {
            Some(raw) => parse_batch_size(&raw)?,
            None => defaults.size,
        };
        let overflow = match lookup("BATCH_OVERFLOW").as_deref() {
            None | Some("split") => BatchOverflow::Split,
            Some("reject") => BatchOverflow::Reject,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "BATCH_OVERFLOW",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            database_url,
            host,
            port,
            batch: BatchConfig { size, overflow },
        })
    }
}

fn parse_batch_size(raw: &str) -> Result<usize, ConfigError> {
    let invalid = || ConfigError::Invalid {
        name: "BATCH_FETCH_SIZE",
        value: raw.to_string(),
    };
    let size: usize = raw.trim().parse().map_err(|_| invalid())?;
    if size == 0 {
        return Err(invalid());
    }
    if size > MAX_BATCH_SIZE {
        log::warn!("BATCH_FETCH_SIZE {size} exceeds {MAX_BATCH_SIZE}, clamping to {MAX_BATCH_SIZE}");
        return Ok(MAX_BATCH_SIZE);
    }
    Ok(size)
}
