//! Configuration for the server binary.
//!
//! All configuration is loaded from environment variables, after any
//! `.env` files have been applied. Every variable is optional; a variable
//! that is set but cannot be parsed is a [`ConfigError`].

use std::time::Duration;

use crm_api::ServerConfig;
use crm_db::{DEFAULT_MONGO_URI, DecodePolicy, MongoConfig};

use crate::error::ConfigError;

/// Default `MongoDB` timeout in milliseconds.
const DEFAULT_MONGO_TIMEOUT_MS: u64 = 5000;

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP bind address.
    pub http: ServerConfig,
    /// Store connection.
    pub mongo: MongoConfig,
    /// Handling of documents that do not fit their record type.
    pub decode_policy: DecodePolicy,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Variables:
    /// - `MONGO_URI` -- connection string (default `mongodb://localhost:27017/hubspot_data`)
    /// - `MONGO_DB_NAME` -- database, overriding the one in the URI
    /// - `MONGO_TIMEOUT_MS` -- server selection, connect and query timeout (default 5000)
    /// - `HOST` -- bind host (default `0.0.0.0`)
    /// - `PORT` -- bind port (default 3000)
    /// - `DECODE_POLICY` -- `strict` or `skip` (default `skip`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through `var`, which returns the value of an
    /// environment variable if it is set.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();
        let host = var("HOST").unwrap_or(defaults.host);
        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::new("PORT", e.to_string()))?,
            None => defaults.port,
        };

        let uri = var("MONGO_URI").unwrap_or_else(|| DEFAULT_MONGO_URI.to_owned());
        let timeout_ms = match var("MONGO_TIMEOUT_MS") {
            Some(raw) => parse_timeout_ms(&raw)?,
            None => DEFAULT_MONGO_TIMEOUT_MS,
        };
        let mut mongo = MongoConfig::new(&uri).with_timeout(Duration::from_millis(timeout_ms));
        if let Some(database) = var("MONGO_DB_NAME").filter(|d| !d.trim().is_empty()) {
            mongo = mongo.with_database(database.trim());
        }

        let decode_policy = match var("DECODE_POLICY") {
            Some(raw) => raw
                .parse::<DecodePolicy>()
                .map_err(|e| ConfigError::new("DECODE_POLICY", e.to_string()))?,
            None => DecodePolicy::default(),
        };

        Ok(Self {
            http: ServerConfig { host, port },
            mongo,
            decode_policy,
        })
    }
}

fn parse_timeout_ms(raw: &str) -> Result<u64, ConfigError> {
    let ms = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::new("MONGO_TIMEOUT_MS", e.to_string()))?;
    if ms == 0 {
        return Err(ConfigError::new("MONGO_TIMEOUT_MS", "must be greater than zero"));
    }
    Ok(ms)
}
