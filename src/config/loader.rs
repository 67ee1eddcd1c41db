//! Load settings from process environment (after `.env`, when the binary loads one).

use crate::config::types::*;
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Missing keys take defaults; present but unparseable keys fail.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let db = DbConfig {
            url: lookup("DATABASE_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.db.url),
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS")?
                .unwrap_or(defaults.db.max_connections),
            acquire_timeout: parse_var::<u64, _>(&lookup, "DB_ACQUIRE_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.db.acquire_timeout),
            create_database: parse_flag(&lookup, "ECOIMPACT_CREATE_DATABASE")?
                .unwrap_or(defaults.db.create_database),
            create_tables: parse_flag(&lookup, "ECOIMPACT_CREATE_TABLES")?
                .unwrap_or(defaults.db.create_tables),
        };
        let server = ServerConfig {
            bind_addr: parse_var(&lookup, "BIND_ADDR")?.unwrap_or(defaults.server.bind_addr),
            body_limit_bytes: parse_var(&lookup, "BODY_LIMIT_BYTES")?
                .unwrap_or(defaults.server.body_limit_bytes),
        };
        Ok(AppConfig { db, server })
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

fn parse_flag<F>(lookup: &F, var: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::Invalid { var, value: raw }),
        },
    }
}
