//! Runtime settings for the API server and its database pool.

use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost:5432/ecoimpact";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    /// Upper bound on waiting for a pooled connection.
    pub acquire_timeout: Duration,
    /// Create the target database through the `postgres` maintenance db when missing.
    pub create_database: bool,
    /// Issue CREATE TABLE IF NOT EXISTS for every table at startup.
    pub create_tables: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            create_database: false,
            create_tables: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub db: DbConfig,
    pub server: ServerConfig,
}
