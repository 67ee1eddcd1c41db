//! EcoImpact API: environmental-impact datasets over HTTP, backed by PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;

pub use config::{AppConfig, DbConfig, ServerConfig};
pub use db::{ensure_database_exists, ensure_tables, Database, Session};
pub use error::{AppError, ConfigError};
pub use routes::{api_routes, app, common_routes};
pub use state::AppState;
