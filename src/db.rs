//! Connection provider: one pool per process, one scoped session per request.

use crate::config::DbConfig;
use crate::error::{AppError, ConfigError};
use crate::sql::{create_table, ALL_TABLES};
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgConnection, PgPool, Postgres};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// Process-wide handle to the store. Cheap to clone; clones share the pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
}

/// A pooled connection checked out for one request. Returned to the pool on drop,
/// so every exit path of a handler (including `?` and panics) releases it.
pub struct Session {
    conn: PoolConnection<Postgres>,
}

impl Deref for Session {
    type Target = PgConnection;

    fn deref(&self) -> &PgConnection {
        &self.conn
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}

fn pool_options(config: &DbConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
}

fn connect_options(url: &str) -> Result<PgConnectOptions, AppError> {
    PgConnectOptions::from_str(url).map_err(|e| AppError::Config(ConfigError::DatabaseUrl(e.to_string())))
}

impl Database {
    /// Build the pool and open at least one connection.
    pub async fn connect(config: &DbConfig) -> Result<Self, AppError> {
        let pool = pool_options(config)
            .connect_with(connect_options(&config.url)?)
            .await
            .map_err(AppError::Connection)?;
        tracing::info!(max_connections = config.max_connections, "database pool ready");
        Ok(Database { pool })
    }

    /// Build the pool without dialing. Connection failures surface on the first `acquire`.
    pub fn connect_lazy(config: &DbConfig) -> Result<Self, AppError> {
        let pool = pool_options(config).connect_lazy_with(connect_options(&config.url)?);
        Ok(Database { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Database { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check out a session. Pool, transport and timeout failures are `AppError::Connection`.
    pub async fn acquire(&self) -> Result<Session, AppError> {
        let conn = self.pool.acquire().await.map_err(AppError::Connection)?;
        Ok(Session { conn })
    }

    /// `SELECT 1` through a fresh session.
    pub async fn ping(&self) -> Result<(), AppError> {
        let mut session = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *session).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// CREATE TABLE IF NOT EXISTS for every table. Idempotent; never alters existing tables.
pub async fn ensure_tables(db: &Database) -> Result<(), AppError> {
    let mut session = db.acquire().await?;
    for table in ALL_TABLES {
        let ddl = create_table(table);
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(&mut *session).await?;
    }
    tracing::info!(tables = ALL_TABLES.len(), "tables ensured");
    Ok(())
}

/// Create the database named in `database_url` if missing, via the `postgres` maintenance database.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let mut conn: PgConnection = connect_options(&admin_url)?
        .connect()
        .await
        .map_err(AppError::Connection)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", crate::sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a URL into (maintenance-db URL, target db name). Query string stays on the maintenance URL.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| AppError::Config(ConfigError::DatabaseUrl("no database path".into())))?;
    let path_and_query = &url[path_start..];
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, q)) => (name.trim(), format!("?{}", q)),
        None => (path_and_query.trim(), String::new()),
    };
    let admin_url = format!("{}postgres{}", &url[..path_start], query);
    Ok((admin_url, db_name.to_string()))
}
