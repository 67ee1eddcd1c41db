//! Query execution per entity plus request-body validation.

mod emissions;
mod impact;
mod validation;
pub use emissions::EmissionService;
pub use impact::{ImpactService, INVESTOR_OWNED_COMPANY, TOP_COMPANIES_LIMIT};
pub use validation::RequestValidator;

use crate::error::AppError;
use crate::sql::QueryBuf;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection};

async fn fetch_all<T>(conn: &mut PgConnection, q: &QueryBuf) -> Result<Vec<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<_, T>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    Ok(query.fetch_all(&mut *conn).await?)
}

async fn fetch_optional<T>(conn: &mut PgConnection, q: &QueryBuf) -> Result<Option<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<_, T>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    Ok(query.fetch_optional(&mut *conn).await?)
}
