//! EmissionRecord reads and inserts against `air_super`.

use crate::error::AppError;
use crate::schema::EmissionRecord;
use crate::service::{fetch_all, fetch_optional};
use crate::sql::{insert_returning, select_all, select_where_eq, SqlParam, AIR_SUPER};
use sqlx::PgConnection;

pub struct EmissionService;

impl EmissionService {
    /// Insert one record and return the stored row. A duplicate (country_code, year) surfaces as `AppError::Conflict`.
    pub async fn create(conn: &mut PgConnection, record: &EmissionRecord) -> Result<EmissionRecord, AppError> {
        let q = insert_returning(
            &AIR_SUPER,
            vec![
                ("country", record.country.as_str().into()),
                ("country_code", record.country_code.as_str().into()),
                ("year", record.year.into()),
                ("total", record.total.into()),
                ("coal", record.coal.into()),
                ("oil", record.oil.into()),
                ("gas", record.gas.into()),
                ("cement", record.cement.into()),
                ("flaring", record.flaring.into()),
                ("other", record.other.into()),
                ("per_capita", record.per_capita.into()),
                ("number_code", record.number_code.into()),
            ],
        );
        fetch_optional(conn, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    pub async fn list(conn: &mut PgConnection) -> Result<Vec<EmissionRecord>, AppError> {
        fetch_all(conn, &select_all(&AIR_SUPER)).await
    }

    /// Exact match; several years per code is normal.
    pub async fn by_country_code(conn: &mut PgConnection, country_code: &str) -> Result<Vec<EmissionRecord>, AppError> {
        let q = select_where_eq(&AIR_SUPER, &[], "country_code", country_code.into(), None);
        fetch_all(conn, &q).await
    }

    pub async fn by_year(conn: &mut PgConnection, year: i32) -> Result<Vec<EmissionRecord>, AppError> {
        let q = select_where_eq(&AIR_SUPER, &[], "year", SqlParam::Int(year), None);
        fetch_all(conn, &q).await
    }

    /// Every row for the numeric country code. No year window is applied.
    pub async fn by_number_code(conn: &mut PgConnection, number_code: i32) -> Result<Vec<EmissionRecord>, AppError> {
        let q = select_where_eq(&AIR_SUPER, &[], "number_code", SqlParam::Int(number_code), None);
        let rows: Vec<EmissionRecord> = fetch_all(conn, &q).await?;
        tracing::debug!(number_code, count = rows.len(), "records for number code");
        Ok(rows)
    }
}
