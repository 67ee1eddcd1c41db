//! Typed bind values so one query buffer can carry mixed parameters.

use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::Database;

/// A value bound to a PostgreSQL placeholder. Never rendered into SQL text.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    Int(i32),
    Float(f64),
    Text(String),
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(v)
    }
}

impl From<f64> for SqlParam {
    fn from(v: f64) -> Self {
        SqlParam::Float(v)
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl<'q> Encode<'q, Postgres> for SqlParam {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            SqlParam::Int(n) => <i32 as Encode<Postgres>>::encode_by_ref(n, buf),
            SqlParam::Float(n) => <f64 as Encode<Postgres>>::encode_by_ref(n, buf),
            SqlParam::Text(s) => <String as Encode<Postgres>>::encode_by_ref(s, buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            SqlParam::Int(_) => <i32 as sqlx::Type<Postgres>>::type_info(),
            SqlParam::Float(_) => <f64 as sqlx::Type<Postgres>>::type_info(),
            SqlParam::Text(_) => <String as sqlx::Type<Postgres>>::type_info(),
        })
    }
}

impl sqlx::Type<Postgres> for SqlParam {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <i32 as sqlx::Type<Postgres>>::compatible(ty)
            || <f64 as sqlx::Type<Postgres>>::compatible(ty)
            || <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}
