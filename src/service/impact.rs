//! Read-only views: company emission rates, ocean projections, per-country waste.

use crate::error::AppError;
use crate::schema::{
    CompanyEmissionRate, CompanyMaxEmission, CountryImpact, CountryRow, CountrySummary, PlasticProjection,
};
use crate::service::{fetch_all, fetch_optional};
use crate::sql::{select_ordered, select_where_eq, top_groups_by_max, COMPANIES, PLASTIC_PROJECTIONS, WATER_SUPER};
use sqlx::PgConnection;

pub const INVESTOR_OWNED_COMPANY: &str = "Investor-owned Company";
pub const TOP_COMPANIES_LIMIT: u32 = 5;

pub struct ImpactService;

impl ImpactService {
    /// Investor-owned parents ranked by their largest total, top five, with derived rates.
    pub async fn top_companies(conn: &mut PgConnection) -> Result<Vec<CompanyEmissionRate>, AppError> {
        let q = top_groups_by_max(
            &COMPANIES,
            "parent_entity",
            "total_emissions",
            "parent_type",
            INVESTOR_OWNED_COMPANY.into(),
            TOP_COMPANIES_LIMIT,
        );
        let rows: Vec<CompanyMaxEmission> = fetch_all(conn, &q).await?;
        Ok(rows.into_iter().map(CompanyEmissionRate::from).collect())
    }

    pub async fn ocean_projections(conn: &mut PgConnection) -> Result<Vec<PlasticProjection>, AppError> {
        let q = select_ordered(&PLASTIC_PROJECTIONS, &["year", "coverage", "impact"], "year", false);
        fetch_all(conn, &q).await
    }

    /// First waste row for the code, matched case-insensitively by uppercasing the input.
    pub async fn country_impact(conn: &mut PgConnection, country_code: &str) -> Result<Option<CountryImpact>, AppError> {
        let q = select_where_eq(
            &WATER_SUPER,
            &["country", "per_capita_waste_kg", "recycling_rate", "coastal_waste_risk"],
            "country_code",
            country_code.to_uppercase().into(),
            Some(1),
        );
        fetch_optional(conn, &q).await
    }

    pub async fn countries(conn: &mut PgConnection) -> Result<Vec<CountrySummary>, AppError> {
        let q = select_ordered(&WATER_SUPER, &["country", "country_code"], "country", true);
        let rows: Vec<CountryRow> = fetch_all(conn, &q).await?;
        Ok(rows.into_iter().map(CountrySummary::from).collect())
    }
}
