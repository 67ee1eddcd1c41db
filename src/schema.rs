//! Typed record shapes for the EcoImpact tables and the response bodies built from them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One country-year row of greenhouse-gas emissions by source.
///
/// The year travels as `"Year"` on the wire and lives in the `year` column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct EmissionRecord {
    pub country: String,
    pub country_code: String,
    #[serde(rename = "Year")]
    pub year: i32,
    pub total: f64,
    pub coal: f64,
    pub oil: f64,
    pub gas: f64,
    pub cement: f64,
    pub flaring: f64,
    pub other: f64,
    pub per_capita: f64,
    pub number_code: i32,
}

/// Aggregated row from `companies`: one parent entity and its largest reported total.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct CompanyMaxEmission {
    pub parent_entity: String,
    pub max_value: Option<f64>,
}

/// Stored company totals are in millions of emission units.
pub const EMISSION_UNIT_SCALE: f64 = 1_000_000.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;
pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const DAYS_PER_YEAR: f64 = 365.0;
pub const HOURS_PER_YEAR: f64 = 365.0 * 24.0;

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct CompanyEmissionRate {
    pub name: String,
    pub yearly_emissions: f64,
    pub monthly_emissions: f64,
    pub weekly_emissions: f64,
    pub daily_emissions: f64,
    pub hourly_emissions: f64,
}

impl CompanyEmissionRate {
    /// Expand a raw value (millions) into fixed-divisor rates. Not calendar-aware.
    pub fn from_millions(name: String, raw: f64) -> Self {
        let yearly = raw * EMISSION_UNIT_SCALE;
        CompanyEmissionRate {
            name,
            yearly_emissions: yearly,
            monthly_emissions: yearly / MONTHS_PER_YEAR,
            weekly_emissions: yearly / WEEKS_PER_YEAR,
            daily_emissions: yearly / DAYS_PER_YEAR,
            hourly_emissions: yearly / HOURS_PER_YEAR,
        }
    }
}

impl From<CompanyMaxEmission> for CompanyEmissionRate {
    fn from(row: CompanyMaxEmission) -> Self {
        CompanyEmissionRate::from_millions(row.parent_entity, row.max_value.unwrap_or(0.0))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PlasticProjection {
    pub year: i32,
    pub coverage: f64,
    pub impact: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct CountryImpact {
    pub country: String,
    pub per_capita_waste_kg: f64,
    pub recycling_rate: f64,
    pub coastal_waste_risk: String,
}

pub const COUNTRY_NOT_FOUND: &str = "Country not found";

/// Country-impact lookups answer 200 either way; a miss carries an inline error.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CountryImpactResponse {
    Found(CountryImpact),
    Missing { error: String },
}

impl From<Option<CountryImpact>> for CountryImpactResponse {
    fn from(row: Option<CountryImpact>) -> Self {
        match row {
            Some(impact) => CountryImpactResponse::Found(impact),
            None => CountryImpactResponse::Missing {
                error: COUNTRY_NOT_FOUND.to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct CountrySummary {
    pub name: String,
    pub code: String,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct CountryRow {
    pub country: String,
    pub country_code: String,
}

impl From<CountryRow> for CountrySummary {
    fn from(row: CountryRow) -> Self {
        CountrySummary {
            name: row.country,
            code: row.country_code,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct WelcomeMessage {
    pub message: String,
}

pub const WELCOME: &str = "Welcome to the EcoImpact API";
