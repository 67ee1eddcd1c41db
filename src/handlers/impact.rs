//! Company, ocean and country-waste handlers. All read-only.

use crate::error::AppError;
use crate::schema::{CompanyEmissionRate, CountryImpactResponse, CountrySummary, PlasticProjection};
use crate::service::ImpactService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    get,
    path = "/companies/",
    tag = "impact",
    responses((status = 200, description = "Top five investor-owned emitters with derived rates", body = [CompanyEmissionRate]))
)]
pub async fn top_companies(State(state): State<AppState>) -> Result<Json<Vec<CompanyEmissionRate>>, AppError> {
    let mut session = state.db.acquire().await?;
    Ok(Json(ImpactService::top_companies(&mut session).await?))
}

#[utoipa::path(
    get,
    path = "/ocean-projections",
    tag = "impact",
    responses((status = 200, description = "Plastic projections ordered by year", body = [PlasticProjection]))
)]
pub async fn ocean_projections(State(state): State<AppState>) -> Result<Json<Vec<PlasticProjection>>, AppError> {
    let mut session = state.db.acquire().await?;
    Ok(Json(ImpactService::ocean_projections(&mut session).await?))
}

/// A miss is still 200, with `{"error": "Country not found"}` as the body.
#[utoipa::path(
    get,
    path = "/country-impact/{country_code}",
    tag = "impact",
    params(("country_code" = String, Path, description = "Country code, case-insensitive")),
    responses((status = 200, description = "Waste statistics, or an inline error when the country is unknown", body = CountryImpactResponse))
)]
pub async fn country_impact(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
) -> Result<Json<CountryImpactResponse>, AppError> {
    let mut session = state.db.acquire().await?;
    let row = ImpactService::country_impact(&mut session, &country_code).await?;
    Ok(Json(row.into()))
}

#[utoipa::path(
    get,
    path = "/countries",
    tag = "impact",
    responses((status = 200, description = "Distinct countries ordered by name", body = [CountrySummary]))
)]
pub async fn countries(State(state): State<AppState>) -> Result<Json<Vec<CountrySummary>>, AppError> {
    let mut session = state.db.acquire().await?;
    Ok(Json(ImpactService::countries(&mut session).await?))
}
