//! OpenAPI document for the public API, served at `/openapi.json`.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers;
use crate::schema::{
    CompanyEmissionRate, CountryImpact, CountryImpactResponse, CountrySummary, EmissionRecord, PlasticProjection,
    WelcomeMessage,
};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "EcoImpact API", description = "Emissions, ocean plastic and waste datasets"),
    paths(
        handlers::root,
        handlers::emissions::create_emission,
        handlers::emissions::list_emissions,
        handlers::emissions::emissions_by_country_code,
        handlers::emissions::emissions_by_year,
        handlers::emissions::emissions_by_number_code,
        handlers::impact::top_companies,
        handlers::impact::ocean_projections,
        handlers::impact::country_impact,
        handlers::impact::countries,
    ),
    components(schemas(
        EmissionRecord,
        CompanyEmissionRate,
        PlasticProjection,
        CountryImpact,
        CountryImpactResponse,
        CountrySummary,
        WelcomeMessage,
        ErrorBody,
        ErrorDetail,
    )),
    tags(
        (name = "emissions", description = "Per-country greenhouse-gas emissions"),
        (name = "impact", description = "Company emissions, ocean plastic and waste"),
        (name = "meta", description = "Service information")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/air_super/",
            "/air_super/{code}",
            "/air_super/year/{year}",
            "/air_super/{code}/past_five_years",
            "/companies/",
            "/ocean-projections",
            "/country-impact/{country_code}",
            "/countries",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
