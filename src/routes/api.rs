//! EcoImpact API routes.
//! `/air_super/:code` and `/air_super/:code/past_five_years` share one parameter name; the router requires it.

use crate::handlers::{
    emissions::{create_emission, emissions_by_country_code, emissions_by_number_code, emissions_by_year, list_emissions},
    impact::{countries, country_impact, ocean_projections, top_companies},
    root,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/air_super", get(list_emissions).post(create_emission))
        .route("/air_super/", get(list_emissions).post(create_emission))
        .route("/air_super/year/:year", get(emissions_by_year))
        .route("/air_super/:code", get(emissions_by_country_code))
        .route("/air_super/:code/past_five_years", get(emissions_by_number_code))
        .route("/companies", get(top_companies))
        .route("/companies/", get(top_companies))
        .route("/ocean-projections", get(ocean_projections))
        .route("/country-impact/:country_code", get(country_impact))
        .route("/countries", get(countries))
        .with_state(state)
}
