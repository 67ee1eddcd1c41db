//! Emission record handlers under `/air_super`.

use crate::error::{AppError, ErrorBody};
use crate::schema::EmissionRecord;
use crate::service::{EmissionService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

#[utoipa::path(
    post,
    path = "/air_super/",
    tag = "emissions",
    request_body = EmissionRecord,
    responses(
        (status = 201, description = "Inserted row", body = EmissionRecord),
        (status = 400, description = "Body is not a JSON object", body = ErrorBody),
        (status = 409, description = "Record for this country and year already exists", body = ErrorBody),
        (status = 422, description = "Missing or mistyped fields", body = ErrorBody)
    )
)]
pub async fn create_emission(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let record = RequestValidator::emission_record(body)?;
    let mut session = state.db.acquire().await?;
    let row = EmissionService::create(&mut session, &record).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    get,
    path = "/air_super/",
    tag = "emissions",
    responses((status = 200, description = "Every emission record", body = [EmissionRecord]))
)]
pub async fn list_emissions(State(state): State<AppState>) -> Result<Json<Vec<EmissionRecord>>, AppError> {
    let mut session = state.db.acquire().await?;
    Ok(Json(EmissionService::list(&mut session).await?))
}

#[utoipa::path(
    get,
    path = "/air_super/{code}",
    tag = "emissions",
    params(("code" = String, Path, description = "Country code, exact match")),
    responses(
        (status = 200, description = "Records for the country, one per year", body = [EmissionRecord]),
        (status = 404, description = "No record has this code", body = ErrorBody)
    )
)]
pub async fn emissions_by_country_code(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
) -> Result<Json<Vec<EmissionRecord>>, AppError> {
    let mut session = state.db.acquire().await?;
    let rows = EmissionService::by_country_code(&mut session, &country_code).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("Country code not found".into()));
    }
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/air_super/year/{year}",
    tag = "emissions",
    params(("year" = i32, Path, description = "Calendar year")),
    responses(
        (status = 200, description = "Records for the year", body = [EmissionRecord]),
        (status = 404, description = "No record for the year", body = ErrorBody),
        (status = 422, description = "Year is not an integer", body = ErrorBody)
    )
)]
pub async fn emissions_by_year(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<Json<Vec<EmissionRecord>>, AppError> {
    let year = RequestValidator::path_int("year", &year)?;
    let mut session = state.db.acquire().await?;
    let rows = EmissionService::by_year(&mut session, year).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("No records found for the given year".into()));
    }
    Ok(Json(rows))
}

/// Returns every record for the numeric code; the route name promises five years but no window is applied.
#[utoipa::path(
    get,
    path = "/air_super/{code}/past_five_years",
    tag = "emissions",
    params(("code" = i32, Path, description = "Numeric country code")),
    responses(
        (status = 200, description = "All records for the numeric code, possibly empty", body = [EmissionRecord]),
        (status = 422, description = "Code is not an integer", body = ErrorBody)
    )
)]
pub async fn emissions_by_number_code(
    State(state): State<AppState>,
    Path(number_code): Path<String>,
) -> Result<Json<Vec<EmissionRecord>>, AppError> {
    let number_code = RequestValidator::path_int("number_code", &number_code)?;
    let mut session = state.db.acquire().await?;
    Ok(Json(EmissionService::by_number_code(&mut session, number_code).await?))
}
