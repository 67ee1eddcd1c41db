//! Router assembly: API and common routes, OpenAPI document, fallback, and HTTP layers.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::error::AppError;
use crate::openapi::openapi_json;
use crate::state::AppState;
use axum::{http::Uri, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Full application router. CORS is permissive: any origin, method and header.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(api_routes(state.clone()))
        .merge(common_routes(state))
        .route("/openapi.json", get(openapi_json))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit_bytes))
                .layer(CorsLayer::permissive()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;
    use crate::db::Database;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    /// Router over a pool that can never connect: any handler that reaches the store gets 503.
    fn unreachable_app() -> Router {
        let config = DbConfig {
            url: "postgres://nobody@127.0.0.1:1/ecoimpact".into(),
            max_connections: 1,
            acquire_timeout: Duration::from_millis(300),
            create_database: false,
            create_tables: false,
        };
        let db = Database::connect_lazy(&config).unwrap();
        app(AppState::new(db), 1024 * 1024)
    }

    async fn send(req: Request<Body>) -> (StatusCode, Value) {
        let response = unreachable_app().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn root_returns_welcome() {
        let (status, body) = send(get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Welcome to the EcoImpact API" }));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (status, body) = send(get("/no/such/route")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn health_does_not_touch_the_store() {
        let (status, body) = send(get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn ready_reports_unavailable_store() {
        let (status, body) = send(get("/ready")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["database"], "unavailable");
    }

    #[tokio::test]
    async fn invalid_body_is_rejected_before_acquire() {
        let (status, body) = send(post_json("/air_super/", json!({ "country": "Testland", "Year": "soon" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["details"]["Year"], "must be an integer");
        assert_eq!(body["error"]["details"]["total"], "field required");
    }

    #[tokio::test]
    async fn non_json_body_is_bad_request() {
        let req = Request::post("/air_super/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn integer_path_params_are_validated() {
        let (status, _) = send(get("/air_super/year/last")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let (status, body) = send(get("/air_super/US/past_five_years")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn store_failures_surface_as_connection_errors() {
        for uri in [
            "/air_super/",
            "/air_super/TL",
            "/air_super/year/2020",
            "/air_super/840/past_five_years",
            "/companies/",
            "/ocean-projections",
            "/country-impact/us",
            "/countries",
        ] {
            let (status, body) = send(get(uri)).await;
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
            assert_eq!(body["error"]["code"], "connection_error", "{uri}");
        }
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let req = Request::get("/")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = unreachable_app().oneshot(req).await.unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn oversized_body_is_rejected_with_cors_in_place() {
        let body = vec![b' '; 2 * 1024 * 1024];
        let req = Request::post("/air_super/")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .unwrap();
        let response = unreachable_app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = send(get("/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/air_super/{code}"].is_object());
    }
}
