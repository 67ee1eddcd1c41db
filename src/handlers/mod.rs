//! HTTP handlers, one per route. Each validates its input, then checks out a session.

pub mod emissions;
pub mod impact;

use crate::schema::{WelcomeMessage, WELCOME};
use axum::Json;

#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses((status = 200, description = "Static welcome payload", body = WelcomeMessage))
)]
pub async fn root() -> Json<WelcomeMessage> {
    Json(WelcomeMessage {
        message: WELCOME.to_string(),
    })
}
