use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health_check", get(health_check))
}

/// Liveness probe. Answers with an empty body, not the envelope.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
