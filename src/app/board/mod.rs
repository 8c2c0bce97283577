use axum::routing::{get, post, put};
use axum::Router;

use super::AppState;

pub mod route;
pub mod schema;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/board", get(route::list))
        .route("/board/:id", get(route::detail))
        .route("/api/board", post(route::save))
        .route("/api/board/:id", put(route::update).delete(route::delete))
}
