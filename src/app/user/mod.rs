use axum::routing::post;
use axum::Router;

use super::AppState;

pub mod route;
pub mod schema;
pub mod utils;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/join", post(route::join))
        .route("/login", post(route::login))
}
