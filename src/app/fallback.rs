use axum::http::header::ALLOW;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use super::envelope::Resp;
use super::error::AppError;

/// Answers any path no route matches.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}.", uri.path()))
}

/// Rewrites axum's bodiless 405 into the envelope, keeping the `Allow` header.
pub async fn method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    tracing::error!(status = 405, "method not allowed");
    let allow = response.headers().get(ALLOW).cloned();
    let mut enveloped =
        Resp::<()>::fail(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed.").into_response();
    if let Some(allow) = allow {
        enveloped.headers_mut().insert(ALLOW, allow);
    }
    enveloped
}
