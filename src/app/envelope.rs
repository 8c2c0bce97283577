use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Label carried by every successful response.
pub const SUCCESS_MSG: &str = "성공";

/// The `{status, msg, body}` wrapper every endpoint answers with.
///
/// `body` is serialized as `null` rather than skipped when there is nothing to return.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Resp<T> {
    pub status: u16,
    pub msg: String,
    pub body: Option<T>,
}

impl<T> Resp<T> {
    pub fn ok(body: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            msg: SUCCESS_MSG.to_owned(),
            body: Some(body),
        }
    }

    pub fn fail(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            msg: msg.into(),
            body: None,
        }
    }
}

impl Resp<()> {
    /// A success with no payload.
    pub fn empty() -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            msg: SUCCESS_MSG.to_owned(),
            body: None,
        }
    }
}

impl<T: serde::Serialize> IntoResponse for Resp<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
