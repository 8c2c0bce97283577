use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::typed_header::TypedHeaderRejectionReason;
use axum_extra::TypedHeader;

use crate::app::error::AppError;
use crate::app::token::SessionUser;
use crate::app::AppState;

#[async_trait]
impl FromRequestParts<AppState> for SessionUser
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the value of the `Authorization` header, if it was sent at all.
        let auth_header: TypedHeader<Authorization<Bearer>> =
            TypedHeader::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if matches!(rejection.reason(), TypedHeaderRejectionReason::Missing) {
                        AppError::Unauthorized("Missing Authorization header.".to_owned())
                    } else {
                        AppError::Unauthorized(
                            "Authorization header must use the Bearer scheme.".to_owned(),
                        )
                    }
                })?;

        Self::from_jwt(&state.hmac_key, auth_header.token()).map_err(|e| {
            tracing::debug!(details = ?e, "rejected bearer token");
            AppError::Unauthorized("Invalid Authorization header.".to_owned())
        })
    }
}
