use anyhow::Context;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use secrecy::{ExposeSecret, Secret};

use super::schema::{JoinRequestBody, JoinResponseBody, LoginRequestBody};
use super::utils::{compute_password_hash, validate_credentials, AuthError, Credentials};
use crate::app::envelope::Resp;
use crate::app::error::{AppError, AppResult};
use crate::app::extractor::Payload;
use crate::app::AppState;
use crate::domain::user::NewUser;
use crate::telemetry::spawn_blocking_with_tracing;

#[tracing::instrument(name = "Join", skip(state, body), fields(username = %body.username))]
pub async fn join(
    State(state): State<AppState>,
    Payload(body): Payload<JoinRequestBody>,
) -> AppResult<Resp<JoinResponseBody>> {
    let new_user = NewUser::try_from(body).map_err(AppError::BadRequest)?;

    let password = new_user.password.into_secret();
    let password_hash = spawn_blocking_with_tracing(move || compute_password_hash(password))
        .await
        .context("Could not compute password hash.")??;

    let result = sqlx::query(
        r#"insert into user_tb (username, password, email, created_at) values (?, ?, ?, ?)"#,
    )
    .bind(new_user.username.as_ref())
    .bind(password_hash.expose_secret())
    .bind(new_user.email.as_ref())
    .bind(chrono::Utc::now())
    .execute(&state.db)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::BadRequest("A user with this username already exists.".to_owned())
        }
        e => AppError::Unexpected(anyhow::Error::new(e).context("Failed to insert the new user.")),
    })?;

    Ok(Resp::ok(JoinResponseBody {
        id: result.last_insert_rowid(),
        username: new_user.username.to_string(),
        email: new_user.email.to_string(),
        profile: None,
    }))
}

#[tracing::instrument(skip(state, body), fields(username=tracing::field::Empty, user_id=tracing::field::Empty))]
pub async fn login(
    State(state): State<AppState>,
    Payload(body): Payload<LoginRequestBody>,
) -> AppResult<impl IntoResponse> {
    let credentials = Credentials {
        username: body.username,
        password: Secret::new(body.password),
    };
    tracing::Span::current().record("username", &tracing::field::display(&credentials.username));

    let session_user = validate_credentials(credentials, &state.db)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials(_) => {
                AppError::Unauthorized("Invalid username or password.".to_owned())
            }
            AuthError::UnexpectedError(e) => AppError::Unexpected(e),
        })?;
    tracing::Span::current().record("user_id", &tracing::field::display(&session_user.id));

    let jwt = session_user.to_jwt(&state.hmac_key, state.token_ttl)?;

    Ok(([(AUTHORIZATION, format!("Bearer {}", jwt))], Resp::empty()))
}
