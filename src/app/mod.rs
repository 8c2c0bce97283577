use std::{io, net::IpAddr};

use axum::{http::Request, middleware, Router};
use secrecy::Secret;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Settings;

pub mod envelope;
pub mod error;
pub mod extractor;
pub mod token;

mod board;
mod fallback;
mod health;
pub(crate) mod user;

#[derive(Clone)]
pub struct AppState {
    db: SqlitePool,
    hmac_key: Secret<String>,
    token_ttl: time::Duration,
    page_size: u32,
}

fn app_router() -> Router<AppState> {
    health::router()
        .merge(user::router())
        .merge(board::router())
        .fallback(fallback::not_found)
        .layer(middleware::map_response(fallback::method_not_allowed))
}

pub struct App {
    listener: TcpListener,
    hmac_key: Secret<String>,
    token_ttl: time::Duration,
    page_size: u32,
}

impl App {
    pub async fn with(config: Settings) -> Result<Self, io::Error> {
        let listener = TcpListener::bind(format!(
            "{}:{}",
            config.application.host, config.application.port
        ))
        .await?;

        Ok(Self {
            listener,
            token_ttl: config.application.token_ttl(),
            hmac_key: config.application.hmac_secret,
            page_size: config.board.page_size.max(1),
        })
    }

    pub fn host(&self) -> IpAddr {
        self.local_addr().ip()
    }

    pub fn port(&self) -> u16 {
        self.local_addr().port()
    }

    fn local_addr(&self) -> std::net::SocketAddr {
        self.listener
            .local_addr()
            .expect("A bound listener should have a local address")
    }

    pub async fn serve(self, db: SqlitePool) -> Result<(), io::Error> {
        let app = app_router()
            .with_state(AppState {
                db,
                hmac_key: self.hmac_key,
                token_ttl: self.token_ttl,
                page_size: self.page_size,
            })
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                    let id = uuid::Uuid::new_v4();
                    tracing::info_span!(
                        "request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                        %id,
                    )
                }),
            );

        axum::serve(self.listener, app.into_make_service()).await
    }
}
