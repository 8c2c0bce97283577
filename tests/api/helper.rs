use blogv3::{
    app::{token::SessionUser, App},
    config::{get_configuration, Settings},
    db,
    telemetry::get_subscriber,
};
use once_cell::sync::Lazy;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use secrecy::Secret;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing_subscriber::util::SubscriberInitExt;

static TRACING: Lazy<()> = Lazy::new(|| {
    let env_filter = "blogv3=trace,sqlx=trace,tower_http=trace,axum::rejection=trace";

    if std::env::var("TEST_LOG").is_ok() {
        get_subscriber(env_filter, std::io::stdout).init();
    } else {
        get_subscriber(env_filter, std::io::sink).init();
    };
});

pub struct TestApp {
    pub addr: String,
    pub db_pool: SqlitePool,
    pub config: Settings,
    pub client: ClientWithMiddleware,
}

impl TestApp {
    /// Mint a token the same way the server does on login.
    pub fn access_token(&self, id: i64, username: &str) -> String {
        self.access_token_signed_with(&self.config.application.hmac_secret, id, username)
    }

    pub fn access_token_signed_with(
        &self,
        secret: &Secret<String>,
        id: i64,
        username: &str,
    ) -> String {
        SessionUser {
            id,
            username: username.to_owned(),
        }
        .to_jwt(secret, self.config.application.token_ttl())
        .expect("The token should be signed.")
    }

    pub async fn post_join(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/join", &self.addr))
            .json(body)
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn post_login(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/login", &self.addr))
            .json(body)
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn post_board(&self, token: Option<&str>, body: &Value) -> reqwest::Response {
        let mut request = self
            .client
            .post(format!("{}/api/board", &self.addr))
            .json(body);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        request.send().await.expect("The request should succeed.")
    }

    /// POST a board with a raw `Authorization` header value.
    pub async fn post_board_with_authorization(
        &self,
        authorization: &str,
        body: &Value,
    ) -> reqwest::Response {
        self.client
            .post(format!("{}/api/board", &self.addr))
            .header("Authorization", authorization)
            .json(body)
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn put_board(&self, token: &str, id: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(format!("{}/api/board/{}", &self.addr, id))
            .header("Authorization", format!("Bearer {}", token))
            .json(body)
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn delete_board(&self, token: &str, id: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}/api/board/{}", &self.addr, id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn get_board_page(&self, page: Option<u32>) -> reqwest::Response {
        let url = match page {
            Some(page) => format!("{}/board?page={}", &self.addr, page),
            None => format!("{}/board", &self.addr),
        };
        self.client
            .get(url)
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn get_board(&self, id: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/board/{}", &self.addr, id))
            .send()
            .await
            .expect("The request should succeed.")
    }
}

/// Read the envelope, asserting the HTTP status matches the one it carries.
pub async fn envelope(response: reqwest::Response) -> Value {
    let status = response.status().as_u16();
    let body: Value = response
        .json()
        .await
        .expect("The response should be a JSON envelope.");
    assert_eq!(body["status"], status, "envelope status differs: {}", body);
    body
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let mut config = get_configuration().expect("Failed to read configuration.");
    config.application.port = 0;
    // A private in-memory database per test, seeded with the dummy users and boards.
    config.database.url = "sqlite::memory:".to_owned();
    config.database.seed = true;
    config.board.page_size = 3;

    let db_pool = db::connect(&config.database)
        .await
        .expect("The database should be ready.");
    let app = App::with(config.clone())
        .await
        .expect("The listener should be able to bind the address.");

    let test_app = TestApp {
        addr: format!("http://127.0.0.1:{}", app.port()),
        db_pool: db_pool.clone(),
        config,
        client: get_client(),
    };

    let _ = tokio::spawn(async move {
        app.serve(db_pool)
            .await
            .expect("The server should be running")
    });

    test_app
}

pub fn get_client() -> ClientWithMiddleware {
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);

    ClientBuilder::new(reqwest::Client::new())
        .with(TracingMiddleware::default())
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
}
