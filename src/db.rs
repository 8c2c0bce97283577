use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::app::user::utils::compute_password_hash;
use crate::config::DatabaseSettings;
use crate::telemetry::spawn_blocking_with_tracing;

const DUMMY_PASSWORD: &str = "1234";

/// (username, email)
const DUMMY_USERS: [(&str, &str); 3] = [
    ("ssar", "ssar@nate.com"),
    ("cos", "cos@nate.com"),
    ("love", "love@nate.com"),
];

/// Owner id of boards 1 to 10, in insertion order.
const DUMMY_BOARD_OWNERS: [i64; 10] = [1, 1, 1, 1, 1, 2, 2, 2, 3, 3];

/// Open the pool, run the embedded migrations and seed the dummy data when asked to.
pub async fn connect(config: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    let max_connections = if config.is_in_memory() {
        1
    } else {
        config.max_connections
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(
            config
                .connect_options()
                .context("Invalid database url")?,
        )
        .await
        .context("Failed to open the database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate the database")?;

    if config.seed {
        seed_dummy_data(&pool).await?;
    }

    Ok(pool)
}

#[tracing::instrument(name = "Seed dummy data", skip(pool))]
pub async fn seed_dummy_data(pool: &SqlitePool) -> anyhow::Result<()> {
    // Every dummy user shares the same password, hash it once.
    let password_hash =
        spawn_blocking_with_tracing(|| compute_password_hash(Secret::new(DUMMY_PASSWORD.into())))
            .await
            .context("Could not compute password hash.")??;

    let mut transaction = pool.begin().await.context("Failed to open a transaction")?;
    let now = chrono::Utc::now();

    for (username, email) in DUMMY_USERS {
        sqlx::query(
            r#"insert into user_tb (username, password, email, created_at) values (?, ?, ?, ?)"#,
        )
        .bind(username)
        .bind(password_hash.expose_secret())
        .bind(email)
        .bind(now)
        .execute(&mut *transaction)
        .await
        .with_context(|| format!("Failed to seed user {}", username))?;
    }

    for (n, user_id) in DUMMY_BOARD_OWNERS.into_iter().enumerate() {
        let n = n + 1;
        sqlx::query(
            r#"insert into board_tb (title, content, user_id, created_at) values (?, ?, ?, ?)"#,
        )
        .bind(format!("title {}", n))
        .bind(format!("content {}", n))
        .bind(user_id)
        .bind(now)
        .execute(&mut *transaction)
        .await
        .with_context(|| format!("Failed to seed board {}", n))?;
    }

    transaction
        .commit()
        .await
        .context("Failed to commit dummy data")?;

    tracing::info!(
        users = DUMMY_USERS.len(),
        boards = DUMMY_BOARD_OWNERS.len(),
        "dummy data seeded"
    );
    Ok(())
}
