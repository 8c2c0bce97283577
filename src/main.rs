use anyhow::Context;
use blogv3::{app::App, config::get_configuration, db, telemetry::get_subscriber};
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_configuration().context("Failed to read configuration.")?;

    get_subscriber(&config.log_level, std::io::stderr).init();

    let db = db::connect(&config.database)
        .await
        .context("Could not connect to database")?;

    let app = App::with(config)
        .await
        .context("Could not bind the listener")?;

    tracing::info!(host = %app.host(), port = app.port(), "starting server");
    app.serve(db).await.context("The server stopped unexpectedly")?;

    Ok(())
}
