//! picshare schema bootstrap.
//!
//! Loads configuration, connects to the database and creates the picshare
//! tables if they do not exist yet.

use picshare_common::{AppError, Config};
use sea_orm::ConnectionTrait;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "picshare=debug,sea_orm=info".into()),
        )
        .init();

    if let Err(e) = run().await {
        e.log();
        return Err(e.into());
    }

    Ok(())
}

async fn run() -> Result<(), AppError> {
    info!("Starting picshare schema bootstrap...");

    let config = Config::load()?;

    let db = picshare_db::init(&config.database).await?;
    info!(
        backend = ?db.get_database_backend(),
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    picshare_db::migrate(&db).await?;
    info!("Schema is up to date");

    db.close()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(())
}
