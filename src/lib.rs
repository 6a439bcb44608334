pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod notify;
pub mod services;
pub mod validation;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Bring the service up and block until Ctrl+C.
///
/// Fails fast when the database cannot be opened or migrated; once the
/// server is listening, errors stay per-request and never tear it down.
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("clinicd starting v{}", config::APP_VERSION);

    let data_dir = config::data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let db_path = config::database_path();
    db::open_database(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    tracing::info!(path = %db_path.display(), "database ready");

    let notifier = notify::Notifier::spawn();
    let ctx = api::ApiContext::new(db_path, notifier);

    let mut server = api::start_api_server(ctx, &config::bind_addr()).await?;
    tracing::info!(addr = %server.addr(), "listening");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl+C")?;
    tracing::info!("shutdown signal received");
    server.shutdown();

    Ok(())
}
