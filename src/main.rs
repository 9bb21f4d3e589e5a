use anyhow::Context;
use log::info;
use std::sync::Arc;

use isoserver::main_module::run_axum_server;
use isoserver::seed::seed_database;
use isoserver::shared::config::AppConfig;
use isoserver::shared::migration::ensure_schema;
use isoserver::shared::state::AppState;
use isoserver::shared::utils::create_conn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    info!(
        "Connecting to database {}@{}:{}/{}",
        config.database.username, config.database.host, config.database.port, config.database.database
    );

    let db_config = config.database.clone();
    let seed_config = config.seed.clone();
    let pool = tokio::task::spawn_blocking(move || {
        let pool = create_conn(&db_config)?;
        if ensure_schema(&pool) {
            seed_database(&pool, &seed_config);
        }
        Ok::<_, diesel::r2d2::PoolError>(pool)
    })
    .await
    .context("startup task panicked")?
    .context("failed to create database pool")?;

    let state = Arc::new(AppState::new(config, pool));
    run_axum_server(state).await?;

    info!("Server stopped");
    Ok(())
}
