//! Zodiac Ledger
//!
//! Process entry point: loads configuration from the environment, ensures
//! the database table exists, and serves the web application.

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod chart;
mod config;
mod flash;
mod server;
mod signs;
mod store;
mod validate;

use chart::PngChartRenderer;
use config::Config;
use server::{run_server, AppState};
use store::SqliteRecordStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Construction creates the table if it does not exist yet.
    let store = SqliteRecordStore::new(&config.database_url).await?;
    tracing::info!(db = %config.database_url, "record table ready");

    let state = AppState {
        store: Arc::new(store),
        chart: Arc::new(PngChartRenderer::default()),
        secret_key: config.secret_key.clone(),
    };

    run_server(state, &config.bind_addr).await
}
