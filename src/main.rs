use std::sync::Arc;

mod api;
mod app;
mod auth;
mod config;
mod entries;
mod foods;
mod notify;
mod nutrition;
mod state;
mod views;

use crate::api::HttpApi;
use crate::app::Shell;
use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "nutrack=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    // Diagnostics go to stderr so rendered views stay clean on stdout.
    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = AppConfig::from_env();
    tracing::info!(api_base = %config.api_base, "starting");

    let state = AppState::new(Arc::new(HttpApi::new(&config.api_base)));
    Shell::new(state).run().await
}
