//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::{Context, Result};
use statements_core::Config;
use statements_infra::{init_telemetry, LogFormat};
use statements_tokens::{SweeperHandle, TokenSweeper};
use std::sync::Arc;

/// Initialized application: shared state, the router, and the running token sweeper.
pub struct App {
    pub state: Arc<AppState>,
    pub router: axum::Router,
    pub sweeper: SweeperHandle,
}

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<App> {
    config.validate().context("Configuration validation failed")?;

    init_telemetry(LogFormat::parse(config.log_format()))?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let state = services::initialize_state(&config);

    let sweeper = TokenSweeper::start(state.tokens.clone(), config.token_sweep_interval());

    let router = routes::setup_routes(&config, state.clone())?;

    Ok(App {
        state,
        router,
        sweeper,
    })
}
