//! Epic Free-Game Notifier
//!
//! Fetches the weekly Epic Games Store free-game list, renders it to images and
//! delivers them to chat through OneBot v11 bots, on command or on a schedule.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;
mod plugin;
mod render;

#[cfg(test)]
mod test_utils;


use adapters::{CronScheduler, FileSnapshotStore, HttpGameFeed, HttpRenderService, OneBotClient};
use app::{CommandRegistry, NotifierService, FREEGAME_COMMAND, FREEGAME_DESCRIPTION};
use config::Config;
use domain::ports::Bot;
use plugin::PluginManifest;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub commands: Arc<CommandRegistry>,
    pub bots: Arc<Vec<Arc<OneBotClient>>>,
    pub manifest: Arc<PluginManifest>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Plugin identity, capabilities and commands
        .route("/plugin", get(handlers::get_plugin))
        // OneBot event reporting
        .route("/onebot/event", post(handlers::onebot_event))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,epic_freegame=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Epic free-game notifier...");

    // Load configuration
    let config = Config::from_env();
    let Some(notifier) = config.notifier() else {
        tracing::warn!("EPIC_API_URL is not set, notifier disabled");
        return Ok(());
    };

    // Create adapters
    let feed = Arc::new(HttpGameFeed::new(notifier.api_url.clone(), config.http_timeout)?);
    let renderer = Arc::new(HttpRenderService::new(
        config.render_url.clone(),
        config.http_timeout,
    )?);
    let snapshots = Arc::new(FileSnapshotStore::new(config.snapshot_path.clone()));

    let mut bots = Vec::with_capacity(config.bot_endpoints.len());
    for endpoint in &config.bot_endpoints {
        bots.push(Arc::new(OneBotClient::new(
            endpoint.id.clone(),
            endpoint.base_url.clone(),
            config.bot_access_token.clone(),
            config.http_timeout,
        )?));
    }
    if bots.is_empty() {
        tracing::warn!("BOT_ENDPOINTS is empty, no bot can deliver messages");
    }
    tracing::info!(
        feed = feed.url(),
        snapshot = %snapshots.path().display(),
        bots = bots.len(),
        "Adapters ready"
    );

    // Create application services
    let notifier_service = Arc::new(NotifierService::new(
        feed,
        renderer,
        snapshots,
        bots.iter()
            .map(|bot| Arc::clone(bot) as Arc<dyn Bot>)
            .collect(),
        notifier.group_id.clone(),
    ));

    let mut commands = CommandRegistry::new();
    commands.register(
        FREEGAME_COMMAND,
        FREEGAME_DESCRIPTION,
        notifier_service.clone(),
    );

    // Scheduled push
    let schedule = match notifier.schedule() {
        Some(expression) => {
            match notifier_service.register_schedule(&CronScheduler::new(), expression) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to register scheduled push");
                    None
                }
            }
        }
        None => {
            tracing::info!("Scheduled push disabled, command still available");
            None
        }
    };

    // Create app state
    let state = AppState {
        manifest: Arc::new(PluginManifest::new(commands.list())),
        commands: Arc::new(commands),
        bots: Arc::new(bots),
    };

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = schedule {
        handle.cancel();
    }

    Ok(())
}
