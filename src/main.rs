use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

mod config;
mod error;
mod handlers;
mod models;
mod seed;
mod store;

use crate::config::Config;
use crate::seed::SeedSnapshot;
use crate::store::{BinStore, SnapshotSource};

/// Shared application state. The store is created once in `main` and handed
/// to every handler through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BinStore>,
}

impl AppState {
    pub fn new(store: BinStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,bin_inventory=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let source: Arc<dyn SnapshotSource> = match &config.snapshot_path {
        Some(path) => Arc::new(SeedSnapshot::from_json_file(path)?),
        None => Arc::new(SeedSnapshot::builtin()),
    };
    let store = BinStore::new(source, config.durability())?;
    let (bin_count, empty) = store.read(|c| Ok((c.len(), c.is_empty()))).await?;
    if empty {
        warn!("Snapshot holds no bins; the inventory starts empty");
    }

    info!(
        bins = bin_count,
        durability = ?store.durability(),
        "Bin store ready"
    );

    let app = build_router(AppState::new(store));

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Bins ────────────────────────────────────────────────────────────
        .route(
            "/api/bins",
            get(handlers::bins::list_bins).post(handlers::bins::create_bin),
        )
        .route("/api/bins/:bin_id", get(handlers::bins::get_bin))

        // ── Items within a bin ──────────────────────────────────────────────
        .route(
            "/api/bins/:bin_id/items",
            get(handlers::items::list_items).post(handlers::items::create_item),
        )
        .route(
            "/api/bins/:bin_id/items/:item_id",
            get(handlers::items::get_item).delete(handlers::items::delete_item),
        )
        .route(
            "/api/bins/:bin_id/items/:item_id/:new_count",
            put(handlers::items::adjust_item_count),
        )

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
