//! StayLocal booking service.
//!
//! Prices stays, tracks which dates are taken and serves the booking widget,
//! host dashboard and simulated payments over a JSON API.

pub mod booking;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod payment;
pub mod routes;
pub mod session;

use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use cache::AppCache;
use config::Config;
use session::SessionStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub sessions: SessionStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            cache: AppCache::new(),
            sessions: SessionStore::new(config.session_ttl),
            config: Arc::new(config),
        }
    }
}

/// Build the full router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .merge(booking::router())
        .merge(routes::hosts::router())
        .merge(routes::payments::router())
        .merge(routes::session::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
