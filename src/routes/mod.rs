//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/api/file` - Plate image upload, metadata, download, deletion
//! - `/api/health` - Health checks

pub mod files;
pub mod health;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;
use crate::types::AppError;

/// Create the main application router
///
/// API routes are prefixed with `/api/`; anything else gets a JSON 404.
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    Router::new()
        .merge(files::router(state.clone()))
        .merge(health::router(state))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}
