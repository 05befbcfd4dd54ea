// Zone of Inhibition Tracker - backend for microbial inhibition-zone test plates

pub mod config;
pub mod constants;
pub mod db;
pub mod diameters;
pub mod models;
pub mod routes;
pub mod storage;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
