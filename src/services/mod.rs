//! Services module - implementazione delle procedure e degli handler HTTP
//!
//! Un sotto-modulo per sotto-router RPC (health, thread, user, sidekiq, team),
//! più gli handler HTTP che stanno fuori dal router RPC (auth, test hooks).

pub mod auth;
pub mod health;
pub mod sidekiq;
pub mod team;
pub mod testing;
pub mod thread;
pub mod user;

// Re-exports per facilitare l'import
pub use auth::{sign_in, sign_out, sign_up};
pub use testing::reset_and_seed_handler;

use axum::{http::StatusCode, response::IntoResponse};

/// Root endpoint
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
