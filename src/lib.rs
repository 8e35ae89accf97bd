//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod rpc;
pub mod seed;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, Config, Context, auth, config};
pub use rpc::{Caller, create_caller};
pub use services::root;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .nest("/api/auth", configure_auth_routes())
        .nest("/api/trpc", rpc::transport::routes());

    // l'hook di reset esiste solo quando è stato abilitato esplicitamente
    if state.expose_test_hooks {
        router = router.route(
            "/api/test/reset-and-seed",
            post(services::reset_and_seed_handler),
        );
    }

    router.with_state(state)
}

/// Configura le routes di autenticazione (sign-up, sign-in, sign-out)
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
}

/// CORS: con un'origine configurata si accettano i cookie di sessione,
/// altrimenti qualsiasi origine senza credenziali (sviluppo)
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origin
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_headers(Any)
            .allow_methods(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
    }
}
