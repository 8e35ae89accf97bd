//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Autenticazione, sessione e JWT
//! - Configurazione
//! - Gestione errori
//! - Stato applicazione e contesto per richiesta

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{Claims, Session, decode_jwt, encode_jwt};
pub use config::Config;
pub use context::Context;
pub use error::{AppError, ErrorCode, ErrorResponse};
pub use state::AppState;
