//! Procedure Context - dati per singola chiamata passati a ogni procedura
//!
//! Il contesto viene costruito da zero per ogni richiesta e passato
//! esplicitamente: non esiste una sessione globale.

use crate::core::auth::{Session, session_from_headers};
use crate::core::{AppError, AppState};
use axum::http::HeaderMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct Context {
    pub state: Arc<AppState>,
    pub session: Option<Session>,
}

impl Context {
    pub fn new(state: Arc<AppState>, session: Option<Session>) -> Self {
        Self { state, session }
    }

    pub fn anonymous(state: Arc<AppState>) -> Self {
        Self::new(state, None)
    }

    /// Costruisce il contesto di una richiesta HTTP leggendo token o cookie
    pub fn from_headers(state: Arc<AppState>, headers: &HeaderMap) -> Self {
        let session = session_from_headers(headers, &state.jwt_secret);
        debug!(authenticated = session.is_some(), "Request context created");
        Self::new(state, session)
    }

    /// Sessione obbligatoria per le procedure protette
    pub fn require_session(&self) -> Result<&Session, AppError> {
        self.session
            .as_ref()
            .ok_or_else(|| AppError::unauthorized("You must be signed in"))
    }
}
