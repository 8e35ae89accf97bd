//! Test hooks - esposti solo con APP_ENV=test

use crate::core::{AppError, AppState};
use crate::seed::{SeedSummary, reset_and_seed};
use axum::extract::{Json, State};
use std::sync::Arc;
use tracing::{info, instrument};

/// Riporta il database allo stato delle fixture prima di una suite end-to-end
#[instrument(skip(state))]
pub async fn reset_and_seed_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SeedSummary>, AppError> {
    let summary = reset_and_seed(&state.pool).await?;
    info!("Database reset to fixture baseline");
    Ok(Json(summary))
}
