//! HTTP transport - espone l'AppRouter sotto `/api/trpc`
//!
//! - `GET  /api/trpc/{path}?input=<json>` per le query
//! - `POST /api/trpc/{path}` con corpo JSON per le mutation
//!
//! Successo: `200 {"result": {"data": ...}}`.
//! Errore: status del codice e `{"error": {"code", "message", "details"?}}`.

use super::{ProcedureKind, SuccessResponse, router};
use crate::core::{AppError, AppState, Context};
use axum::{
    Router,
    body::Bytes,
    extract::{Json, Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_macros::debug_handler;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/{path}", get(handle_query).post(handle_mutation))
}

#[derive(Deserialize, Debug, Default)]
pub struct QueryParams {
    /// Input della query serializzato come stringa JSON
    pub input: Option<String>,
}

fn parse_raw_input(raw: &[u8]) -> Result<Option<Value>, AppError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(raw)?))
}

fn respond(result: Result<Value, AppError>) -> Response {
    match result {
        Ok(data) => Json(SuccessResponse::new(data)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[debug_handler]
#[instrument(skip(state, headers, params))]
pub async fn handle_query(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    headers: HeaderMap,
    Query(params): Query<QueryParams>,
) -> Response {
    let ctx = Context::from_headers(state, &headers);
    let input = match params.input.as_deref().map(str::as_bytes).map(parse_raw_input) {
        Some(Ok(input)) => input,
        Some(Err(err)) => return err.into_response(),
        None => None,
    };
    respond(router::dispatch(&ctx, &path, ProcedureKind::Query, input).await)
}

#[debug_handler]
#[instrument(skip(state, headers, body))]
pub async fn handle_mutation(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ctx = Context::from_headers(state, &headers);
    let input = match parse_raw_input(&body) {
        Ok(input) => input,
        Err(err) => return err.into_response(),
    };
    respond(router::dispatch(&ctx, &path, ProcedureKind::Mutation, input).await)
}
