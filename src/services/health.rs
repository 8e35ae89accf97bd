//! Health services - sonda di liveness

use crate::core::{AppError, Context};
use crate::dtos::HealthStatusDTO;
use crate::rpc::{ProcedureDef, query, to_output};
use chrono::Utc;
use serde_json::Value;

pub const PROCEDURES: &[ProcedureDef] = &[query("check")];

/// Sempre `"ok"` con l'istante corrente, nessun effetto collaterale.
/// Non tocca il database: risponde anche se lo store non è raggiungibile.
pub async fn check(_ctx: &Context) -> Result<HealthStatusDTO, AppError> {
    Ok(HealthStatusDTO::ok_at(Utc::now()))
}

pub(crate) async fn dispatch(
    ctx: &Context,
    procedure: &str,
    _input: Option<Value>,
) -> Result<Value, AppError> {
    match procedure {
        "check" => to_output(check(ctx).await?),
        _ => Err(AppError::not_found("No procedure found on path")),
    }
}
