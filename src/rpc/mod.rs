//! RPC Module - Router tipizzato delle procedure
//!
//! Ogni procedura ha un indirizzo `"<router>.<procedura>"` ed è una **query**
//! (lettura senza effetti collaterali) oppure una **mutation**.
//! Le due superfici di invocazione sono:
//! - `transport`: HTTP (`GET`/`POST /api/trpc/{path}`)
//! - `caller`: chiamata in-process, per codice server-side e test
//!
//! Entrambe passano dalla stessa `router::dispatch` e dalle stesse funzioni
//! di procedura, che validano da sole il proprio input.

pub mod caller;
pub mod router;
pub mod transport;

pub use caller::{Caller, create_caller};
pub use router::{APP_ROUTER, dispatch, procedure_paths};

use crate::core::AppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProcedureKind {
    Query,
    Mutation,
}

/// Nome e tipo di una procedura dentro un sotto-router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcedureDef {
    pub name: &'static str,
    pub kind: ProcedureKind,
}

pub const fn query(name: &'static str) -> ProcedureDef {
    ProcedureDef {
        name,
        kind: ProcedureKind::Query,
    }
}

pub const fn mutation(name: &'static str) -> ProcedureDef {
    ProcedureDef {
        name,
        kind: ProcedureKind::Mutation,
    }
}

/// Envelope di successo: `{"result": {"data": ...}}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SuccessResponse {
    pub result: ResultData,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResultData {
    pub data: Value,
}

impl SuccessResponse {
    pub fn new(data: Value) -> Self {
        Self {
            result: ResultData { data },
        }
    }
}

/// Deserializza l'input grezzo di una procedura.
/// Input assente o `null` vale come oggetto vuoto, così gli input con soli
/// campi opzionali accettano anche la chiamata senza argomenti.
pub fn parse_input<T: DeserializeOwned>(input: Option<Value>) -> Result<T, AppError> {
    let value = match input {
        None | Some(Value::Null) => Value::Object(Default::default()),
        Some(value) => value,
    };
    Ok(serde_json::from_value(value)?)
}

/// Serializza l'output di una procedura
pub fn to_output<T: Serialize>(output: T) -> Result<Value, AppError> {
    serde_json::to_value(output).map_err(|e| {
        error!("Failed to serialize procedure output: {:?}", e);
        AppError::internal_server_error("Internal server error")
    })
}
