//! AppRouter - composizione dei sotto-router in un unico namespace
//!
//! La mappa nome → sotto-router è fissa. `dispatch` risolve il path, verifica
//! che il tipo (query/mutation) coincida e delega al sotto-router, restituendo
//! l'errore della procedura senza modificarlo.

use super::{ProcedureDef, ProcedureKind};
use crate::core::{AppError, Context, ErrorCode};
use crate::services::{health, sidekiq, team, thread, user};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

/// Sotto-router: nome e procedure esposte
#[derive(Debug, Clone, Copy)]
pub struct SubRouter {
    pub name: &'static str,
    pub procedures: &'static [ProcedureDef],
}

pub const APP_ROUTER: [SubRouter; 5] = [
    SubRouter {
        name: "health",
        procedures: health::PROCEDURES,
    },
    SubRouter {
        name: "thread",
        procedures: thread::PROCEDURES,
    },
    SubRouter {
        name: "user",
        procedures: user::PROCEDURES,
    },
    SubRouter {
        name: "sidekiq",
        procedures: sidekiq::PROCEDURES,
    },
    SubRouter {
        name: "team",
        procedures: team::PROCEDURES,
    },
];

/// Tutti i path indirizzabili, es. "health.check"
pub fn procedure_paths() -> Vec<String> {
    APP_ROUTER
        .iter()
        .flat_map(|router| {
            router
                .procedures
                .iter()
                .map(move |def| format!("{}.{}", router.name, def.name))
        })
        .collect()
}

/// Risolve `"<router>.<procedura>"` nella sua definizione
pub fn lookup(path: &str) -> Result<(&'static str, ProcedureDef), AppError> {
    let not_found = || {
        AppError::not_found("No procedure found on path").with_details(path.to_string())
    };

    let (router_name, procedure_name) = path.split_once('.').ok_or_else(not_found)?;
    let router = APP_ROUTER
        .iter()
        .find(|router| router.name == router_name)
        .ok_or_else(not_found)?;
    let def = router
        .procedures
        .iter()
        .find(|def| def.name == procedure_name)
        .ok_or_else(not_found)?;

    Ok((router.name, *def))
}

#[instrument(skip(ctx, input), fields(kind = ?kind, user_id = ?ctx.session.as_ref().map(|s| s.user_id)))]
pub async fn dispatch(
    ctx: &Context,
    path: &str,
    kind: ProcedureKind,
    input: Option<Value>,
) -> Result<Value, AppError> {
    let (router, def) = lookup(path)?;

    if def.kind != kind {
        warn!("Procedure {} is a {:?}, called as {:?}", path, def.kind, kind);
        return Err(AppError::bad_request("Procedure type mismatch")
            .with_details(format!("{} is a {:?}", path, def.kind)));
    }

    debug!("Dispatching procedure");
    let result = match router {
        "health" => health::dispatch(ctx, def.name, input).await,
        "thread" => thread::dispatch(ctx, def.name, input).await,
        "user" => user::dispatch(ctx, def.name, input).await,
        "sidekiq" => sidekiq::dispatch(ctx, def.name, input).await,
        "team" => team::dispatch(ctx, def.name, input).await,
        _ => Err(AppError::not_found("No procedure found on path")),
    };

    if let Err(err) = &result {
        match err.code() {
            ErrorCode::InternalServerError => error!("Procedure {} failed: {}", path, err),
            _ => debug!("Procedure {} rejected: {}", path, err),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_names_are_fixed() {
        let names: Vec<&str> = APP_ROUTER.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["health", "thread", "user", "sidekiq", "team"]);
    }

    #[test]
    fn test_paths_are_unique() {
        let paths = procedure_paths();
        let mut deduped = paths.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(paths.len(), deduped.len());
        assert!(paths.contains(&"health.check".to_string()));
        assert!(paths.contains(&"user.updateModelPreferences".to_string()));
    }

    #[test]
    fn test_lookup_health_check_is_query() {
        let (router, def) = lookup("health.check").unwrap();
        assert_eq!(router, "health");
        assert_eq!(def.kind, ProcedureKind::Query);
    }

    #[test]
    fn test_lookup_unknown_paths() {
        for path in ["", "health", "health.", "nope.check", "health.nope", "health.check.extra"] {
            let err = lookup(path).unwrap_err();
            assert_eq!(err.code(), ErrorCode::NotFound, "path {path:?}");
        }
    }
}
