//! Sidekiq services - configurazione degli assistenti AI

use super::team::membership;
use crate::core::{AppError, Context, Session};
use crate::dtos::sidekiq::{DEFAULT_AVATAR_COLOR, DEFAULT_SIDEKIQ_MODEL};
use crate::dtos::{
    CreateSidekiqDTO, CreateSidekiqInput, ListSidekiqsInput, SidekiqDTO, SidekiqIdInput,
    UpdateSidekiqDTO, UpdateSidekiqInput,
};
use crate::entities::Sidekiq;
use crate::repositories::{Create, Delete, Read, Update};
use crate::rpc::{ProcedureDef, mutation, parse_input, query, to_output};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

pub const PROCEDURES: &[ProcedureDef] = &[
    query("list"),
    query("byId"),
    mutation("create"),
    mutation("update"),
    mutation("delete"),
];

/// Sidekiq leggibile dall'utente: suo, oppure condiviso in un team di cui è membro.
/// Un sidekiq non accessibile risponde NOT_FOUND come uno inesistente.
pub(crate) async fn load_accessible(
    ctx: &Context,
    session: &Session,
    sidekiq_id: &i32,
) -> Result<Sidekiq, AppError> {
    let sidekiq = ctx
        .state
        .sidekiq
        .read(sidekiq_id)
        .await?
        .ok_or_else(|| AppError::not_found("Sidekiq not found"))?;

    if sidekiq.owner_id == session.user_id {
        return Ok(sidekiq);
    }

    if let Some(team_id) = sidekiq.team_id {
        if ctx
            .state
            .team
            .find_member(&team_id, &session.user_id)
            .await?
            .is_some()
        {
            return Ok(sidekiq);
        }
    }

    warn!("User {} cannot access sidekiq {}", session.user_id, sidekiq_id);
    Err(AppError::not_found("Sidekiq not found"))
}

/// Come `load_accessible`, ma solo l'owner può modificare
async fn load_owned(
    ctx: &Context,
    session: &Session,
    sidekiq_id: &i32,
) -> Result<Sidekiq, AppError> {
    let sidekiq = load_accessible(ctx, session, sidekiq_id).await?;
    if sidekiq.owner_id != session.user_id {
        warn!("User {} is not the owner of sidekiq {}", session.user_id, sidekiq_id);
        return Err(AppError::forbidden("Only the owner can modify this sidekiq"));
    }
    Ok(sidekiq)
}

#[instrument(skip(ctx))]
pub async fn list(ctx: &Context, input: ListSidekiqsInput) -> Result<Vec<SidekiqDTO>, AppError> {
    let session = ctx.require_session()?;

    if let Some(team_id) = &input.team_id {
        membership(ctx, &session.user_id, team_id).await?;
    }

    let sidekiqs = ctx
        .state
        .sidekiq
        .list_accessible(&session.user_id, input.team_id.as_ref())
        .await?;

    Ok(sidekiqs.into_iter().map(SidekiqDTO::from).collect())
}

#[instrument(skip(ctx))]
pub async fn by_id(ctx: &Context, input: SidekiqIdInput) -> Result<SidekiqDTO, AppError> {
    let session = ctx.require_session()?;
    let sidekiq = load_accessible(ctx, session, &input.sidekiq_id).await?;
    Ok(SidekiqDTO::from(sidekiq))
}

#[instrument(skip(ctx, input), fields(team_id = ?input.team_id))]
pub async fn create(ctx: &Context, input: CreateSidekiqInput) -> Result<SidekiqDTO, AppError> {
    // 1. Validare l'input
    // 2. Se è indicato un team, l'utente deve esserne membro
    // 3. Modello: quello indicato, altrimenti il default dell'utente, altrimenti il default globale
    let session = ctx.require_session()?;
    input.validate()?;

    if let Some(team_id) = &input.team_id {
        membership(ctx, &session.user_id, team_id).await?;
    }

    let model = match input.model {
        Some(model) => model,
        None => ctx
            .state
            .user
            .read(&session.user_id)
            .await?
            .and_then(|user| user.default_model)
            .unwrap_or_else(|| DEFAULT_SIDEKIQ_MODEL.to_string()),
    };
    debug!("Creating sidekiq with model {}", model);

    let sidekiq = ctx
        .state
        .sidekiq
        .create(&CreateSidekiqDTO {
            owner_id: session.user_id,
            team_id: input.team_id,
            name: input.name.trim().to_string(),
            description: input.description,
            instructions: input.instructions,
            model,
            avatar_color: input
                .avatar_color
                .unwrap_or_else(|| DEFAULT_AVATAR_COLOR.to_string()),
        })
        .await?;

    info!("Sidekiq {} created", sidekiq.id);
    Ok(SidekiqDTO::from(sidekiq))
}

#[instrument(skip(ctx, input), fields(sidekiq_id = %input.sidekiq_id))]
pub async fn update(ctx: &Context, input: UpdateSidekiqInput) -> Result<SidekiqDTO, AppError> {
    let session = ctx.require_session()?;
    input.validate()?;

    let sidekiq = load_owned(ctx, session, &input.sidekiq_id).await?;
    let sidekiq = ctx
        .state
        .sidekiq
        .update(&sidekiq.id, &UpdateSidekiqDTO::from(input))
        .await?;

    info!("Sidekiq {} updated", sidekiq.id);
    Ok(SidekiqDTO::from(sidekiq))
}

#[instrument(skip(ctx))]
pub async fn delete(ctx: &Context, input: SidekiqIdInput) -> Result<(), AppError> {
    let session = ctx.require_session()?;
    let sidekiq = load_owned(ctx, session, &input.sidekiq_id).await?;

    // i thread collegati restano, con sidekiq_id a NULL
    ctx.state.sidekiq.delete(&sidekiq.id).await?;
    info!("Sidekiq {} deleted", sidekiq.id);
    Ok(())
}

pub(crate) async fn dispatch(
    ctx: &Context,
    procedure: &str,
    input: Option<Value>,
) -> Result<Value, AppError> {
    match procedure {
        "list" => to_output(list(ctx, parse_input(input)?).await?),
        "byId" => to_output(by_id(ctx, parse_input(input)?).await?),
        "create" => to_output(create(ctx, parse_input(input)?).await?),
        "update" => to_output(update(ctx, parse_input(input)?).await?),
        "delete" => to_output(delete(ctx, parse_input(input)?).await?),
        _ => Err(AppError::not_found("No procedure found on path")),
    }
}
