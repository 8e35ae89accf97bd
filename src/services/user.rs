//! User services - profilo e preferenze sui modelli dell'utente corrente

use crate::core::{AppError, Context};
use crate::dtos::{ModelPreferencesDTO, UpdateModelPreferencesInput, UpdateProfileInput, UserDTO};
use crate::entities::User;
use crate::repositories::Read;
use crate::rpc::{ProcedureDef, mutation, parse_input, query, to_output};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

pub const PROCEDURES: &[ProcedureDef] = &[
    query("me"),
    query("getModelPreferences"),
    mutation("updateModelPreferences"),
    mutation("updateProfile"),
];

/// Utente della sessione. Il token può sopravvivere all'utente: in quel caso NOT_FOUND
async fn current_user(ctx: &Context) -> Result<User, AppError> {
    let session = ctx.require_session()?;
    ctx.state.user.read(&session.user_id).await?.ok_or_else(|| {
        warn!("Session refers to missing user {}", session.user_id);
        AppError::not_found("User not found")
    })
}

#[instrument(skip(ctx))]
pub async fn me(ctx: &Context) -> Result<UserDTO, AppError> {
    let user = current_user(ctx).await?;
    Ok(UserDTO::from(user))
}

#[instrument(skip(ctx))]
pub async fn get_model_preferences(ctx: &Context) -> Result<ModelPreferencesDTO, AppError> {
    let user = current_user(ctx).await?;
    Ok(ModelPreferencesDTO::from(&user))
}

#[instrument(skip(ctx, input))]
pub async fn update_model_preferences(
    ctx: &Context,
    input: UpdateModelPreferencesInput,
) -> Result<ModelPreferencesDTO, AppError> {
    // 1. Sessione obbligatoria
    // 2. Validare l'input
    // 3. Nessun campo presente: nessuna modifica, si restituiscono le preferenze correnti
    // 4. Altrimenti un'unica UPDATE applica default e toggle dei preferiti
    let session = ctx.require_session()?;
    input.validate()?;

    if input.is_noop() {
        debug!("No preference change requested");
        return get_model_preferences(ctx).await;
    }

    let user = ctx
        .state
        .user
        .update_model_preferences(&session.user_id, &input)
        .await?;

    info!(
        "Model preferences updated for user {}: default={:?}, favorites={}",
        user.id,
        user.default_model,
        user.favorite_models.len()
    );
    Ok(ModelPreferencesDTO::from(&user))
}

#[instrument(skip(ctx, input))]
pub async fn update_profile(ctx: &Context, input: UpdateProfileInput) -> Result<UserDTO, AppError> {
    let session = ctx.require_session()?;
    input.validate()?;

    let user = ctx
        .state
        .user
        .update_name(&session.user_id, input.name.trim())
        .await?;
    Ok(UserDTO::from(user))
}

pub(crate) async fn dispatch(
    ctx: &Context,
    procedure: &str,
    input: Option<Value>,
) -> Result<Value, AppError> {
    match procedure {
        "me" => to_output(me(ctx).await?),
        "getModelPreferences" => to_output(get_model_preferences(ctx).await?),
        "updateModelPreferences" => {
            to_output(update_model_preferences(ctx, parse_input(input)?).await?)
        }
        "updateProfile" => to_output(update_profile(ctx, parse_input(input)?).await?),
        _ => Err(AppError::not_found("No procedure found on path")),
    }
}
