//! Team services - gestione dei team/workspace e della membership

use crate::core::auth::require_role;
use crate::core::{AppError, Context};
use crate::dtos::{
    AddTeamMemberInput, CreateTeamInput, RemoveTeamMemberInput, TeamDTO, TeamDetailsDTO,
    TeamIdInput, TeamMemberDTO,
};
use crate::entities::{TeamMember, TeamRole};
use crate::repositories::{Delete, Read};
use crate::rpc::{ProcedureDef, mutation, parse_input, query, to_output};
use futures::future::try_join;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

pub const PROCEDURES: &[ProcedureDef] = &[
    query("list"),
    query("byId"),
    mutation("create"),
    mutation("addMember"),
    mutation("removeMember"),
    mutation("leave"),
    mutation("delete"),
];

/// Membership dell'utente corrente nel team.
/// NOT_FOUND se il team non esiste, FORBIDDEN se l'utente non ne fa parte.
pub(crate) async fn membership(
    ctx: &Context,
    user_id: &i32,
    team_id: &i32,
) -> Result<TeamMember, AppError> {
    let (team, member) = try_join(
        ctx.state.team.read(team_id),
        ctx.state.team.find_member(team_id, user_id),
    )
    .await?;

    if team.is_none() {
        warn!("Team {} not found", team_id);
        return Err(AppError::not_found("Team not found"));
    }

    member.ok_or_else(|| {
        warn!("User {} is not a member of team {}", user_id, team_id);
        AppError::forbidden("You are not a member of this team")
    })
}

#[instrument(skip(ctx))]
pub async fn list(ctx: &Context) -> Result<Vec<TeamDTO>, AppError> {
    let session = ctx.require_session()?;
    let teams = ctx.state.team.list_for_user(&session.user_id).await?;
    info!("Retrieved {} teams", teams.len());
    Ok(teams)
}

#[instrument(skip(ctx), fields(team_id = %input.team_id))]
pub async fn by_id(ctx: &Context, input: TeamIdInput) -> Result<TeamDetailsDTO, AppError> {
    let session = ctx.require_session()?;
    let member = membership(ctx, &session.user_id, &input.team_id).await?;

    let (team, members) = try_join(
        ctx.state.team.read(&input.team_id),
        ctx.state.team.list_members(&input.team_id),
    )
    .await?;
    let team = team.ok_or_else(|| AppError::not_found("Team not found"))?;

    Ok(TeamDetailsDTO {
        team: TeamDTO::from_team(team, member.role),
        members,
    })
}

#[instrument(skip(ctx, input))]
pub async fn create(ctx: &Context, input: CreateTeamInput) -> Result<TeamDTO, AppError> {
    let session = ctx.require_session()?;
    input.validate()?;

    let team = ctx
        .state
        .team
        .create_with_owner(input.name.trim(), &session.user_id)
        .await?;

    info!("Team '{}' created by user {}", team.name, session.user_id);
    Ok(TeamDTO::from_team(team, TeamRole::Owner))
}

#[instrument(skip(ctx, input), fields(team_id = %input.team_id))]
pub async fn add_member(
    ctx: &Context,
    input: AddTeamMemberInput,
) -> Result<TeamMemberDTO, AppError> {
    // 1. Solo l'owner può aggiungere membri
    // 2. L'utente da aggiungere deve esistere
    // 3. Se è già membro, CONFLICT
    // 4. Il nuovo membro entra con ruolo Member
    let session = ctx.require_session()?;
    input.validate()?;

    let member = membership(ctx, &session.user_id, &input.team_id).await?;
    require_role(&member, &[TeamRole::Owner])?;

    let user = ctx
        .state
        .user
        .find_by_email(&input.email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if ctx
        .state
        .team
        .find_member(&input.team_id, &user.id)
        .await?
        .is_some()
    {
        warn!("User {} already in team {}", user.id, input.team_id);
        return Err(AppError::conflict("User is already a member of this team"));
    }

    let added = ctx
        .state
        .team
        .add_member(&input.team_id, &user.id, TeamRole::Member)
        .await?;

    info!("User {} added to team {}", user.id, input.team_id);
    Ok(TeamMemberDTO {
        user_id: user.id,
        name: user.name,
        email: user.email,
        role: added.role,
        joined_at: added.joined_at,
    })
}

#[instrument(skip(ctx, input), fields(team_id = %input.team_id, target = %input.user_id))]
pub async fn remove_member(ctx: &Context, input: RemoveTeamMemberInput) -> Result<(), AppError> {
    let session = ctx.require_session()?;
    let member = membership(ctx, &session.user_id, &input.team_id).await?;
    require_role(&member, &[TeamRole::Owner])?;

    if input.user_id == session.user_id {
        return Err(AppError::bad_request("The owner cannot be removed from the team")
            .with_details("Delete the team instead"));
    }

    if !ctx
        .state
        .team
        .remove_member(&input.team_id, &input.user_id)
        .await?
    {
        return Err(AppError::not_found("Member not found"));
    }

    info!("User {} removed from team {}", input.user_id, input.team_id);
    Ok(())
}

#[instrument(skip(ctx), fields(team_id = %input.team_id))]
pub async fn leave(ctx: &Context, input: TeamIdInput) -> Result<(), AppError> {
    let session = ctx.require_session()?;
    let member = membership(ctx, &session.user_id, &input.team_id).await?;

    if member.is_owner() {
        warn!("Owner tried to leave team {}", input.team_id);
        return Err(AppError::bad_request("The owner cannot leave the team")
            .with_details("Delete the team instead"));
    }

    ctx.state
        .team
        .remove_member(&input.team_id, &session.user_id)
        .await?;
    debug!("User {} left team {}", session.user_id, input.team_id);
    Ok(())
}

#[instrument(skip(ctx), fields(team_id = %input.team_id))]
pub async fn delete(ctx: &Context, input: TeamIdInput) -> Result<(), AppError> {
    let session = ctx.require_session()?;
    let member = membership(ctx, &session.user_id, &input.team_id).await?;
    require_role(&member, &[TeamRole::Owner])?;

    if !ctx.state.team.delete(&input.team_id).await? {
        return Err(AppError::not_found("Team not found"));
    }

    info!("Team {} deleted", input.team_id);
    Ok(())
}

pub(crate) async fn dispatch(
    ctx: &Context,
    procedure: &str,
    input: Option<Value>,
) -> Result<Value, AppError> {
    match procedure {
        "list" => to_output(list(ctx).await?),
        "byId" => to_output(by_id(ctx, parse_input(input)?).await?),
        "create" => to_output(create(ctx, parse_input(input)?).await?),
        "addMember" => to_output(add_member(ctx, parse_input(input)?).await?),
        "removeMember" => to_output(remove_member(ctx, parse_input(input)?).await?),
        "leave" => to_output(leave(ctx, parse_input(input)?).await?),
        "delete" => to_output(delete(ctx, parse_input(input)?).await?),
        _ => Err(AppError::not_found("No procedure found on path")),
    }
}
