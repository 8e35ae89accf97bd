//! Thread services - conversazioni dell'utente e relativi messaggi

use super::sidekiq::load_accessible;
use crate::core::{AppError, Context, Session};
use crate::dtos::thread::DEFAULT_THREAD_TITLE;
use crate::dtos::{
    AppendMessageInput, CreateMessageDTO, CreateThreadDTO, CreateThreadInput, ListThreadsInput,
    MessageDTO, RenameThreadInput, ThreadDTO, ThreadIdInput, ThreadWithMessagesDTO,
};
use crate::entities::Thread;
use crate::repositories::{Create, Delete, Read};
use crate::rpc::{ProcedureDef, mutation, parse_input, query, to_output};
use futures::future::try_join;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

pub const PROCEDURES: &[ProcedureDef] = &[
    query("list"),
    query("byId"),
    mutation("create"),
    mutation("rename"),
    mutation("delete"),
    mutation("appendMessage"),
];

/// I thread sono privati: quelli di altri utenti rispondono NOT_FOUND
fn ensure_owner(thread: Option<Thread>, session: &Session) -> Result<Thread, AppError> {
    match thread {
        Some(thread) if thread.user_id == session.user_id => Ok(thread),
        Some(thread) => {
            warn!("User {} tried to access thread {}", session.user_id, thread.id);
            Err(AppError::not_found("Thread not found"))
        }
        None => Err(AppError::not_found("Thread not found")),
    }
}

async fn load_owned(ctx: &Context, session: &Session, thread_id: &i32) -> Result<Thread, AppError> {
    let thread = ctx.state.thread.read(thread_id).await?;
    ensure_owner(thread, session)
}

#[instrument(skip(ctx))]
pub async fn list(ctx: &Context, input: ListThreadsInput) -> Result<Vec<ThreadDTO>, AppError> {
    let session = ctx.require_session()?;
    let threads = ctx
        .state
        .thread
        .list_for_user(&session.user_id, input.sidekiq_id.as_ref())
        .await?;

    debug!("Found {} threads", threads.len());
    Ok(threads.into_iter().map(ThreadDTO::from).collect())
}

#[instrument(skip(ctx))]
pub async fn by_id(ctx: &Context, input: ThreadIdInput) -> Result<ThreadWithMessagesDTO, AppError> {
    let session = ctx.require_session()?;

    // thread e messaggi in parallelo, la verifica di ownership avviene prima di rispondere
    let (thread, messages) = try_join(
        ctx.state.thread.read(&input.thread_id),
        ctx.state.msg.find_many_by_thread_id(&input.thread_id),
    )
    .await?;
    let thread = ensure_owner(thread, session)?;

    Ok(ThreadWithMessagesDTO {
        thread: ThreadDTO::from(thread),
        messages: messages.into_iter().map(MessageDTO::from).collect(),
    })
}

#[instrument(skip(ctx, input), fields(sidekiq_id = ?input.sidekiq_id))]
pub async fn create(ctx: &Context, input: CreateThreadInput) -> Result<ThreadDTO, AppError> {
    let session = ctx.require_session()?;
    input.validate()?;

    if let Some(sidekiq_id) = &input.sidekiq_id {
        load_accessible(ctx, session, sidekiq_id).await?;
    }

    let title = input
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_THREAD_TITLE.to_string());

    let thread = ctx
        .state
        .thread
        .create(&CreateThreadDTO {
            user_id: session.user_id,
            sidekiq_id: input.sidekiq_id,
            title,
        })
        .await?;

    info!("Thread {} created", thread.id);
    Ok(ThreadDTO::from(thread))
}

#[instrument(skip(ctx, input), fields(thread_id = %input.thread_id))]
pub async fn rename(ctx: &Context, input: RenameThreadInput) -> Result<ThreadDTO, AppError> {
    let session = ctx.require_session()?;
    input.validate()?;

    let thread = load_owned(ctx, session, &input.thread_id).await?;
    let thread = ctx.state.thread.rename(&thread.id, input.title.trim()).await?;
    Ok(ThreadDTO::from(thread))
}

#[instrument(skip(ctx))]
pub async fn delete(ctx: &Context, input: ThreadIdInput) -> Result<(), AppError> {
    let session = ctx.require_session()?;
    let thread = load_owned(ctx, session, &input.thread_id).await?;

    ctx.state.thread.delete(&thread.id).await?;
    info!("Thread {} deleted", thread.id);
    Ok(())
}

#[instrument(skip(ctx, input), fields(thread_id = %input.thread_id, role = %input.role))]
pub async fn append_message(
    ctx: &Context,
    input: AppendMessageInput,
) -> Result<MessageDTO, AppError> {
    let session = ctx.require_session()?;
    input.validate()?;

    let thread = load_owned(ctx, session, &input.thread_id).await?;
    let message = ctx
        .state
        .msg
        .create(&CreateMessageDTO {
            thread_id: thread.id,
            role: input.role,
            content: input.content,
            model: input.model,
        })
        .await?;

    debug!("Message {} appended", message.id);
    Ok(MessageDTO::from(message))
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
        "rename" => to_output(rename(ctx, parse_input(input)?).await?),
        "delete" => to_output(delete(ctx, parse_input(input)?).await?),
        "appendMessage" => to_output(append_message(ctx, parse_input(input)?).await?),
        _ => Err(AppError::not_found("No procedure found on path")),
    }
}
