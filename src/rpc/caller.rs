//! Caller - invocazione in-process delle procedure
//!
//! Stesse procedure, stessi errori e stessi output della superficie HTTP,
//! senza passare dalla rete. Usato dal codice server-side e dai test.

use super::router::{self, lookup};
use crate::core::{AppError, Context};
use crate::dtos::{
    AddTeamMemberInput, AppendMessageInput, CreateSidekiqInput, CreateTeamInput,
    CreateThreadInput, HealthStatusDTO, ListSidekiqsInput, ListThreadsInput, MessageDTO,
    ModelPreferencesDTO, RemoveTeamMemberInput, RenameThreadInput, SidekiqDTO, SidekiqIdInput,
    TeamDTO, TeamDetailsDTO, TeamIdInput, TeamMemberDTO, ThreadDTO, ThreadIdInput,
    ThreadWithMessagesDTO, UpdateModelPreferencesInput, UpdateProfileInput, UpdateSidekiqInput,
    UserDTO,
};
use crate::services::{health, sidekiq, team, thread, user};
use serde_json::Value;

/// Costruisce un caller legato al contesto fornito
pub fn create_caller(ctx: Context) -> Caller {
    Caller { ctx }
}

#[derive(Clone)]
pub struct Caller {
    ctx: Context,
}

impl Caller {
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn health(&self) -> HealthProcedures<'_> {
        HealthProcedures { ctx: &self.ctx }
    }

    pub fn thread(&self) -> ThreadProcedures<'_> {
        ThreadProcedures { ctx: &self.ctx }
    }

    pub fn user(&self) -> UserProcedures<'_> {
        UserProcedures { ctx: &self.ctx }
    }

    pub fn sidekiq(&self) -> SidekiqProcedures<'_> {
        SidekiqProcedures { ctx: &self.ctx }
    }

    pub fn team(&self) -> TeamProcedures<'_> {
        TeamProcedures { ctx: &self.ctx }
    }

    /// Invocazione per path con input JSON grezzo, come farebbe il trasporto HTTP.
    /// Il tipo della procedura è quello dichiarato, quindi non può esserci mismatch.
    pub async fn call(&self, path: &str, input: Option<Value>) -> Result<Value, AppError> {
        let (_, def) = lookup(path)?;
        router::dispatch(&self.ctx, path, def.kind, input).await
    }
}

pub struct HealthProcedures<'a> {
    ctx: &'a Context,
}

impl HealthProcedures<'_> {
    pub async fn check(&self) -> Result<HealthStatusDTO, AppError> {
        health::check(self.ctx).await
    }
}

pub struct UserProcedures<'a> {
    ctx: &'a Context,
}

impl UserProcedures<'_> {
    pub async fn me(&self) -> Result<UserDTO, AppError> {
        user::me(self.ctx).await
    }

    pub async fn get_model_preferences(&self) -> Result<ModelPreferencesDTO, AppError> {
        user::get_model_preferences(self.ctx).await
    }

    pub async fn update_model_preferences(
        &self,
        input: UpdateModelPreferencesInput,
    ) -> Result<ModelPreferencesDTO, AppError> {
        user::update_model_preferences(self.ctx, input).await
    }

    pub async fn update_profile(&self, input: UpdateProfileInput) -> Result<UserDTO, AppError> {
        user::update_profile(self.ctx, input).await
    }
}

pub struct TeamProcedures<'a> {
    ctx: &'a Context,
}

impl TeamProcedures<'_> {
    pub async fn list(&self) -> Result<Vec<TeamDTO>, AppError> {
        team::list(self.ctx).await
    }

    pub async fn by_id(&self, input: TeamIdInput) -> Result<TeamDetailsDTO, AppError> {
        team::by_id(self.ctx, input).await
    }

    pub async fn create(&self, input: CreateTeamInput) -> Result<TeamDTO, AppError> {
        team::create(self.ctx, input).await
    }

    pub async fn add_member(&self, input: AddTeamMemberInput) -> Result<TeamMemberDTO, AppError> {
        team::add_member(self.ctx, input).await
    }

    pub async fn remove_member(&self, input: RemoveTeamMemberInput) -> Result<(), AppError> {
        team::remove_member(self.ctx, input).await
    }

    pub async fn leave(&self, input: TeamIdInput) -> Result<(), AppError> {
        team::leave(self.ctx, input).await
    }

    pub async fn delete(&self, input: TeamIdInput) -> Result<(), AppError> {
        team::delete(self.ctx, input).await
    }
}

pub struct SidekiqProcedures<'a> {
    ctx: &'a Context,
}

impl SidekiqProcedures<'_> {
    pub async fn list(&self, input: ListSidekiqsInput) -> Result<Vec<SidekiqDTO>, AppError> {
        sidekiq::list(self.ctx, input).await
    }

    pub async fn by_id(&self, input: SidekiqIdInput) -> Result<SidekiqDTO, AppError> {
        sidekiq::by_id(self.ctx, input).await
    }

    pub async fn create(&self, input: CreateSidekiqInput) -> Result<SidekiqDTO, AppError> {
        sidekiq::create(self.ctx, input).await
    }

    pub async fn update(&self, input: UpdateSidekiqInput) -> Result<SidekiqDTO, AppError> {
        sidekiq::update(self.ctx, input).await
    }

    pub async fn delete(&self, input: SidekiqIdInput) -> Result<(), AppError> {
        sidekiq::delete(self.ctx, input).await
    }
}

pub struct ThreadProcedures<'a> {
    ctx: &'a Context,
}

impl ThreadProcedures<'_> {
    pub async fn list(&self, input: ListThreadsInput) -> Result<Vec<ThreadDTO>, AppError> {
        thread::list(self.ctx, input).await
    }

    pub async fn by_id(&self, input: ThreadIdInput) -> Result<ThreadWithMessagesDTO, AppError> {
        thread::by_id(self.ctx, input).await
    }

    pub async fn create(&self, input: CreateThreadInput) -> Result<ThreadDTO, AppError> {
        thread::create(self.ctx, input).await
    }

    pub async fn rename(&self, input: RenameThreadInput) -> Result<ThreadDTO, AppError> {
        thread::rename(self.ctx, input).await
    }

    pub async fn delete(&self, input: ThreadIdInput) -> Result<(), AppError> {
        thread::delete(self.ctx, input).await
    }

    pub async fn append_message(&self, input: AppendMessageInput) -> Result<MessageDTO, AppError> {
        thread::append_message(self.ctx, input).await
    }
}
