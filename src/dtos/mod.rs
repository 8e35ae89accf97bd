//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I tipi `*Input` sono gli input delle procedure RPC (camelCase sul filo),
//! i tipi `Create*DTO`/`Update*DTO` sono quelli passati ai repository.

pub mod health;
pub mod sidekiq;
pub mod team;
pub mod thread;
pub mod user;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Identificatore di un modello: "gpt-4", "claude-3-5-sonnet", "openai/gpt-4o:latest"
    pub static ref MODEL_ID_RE: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._:/-]{0,99}$").unwrap();
    /// Colore esadecimale "#rrggbb"
    pub static ref HEX_COLOR_RE: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

/// Nomi e titoli vengono salvati dopo il trim: solo spazi equivale a vuoto
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must contain at least one non-whitespace character".into());
        return Err(err);
    }
    Ok(())
}

// Re-exports per facilitare l'import
pub use health::HealthStatusDTO;
pub use sidekiq::{
    CreateSidekiqDTO, CreateSidekiqInput, ListSidekiqsInput, SidekiqDTO, SidekiqIdInput,
    UpdateSidekiqDTO, UpdateSidekiqInput,
};
pub use team::{
    AddTeamMemberInput, CreateTeamInput, RemoveTeamMemberInput, TeamDTO, TeamDetailsDTO,
    TeamIdInput, TeamMemberDTO,
};
pub use thread::{
    AppendMessageInput, CreateMessageDTO, CreateThreadDTO, CreateThreadInput, ListThreadsInput,
    MessageDTO, RenameThreadInput, ThreadDTO, ThreadIdInput, ThreadWithMessagesDTO,
};
pub use user::{
    CreateUserDTO, ModelPreferencesDTO, SignInDTO, UpdateModelPreferencesInput,
    UpdateProfileInput, UserDTO,
};
