//! Sidekiq DTOs - Data Transfer Objects per gli assistenti

use super::{HEX_COLOR_RE, MODEL_ID_RE, non_blank};
use crate::entities::Sidekiq;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_SIDEKIQ_MODEL: &str = "gpt-4o";
pub const DEFAULT_AVATAR_COLOR: &str = "#6366f1";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SidekiqDTO {
    pub id: i32,
    pub owner_id: i32,
    pub team_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub instructions: String,
    pub model: String,
    pub avatar_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Sidekiq> for SidekiqDTO {
    fn from(value: Sidekiq) -> Self {
        Self {
            id: value.id,
            owner_id: value.owner_id,
            team_id: value.team_id,
            name: value.name,
            description: value.description,
            instructions: value.instructions,
            model: value.model,
            avatar_color: value.avatar_color,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListSidekiqsInput {
    #[serde(default)]
    pub team_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SidekiqIdInput {
    pub sidekiq_id: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSidekiqInput {
    #[validate(custom(function = "non_blank"), length(min = 1, max = 80, message = "Name must be between 1 and 80 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "non_blank"), length(min = 1, max = 10000, message = "Instructions must be between 1 and 10000 characters"))]
    pub instructions: String,

    #[serde(default)]
    #[validate(regex(path = *MODEL_ID_RE, message = "Model id is not valid"))]
    pub model: Option<String>,

    #[serde(default)]
    #[validate(regex(path = *HEX_COLOR_RE, message = "Avatar color must be #rrggbb"))]
    pub avatar_color: Option<String>,

    #[serde(default)]
    pub team_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSidekiqInput {
    pub sidekiq_id: i32,

    #[serde(default)]
    #[validate(custom(function = "non_blank"), length(min = 1, max = 80, message = "Name must be between 1 and 80 characters"))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "non_blank"), length(min = 1, max = 10000, message = "Instructions must be between 1 and 10000 characters"))]
    pub instructions: Option<String>,

    #[serde(default)]
    #[validate(regex(path = *MODEL_ID_RE, message = "Model id is not valid"))]
    pub model: Option<String>,

    #[serde(default)]
    #[validate(regex(path = *HEX_COLOR_RE, message = "Avatar color must be #rrggbb"))]
    pub avatar_color: Option<String>,
}

/// DTO per creare un nuovo sidekiq (senza id, con i default già risolti)
#[derive(Debug, Clone)]
pub struct CreateSidekiqDTO {
    pub owner_id: i32,
    pub team_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub instructions: String,
    pub model: String,
    pub avatar_color: String,
}

/// DTO per aggiornare un sidekiq (solo campi modificabili)
#[derive(Debug, Clone, Default)]
pub struct UpdateSidekiqDTO {
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub model: Option<String>,
    pub avatar_color: Option<String>,
}

impl UpdateSidekiqDTO {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.instructions.is_none()
            && self.model.is_none()
            && self.avatar_color.is_none()
    }
}

// il nome viene salvato senza spazi ai bordi, come in creazione
impl From<UpdateSidekiqInput> for UpdateSidekiqDTO {
    fn from(value: UpdateSidekiqInput) -> Self {
        Self {
            name: value.name.map(|name| name.trim().to_string()),
            description: value.description,
            instructions: value.instructions,
            model: value.model,
            avatar_color: value.avatar_color,
        }
    }
}
