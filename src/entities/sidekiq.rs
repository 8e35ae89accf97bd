//! Sidekiq entity - Assistente AI configurato dall'utente

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Sidekiq {
    pub id: i32,
    pub owner_id: i32,
    // se presente, il sidekiq è condiviso con tutti i membri del team
    pub team_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub instructions: String,
    pub model: String,
    pub avatar_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
