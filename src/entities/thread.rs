//! Thread entity - Conversazione di un utente, opzionalmente legata a un sidekiq

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Thread {
    pub id: i32,
    pub user_id: i32,
    pub sidekiq_id: Option<i32>,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
