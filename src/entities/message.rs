//! Message entity - Entità messaggio

use super::enums::MessageRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Message {
    pub id: i32,
    pub thread_id: i32,
    pub role: MessageRole,
    pub content: String,
    // modello che ha generato la risposta, solo per i messaggi dell'assistente
    pub model: Option<String>,
    pub created_at: DateTime<Utc>,
}
