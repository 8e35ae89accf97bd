//! MessageRepository - Repository per la gestione dei messaggi

use super::{Create, Repository};
use crate::dtos::CreateMessageDTO;
use crate::entities::Message;
use sqlx::{Error, PgPool};
use tracing::instrument;

pub struct MessageRepository {
    connection_pool: PgPool,
}

impl MessageRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    /// Get all messages for a specific thread, ordered by creation time
    #[instrument(skip(self))]
    pub async fn find_many_by_thread_id(&self, thread_id: &i32) -> Result<Vec<Message>, Error> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, thread_id, role, content, model, created_at
            FROM messages
            WHERE thread_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(thread_id)
        .fetch_all(&self.connection_pool)
        .await
    }
}

impl Repository for MessageRepository {
    type Entity = Message;
    type Id = i32;
}

impl Create<CreateMessageDTO> for MessageRepository {
    /// Inserisce il messaggio e aggiorna `updated_at` del thread nella stessa transazione
    #[instrument(skip(self, data), fields(thread_id = %data.thread_id, role = %data.role))]
    async fn create(&self, data: &CreateMessageDTO) -> Result<Message, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (thread_id, role, content, model)
            VALUES ($1, $2, $3, $4)
            RETURNING id, thread_id, role, content, model, created_at
            "#,
        )
        .bind(data.thread_id)
        .bind(data.role)
        .bind(&data.content)
        .bind(&data.model)
        .fetch_one(&mut *tx)
        .await?;

        // il thread sale in cima alla lista
        sqlx::query("UPDATE threads SET updated_at = NOW() WHERE id = $1")
            .bind(data.thread_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(message)
    }
}
