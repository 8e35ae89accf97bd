//! ThreadRepository - Repository per i thread di chat

use super::{Create, Delete, Read, Repository};
use crate::dtos::CreateThreadDTO;
use crate::entities::Thread;
use sqlx::{Error, PgPool};
use tracing::instrument;

const THREAD_COLUMNS: &str = "id, user_id, sidekiq_id, title, created_at, updated_at";

pub struct ThreadRepository {
    connection_pool: PgPool,
}

impl ThreadRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    /// Thread dell'utente, dal più recente
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        user_id: &i32,
        sidekiq_id: Option<&i32>,
    ) -> Result<Vec<Thread>, Error> {
        let query = format!(
            r#"
            SELECT {THREAD_COLUMNS}
            FROM threads
            WHERE user_id = $1 AND ($2::int IS NULL OR sidekiq_id = $2)
            ORDER BY updated_at DESC, id DESC
            "#
        );
        sqlx::query_as::<_, Thread>(&query)
            .bind(user_id)
            .bind(sidekiq_id.copied())
            .fetch_all(&self.connection_pool)
            .await
    }

    #[instrument(skip(self, title))]
    pub async fn rename(&self, id: &i32, title: &str) -> Result<Thread, Error> {
        let query = format!(
            "UPDATE threads SET title = $2, updated_at = NOW() WHERE id = $1 RETURNING {THREAD_COLUMNS}"
        );
        sqlx::query_as::<_, Thread>(&query)
            .bind(id)
            .bind(title)
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Repository for ThreadRepository {
    type Entity = Thread;
    type Id = i32;
}

impl Create<CreateThreadDTO> for ThreadRepository {
    #[instrument(skip(self, data), fields(user_id = %data.user_id))]
    async fn create(&self, data: &CreateThreadDTO) -> Result<Thread, Error> {
        let query = format!(
            "INSERT INTO threads (user_id, sidekiq_id, title) VALUES ($1, $2, $3) RETURNING {THREAD_COLUMNS}"
        );
        sqlx::query_as::<_, Thread>(&query)
            .bind(data.user_id)
            .bind(data.sidekiq_id)
            .bind(&data.title)
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Read for ThreadRepository {
    #[instrument(skip(self))]
    async fn read(&self, id: &i32) -> Result<Option<Thread>, Error> {
        let query = format!("SELECT {THREAD_COLUMNS} FROM threads WHERE id = $1");
        sqlx::query_as::<_, Thread>(&query)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Delete for ThreadRepository {
    /// I messaggi vengono rimossi da ON DELETE CASCADE
    #[instrument(skip(self))]
    async fn delete(&self, id: &i32) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM threads WHERE id = $1")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
