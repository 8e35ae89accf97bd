//! SidekiqRepository - Repository per gli assistenti configurati

use super::{Create, Delete, Read, Repository, Update};
use crate::dtos::{CreateSidekiqDTO, UpdateSidekiqDTO};
use crate::entities::Sidekiq;
use sqlx::{Error, PgPool};
use tracing::{debug, instrument};

const SIDEKIQ_COLUMNS: &str = "id, owner_id, team_id, name, description, instructions, model, avatar_color, created_at, updated_at";

pub struct SidekiqRepository {
    connection_pool: PgPool,
}

impl SidekiqRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    /// Sidekiq visibili all'utente: i propri più quelli condivisi nei suoi team.
    /// Con `team_id` restringe ai sidekiq di quel team.
    #[instrument(skip(self))]
    pub async fn list_accessible(
        &self,
        user_id: &i32,
        team_id: Option<&i32>,
    ) -> Result<Vec<Sidekiq>, Error> {
        let query = format!(
            r#"
            SELECT {SIDEKIQ_COLUMNS}
            FROM sidekiqs s
            WHERE (s.owner_id = $1
                   OR s.team_id IN (SELECT team_id FROM team_members WHERE user_id = $1))
              AND ($2::int IS NULL OR s.team_id = $2)
            ORDER BY s.updated_at DESC, s.id DESC
            "#
        );
        let sidekiqs = sqlx::query_as::<_, Sidekiq>(&query)
            .bind(user_id)
            .bind(team_id.copied())
            .fetch_all(&self.connection_pool)
            .await?;

        debug!("Found {} accessible sidekiqs", sidekiqs.len());
        Ok(sidekiqs)
    }
}

impl Repository for SidekiqRepository {
    type Entity = Sidekiq;
    type Id = i32;
}

impl Create<CreateSidekiqDTO> for SidekiqRepository {
    #[instrument(skip(self, data), fields(owner_id = %data.owner_id))]
    async fn create(&self, data: &CreateSidekiqDTO) -> Result<Sidekiq, Error> {
        let query = format!(
            r#"
            INSERT INTO sidekiqs (owner_id, team_id, name, description, instructions, model, avatar_color)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SIDEKIQ_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Sidekiq>(&query)
            .bind(data.owner_id)
            .bind(data.team_id)
            .bind(&data.name)
            .bind(&data.description)
            .bind(&data.instructions)
            .bind(&data.model)
            .bind(&data.avatar_color)
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Read for SidekiqRepository {
    #[instrument(skip(self))]
    async fn read(&self, id: &i32) -> Result<Option<Sidekiq>, Error> {
        let query = format!("SELECT {SIDEKIQ_COLUMNS} FROM sidekiqs WHERE id = $1");
        sqlx::query_as::<_, Sidekiq>(&query)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Update<UpdateSidekiqDTO> for SidekiqRepository {
    #[instrument(skip(self, data))]
    async fn update(&self, id: &i32, data: &UpdateSidekiqDTO) -> Result<Sidekiq, Error> {
        if data.is_empty() {
            debug!("No fields to update, returning current sidekiq");
            return self.read(id).await?.ok_or(Error::RowNotFound);
        }

        // QueryBuilder: solo i campi presenti finiscono nella SET
        let mut query_builder = sqlx::QueryBuilder::new("UPDATE sidekiqs SET updated_at = NOW()");
        if let Some(name) = &data.name {
            query_builder.push(", name = ").push_bind(name);
        }
        if let Some(description) = &data.description {
            query_builder.push(", description = ").push_bind(description);
        }
        if let Some(instructions) = &data.instructions {
            query_builder.push(", instructions = ").push_bind(instructions);
        }
        if let Some(model) = &data.model {
            query_builder.push(", model = ").push_bind(model);
        }
        if let Some(avatar_color) = &data.avatar_color {
            query_builder.push(", avatar_color = ").push_bind(avatar_color);
        }
        query_builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(SIDEKIQ_COLUMNS);

        query_builder
            .build_query_as::<Sidekiq>()
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Delete for SidekiqRepository {
    #[instrument(skip(self))]
    async fn delete(&self, id: &i32) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM sidekiqs WHERE id = $1")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
