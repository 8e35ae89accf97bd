//! UserRepository - Repository per la gestione degli utenti

use super::{Create, Read, Repository};
use crate::dtos::{CreateUserDTO, UpdateModelPreferencesInput};
use crate::entities::User;
use sqlx::{Error, PgPool};
use tracing::{debug, instrument};

const USER_COLUMNS: &str =
    "id, email, name, password_hash, default_model, favorite_models, created_at, updated_at";

pub struct UserRepository {
    connection_pool: PgPool,
}

impl UserRepository {
    pub fn new(connection_pool: PgPool) -> UserRepository {
        Self { connection_pool }
    }

    /// L'email è univoca (vincolo UNIQUE), il confronto è case-insensitive
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.connection_pool)
            .await?;

        Ok(user)
    }

    /// Applica le preferenze in un'unica UPDATE:
    /// - `default_model` cambia solo se presente
    /// - `toggle_favorite` aggiunge o rimuove il modello da `favorite_models`
    #[instrument(skip(self, data), fields(user_id = %user_id))]
    pub async fn update_model_preferences(
        &self,
        user_id: &i32,
        data: &UpdateModelPreferencesInput,
    ) -> Result<User, Error> {
        debug!("Updating model preferences");
        let query = format!(
            r#"
            UPDATE users SET
                default_model = COALESCE($2, default_model),
                favorite_models = CASE
                    WHEN $3::text IS NULL THEN favorite_models
                    WHEN $3 = ANY(favorite_models) THEN array_remove(favorite_models, $3)
                    ELSE array_append(favorite_models, $3)
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .bind(&data.default_model)
            .bind(&data.toggle_favorite)
            .fetch_one(&self.connection_pool)
            .await
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn update_name(&self, user_id: &i32, name: &str) -> Result<User, Error> {
        let query = format!(
            "UPDATE users SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Repository for UserRepository {
    type Entity = User;
    type Id = i32;
}

impl Create<CreateUserDTO> for UserRepository {
    /// `data.password` deve già contenere l'hash bcrypt
    #[instrument(skip(self, data), fields(email = %data.email))]
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        let query = format!(
            "INSERT INTO users (email, name, password_hash) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&data.email)
            .bind(&data.name)
            .bind(&data.password)
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Read for UserRepository {
    #[instrument(skip(self))]
    async fn read(&self, id: &i32) -> Result<Option<User>, Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}
