//! TeamRepository - Repository per team e membership

use super::{Delete, Read, Repository};
use crate::dtos::{TeamDTO, TeamMemberDTO};
use crate::entities::{Team, TeamMember, TeamRole};
use sqlx::{Error, PgPool};
use tracing::{debug, info, instrument};

pub struct TeamRepository {
    connection_pool: PgPool,
}

impl TeamRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    /// Crea il team e registra il creatore come owner nella stessa transazione
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn create_with_owner(&self, name: &str, owner_id: &i32) -> Result<Team, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let team = sqlx::query_as::<_, Team>(
            "INSERT INTO teams (name, owner_id) VALUES ($1, $2) RETURNING id, name, owner_id, created_at",
        )
        .bind(name)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO team_members (team_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(team.id)
            .bind(owner_id)
            .bind(TeamRole::Owner)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("Team {} created", team.id);
        Ok(team)
    }

    /// Tutti i team di cui l'utente è membro, con il suo ruolo
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: &i32) -> Result<Vec<TeamDTO>, Error> {
        let teams = sqlx::query_as::<_, TeamDTO>(
            r#"
            SELECT t.id, t.name, t.owner_id, t.created_at, tm.role
            FROM teams t
            INNER JOIN team_members tm ON tm.team_id = t.id
            WHERE tm.user_id = $1
            ORDER BY t.name ASC, t.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("User is member of {} teams", teams.len());
        Ok(teams)
    }

    #[instrument(skip(self))]
    pub async fn find_member(
        &self,
        team_id: &i32,
        user_id: &i32,
    ) -> Result<Option<TeamMember>, Error> {
        sqlx::query_as::<_, TeamMember>(
            "SELECT team_id, user_id, role, joined_at FROM team_members WHERE team_id = $1 AND user_id = $2",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(&self.connection_pool)
        .await
    }

    /// Membri del team, owner per primo
    #[instrument(skip(self))]
    pub async fn list_members(&self, team_id: &i32) -> Result<Vec<TeamMemberDTO>, Error> {
        sqlx::query_as::<_, TeamMemberDTO>(
            r#"
            SELECT u.id AS user_id, u.name, u.email, tm.role, tm.joined_at
            FROM team_members tm
            INNER JOIN users u ON u.id = tm.user_id
            WHERE tm.team_id = $1
            ORDER BY (tm.role = 'owner') DESC, tm.joined_at ASC, u.id ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    #[instrument(skip(self))]
    pub async fn add_member(
        &self,
        team_id: &i32,
        user_id: &i32,
        role: TeamRole,
    ) -> Result<TeamMember, Error> {
        sqlx::query_as::<_, TeamMember>(
            r#"
            INSERT INTO team_members (team_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING team_id, user_id, role, joined_at
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.connection_pool)
        .await
    }

    /// Ritorna `true` se la membership esisteva
    #[instrument(skip(self))]
    pub async fn remove_member(&self, team_id: &i32, user_id: &i32) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND user_id = $2")
            .bind(team_id)
            .bind(user_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl Repository for TeamRepository {
    type Entity = Team;
    type Id = i32;
}

impl Read for TeamRepository {
    #[instrument(skip(self))]
    async fn read(&self, id: &i32) -> Result<Option<Team>, Error> {
        sqlx::query_as::<_, Team>("SELECT id, name, owner_id, created_at FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Delete for TeamRepository {
    /// ON DELETE CASCADE rimuove le membership, i sidekiq del team restano al loro owner
    #[instrument(skip(self))]
    async fn delete(&self, id: &i32) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
