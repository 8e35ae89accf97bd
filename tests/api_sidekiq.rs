//! Integration tests per il sotto-router `sidekiq`
//!
//! Fixtures: team 1 con alice owner e bob membro, sidekiq 1 di alice condiviso nel team.

mod common;

#[cfg(test)]
mod sidekiq_tests {
    use super::common::*;
    use sidekiq_server::core::ErrorCode;
    use sidekiq_server::dtos::sidekiq::{DEFAULT_AVATAR_COLOR, DEFAULT_SIDEKIQ_MODEL};
    use sidekiq_server::dtos::{
        CreateSidekiqInput, ListSidekiqsInput, SidekiqIdInput, UpdateSidekiqInput,
    };
    use sqlx::PgPool;

    fn new_sidekiq(name: &str) -> CreateSidekiqInput {
        CreateSidekiqInput {
            name: name.to_string(),
            description: None,
            instructions: "Answer briefly.".to_string(),
            model: None,
            avatar_color: None,
            team_id: None,
        }
    }

    fn rename(sidekiq_id: i32, name: &str) -> UpdateSidekiqInput {
        UpdateSidekiqInput {
            sidekiq_id,
            name: Some(name.to_string()),
            description: None,
            instructions: None,
            model: None,
            avatar_color: None,
        }
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_create_model_falls_back_to_user_default(pool: PgPool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let alice = create_test_caller(state.clone(), 1, "alice@example.com", "alice");
        let bob = create_test_caller(state, 2, "bob@example.com", "bob");

        // alice ha default_model = gpt-4
        let created = alice.sidekiq().create(new_sidekiq("Helper")).await.unwrap();
        assert_eq!(created.model, "gpt-4");
        assert_eq!(created.avatar_color, DEFAULT_AVATAR_COLOR);
        assert_eq!(created.owner_id, 1);

        // bob non ha un default: modello globale
        let created = bob.sidekiq().create(new_sidekiq("Helper")).await.unwrap();
        assert_eq!(created.model, DEFAULT_SIDEKIQ_MODEL);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "teams")))]
    async fn test_team_sidekiq_visibility(pool: PgPool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let bob = create_test_caller(state.clone(), 2, "bob@example.com", "bob");
        let charlie = create_test_caller(state, 3, "charlie@example.com", "charlie");

        let visible = bob.sidekiq().list(ListSidekiqsInput::default()).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Code Reviewer");
        assert!(bob.sidekiq().by_id(SidekiqIdInput { sidekiq_id: 1 }).await.is_ok());

        assert!(charlie.sidekiq().list(ListSidekiqsInput::default()).await.unwrap().is_empty());
        // fuori dal team il sidekiq non esiste
        let err = charlie
            .sidekiq()
            .by_id(SidekiqIdInput { sidekiq_id: 1 })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "teams")))]
    async fn test_list_filtered_by_team_requires_membership(pool: PgPool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let charlie = create_test_caller(state, 3, "charlie@example.com", "charlie");

        let err = charlie
            .sidekiq()
            .list(ListSidekiqsInput { team_id: Some(1) })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::Forbidden);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "teams")))]
    async fn test_create_in_foreign_team_is_forbidden(pool: PgPool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let charlie = create_test_caller(state, 3, "charlie@example.com", "charlie");

        let mut input = new_sidekiq("Intruder");
        input.team_id = Some(1);
        let err = charlie.sidekiq().create(input).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::Forbidden);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "teams")))]
    async fn test_update_is_owner_only_and_partial(pool: PgPool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let alice = create_test_caller(state.clone(), 1, "alice@example.com", "alice");
        let bob = create_test_caller(state, 2, "bob@example.com", "bob");

        let err = bob.sidekiq().update(rename(1, "Mine now")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);

        let updated = alice.sidekiq().update(rename(1, "  Senior Reviewer ")).await.unwrap();
        assert_eq!(updated.name, "Senior Reviewer");
        assert_eq!(updated.model, "gpt-4o");
        assert_eq!(updated.instructions, "Review code changes.");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "teams")))]
    async fn test_delete_keeps_threads(pool: PgPool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let alice = create_test_caller(state, 1, "alice@example.com", "alice");

        alice.sidekiq().delete(SidekiqIdInput { sidekiq_id: 1 }).await.unwrap();

        let err = alice
            .sidekiq()
            .by_id(SidekiqIdInput { sidekiq_id: 1 })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);

        let threads = alice.thread().list(Default::default()).await.unwrap();
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].sidekiq_id, None);

        Ok(())
    }
}
