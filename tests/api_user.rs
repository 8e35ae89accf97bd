//! Integration tests per il sotto-router `user`
//!
//! Test per:
//! - user.me
//! - user.getModelPreferences
//! - user.updateModelPreferences
//! - user.updateProfile

mod common;

#[cfg(test)]
mod user_tests {
    use super::common::*;
    use axum::http::HeaderName;
    use serde_json::{Value, json};
    use sidekiq_server::dtos::{UpdateModelPreferencesInput, UpdateProfileInput};
    use sqlx::PgPool;

    fn alice(pool: PgPool) -> sidekiq_server::Caller {
        create_test_caller(create_test_state(pool), 1, "alice@example.com", "alice")
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_me_returns_session_user(pool: PgPool) -> sqlx::Result<()> {
        let user = alice(pool).user().me().await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.email, "alice@example.com");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_get_model_preferences(pool: PgPool) -> sqlx::Result<()> {
        let prefs = alice(pool).user().get_model_preferences().await.unwrap();

        assert_eq!(prefs.default_model.as_deref(), Some("gpt-4"));
        assert_eq!(prefs.favorite_models, vec!["gpt-4".to_string()]);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_set_default_model_only(pool: PgPool) -> sqlx::Result<()> {
        let caller = alice(pool);

        let prefs = caller
            .user()
            .update_model_preferences(UpdateModelPreferencesInput {
                default_model: Some("claude-3-5-sonnet".to_string()),
                toggle_favorite: None,
            })
            .await
            .unwrap();

        assert_eq!(prefs.default_model.as_deref(), Some("claude-3-5-sonnet"));
        // i preferiti non cambiano
        assert_eq!(prefs.favorite_models, vec!["gpt-4".to_string()]);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_toggle_favorite_twice_restores_list(pool: PgPool) -> sqlx::Result<()> {
        let caller = alice(pool);
        let toggle = || UpdateModelPreferencesInput {
            default_model: None,
            toggle_favorite: Some("claude-3-5-sonnet".to_string()),
        };

        let added = caller.user().update_model_preferences(toggle()).await.unwrap();
        assert_eq!(
            added.favorite_models,
            vec!["gpt-4".to_string(), "claude-3-5-sonnet".to_string()]
        );

        let removed = caller.user().update_model_preferences(toggle()).await.unwrap();
        assert_eq!(removed.favorite_models, vec!["gpt-4".to_string()]);
        assert_eq!(removed.default_model.as_deref(), Some("gpt-4"));

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_both_fields_in_one_call(pool: PgPool) -> sqlx::Result<()> {
        let caller = alice(pool);

        let prefs = caller
            .user()
            .update_model_preferences(UpdateModelPreferencesInput {
                default_model: Some("gpt-4o".to_string()),
                toggle_favorite: Some("gpt-4".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(prefs.default_model.as_deref(), Some("gpt-4o"));
        assert!(prefs.favorite_models.is_empty());

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_empty_update_is_noop_over_http(pool: PgPool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/api/trpc/user.updateModelPreferences")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", alice_token()),
            )
            .json(&json!({}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body["result"]["data"],
            json!({"defaultModel": "gpt-4", "favoriteModels": ["gpt-4"]})
        );

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_update_profile_trims_name(pool: PgPool) -> sqlx::Result<()> {
        let caller = alice(pool);

        let user = caller
            .user()
            .update_profile(UpdateProfileInput {
                name: "  Alice Liddell ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.name, "Alice Liddell");
        assert_eq!(caller.user().me().await.unwrap().name, "Alice Liddell");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_session_for_missing_user_is_not_found(pool: PgPool) -> sqlx::Result<()> {
        let caller = create_test_caller(create_test_state(pool), 99, "ghost@example.com", "ghost");

        let err = caller.user().me().await.unwrap_err();

        assert_eq!(err.code(), sidekiq_server::core::ErrorCode::NotFound);

        Ok(())
    }
}
