//! Integration tests: stessi dati dallo store via HTTP e via caller in-process
//!
//! Test per:
//! - GET /api/trpc/user.getModelPreferences
//! - GET /api/trpc/team.byId
//! - GET /api/trpc/sidekiq.list
//! - GET /api/trpc/thread.byId

mod common;

#[cfg(test)]
mod equivalence_tests {
    use super::common::*;
    use axum::http::HeaderName;
    use serde::Serialize;
    use serde_json::Value;
    use sidekiq_server::dtos::{ListSidekiqsInput, TeamIdInput, ThreadIdInput};
    use sqlx::PgPool;

    /// `result.data` della risposta HTTP confrontato con il valore tipizzato serializzato
    async fn assert_same_data<T: Serialize>(
        server: &axum_test::TestServer,
        path: &str,
        input: Option<&str>,
        typed: T,
    ) {
        let mut request = server.get(&format!("/api/trpc/{path}")).add_header(
            HeaderName::from_static("authorization"),
            format!("Bearer {}", alice_token()),
        );
        if let Some(input) = input {
            request = request.add_query_param("input", input);
        }
        let response = request.await;
        response.assert_status_ok();

        let http: Value = response.json();
        assert_eq!(serde_json::to_value(typed).unwrap(), http["result"]["data"], "{path}");
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "teams")))]
    async fn test_model_preferences_match_over_http(pool: PgPool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let alice = create_test_caller(state, 1, "alice@example.com", "alice");

        let typed = alice.user().get_model_preferences().await.unwrap();
        assert_same_data(&server, "user.getModelPreferences", None, typed).await;

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "teams")))]
    async fn test_team_details_match_over_http(pool: PgPool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let alice = create_test_caller(state, 1, "alice@example.com", "alice");

        let typed = alice.team().by_id(TeamIdInput { team_id: 1 }).await.unwrap();
        assert_eq!(typed.members.len(), 2);
        assert_same_data(&server, "team.byId", Some(r#"{"teamId":1}"#), typed).await;

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "teams")))]
    async fn test_sidekiq_list_and_thread_match_over_http(pool: PgPool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());
        let alice = create_test_caller(state, 1, "alice@example.com", "alice");

        let sidekiqs = alice.sidekiq().list(ListSidekiqsInput::default()).await.unwrap();
        assert_same_data(&server, "sidekiq.list", None, sidekiqs).await;

        let thread = alice.thread().by_id(ThreadIdInput { thread_id: 1 }).await.unwrap();
        assert_eq!(thread.messages.len(), 1);
        assert_same_data(&server, "thread.byId", Some(r#"{"threadId":1}"#), thread).await;

        Ok(())
    }
}
