//! Reset and seed - riporta il database a uno stato noto prima dei test end-to-end
//!
//! Tutto avviene in una transazione: o il reset completa e le fixture sono
//! inserite, o non cambia nulla e l'errore viene propagato.
//! Id, timestamp e hash delle password sono fissi, quindi due esecuzioni
//! consecutive producono esattamente lo stesso stato.

use crate::core::AppError;
use crate::entities::{MessageRole, TeamRole, User};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{info, instrument};

/// Password di tutti gli utenti di fixture
pub const FIXTURE_PASSWORD: &str = "Password123!";

// costo minimo di bcrypt e salt fisso: l'hash è sempre lo stesso
const FIXTURE_HASH_COST: u32 = 4;
const FIXTURE_SALT: [u8; 16] = *b"sidekiq-fixtures";

// 2024-01-01T00:00:00Z
const FIXTURE_EPOCH_SECS: i64 = 1_704_067_200;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub teams: usize,
    pub team_members: usize,
    pub sidekiqs: usize,
    pub threads: usize,
    pub messages: usize,
    pub posts: usize,
}

struct FixtureUser {
    email: &'static str,
    name: &'static str,
    default_model: Option<&'static str>,
    favorite_models: &'static [&'static str],
}

const USERS: [FixtureUser; 3] = [
    FixtureUser {
        email: "alice@example.com",
        name: "Alice",
        default_model: Some("gpt-4o"),
        favorite_models: &["gpt-4o", "claude-3-5-sonnet"],
    },
    FixtureUser {
        email: "bob@example.com",
        name: "Bob",
        default_model: None,
        favorite_models: &[],
    },
    FixtureUser {
        email: "carol@example.com",
        name: "Carol",
        default_model: Some("claude-3-5-sonnet"),
        favorite_models: &["claude-3-5-sonnet"],
    },
];

// (name, owner_id)
const TEAMS: [(&str, i32); 1] = [("Acme", 1)];

// (team_id, user_id, role)
const TEAM_MEMBERS: [(i32, i32, TeamRole); 2] = [(1, 1, TeamRole::Owner), (1, 2, TeamRole::Member)];

struct FixtureSidekiq {
    owner_id: i32,
    team_id: Option<i32>,
    name: &'static str,
    description: Option<&'static str>,
    instructions: &'static str,
    model: &'static str,
    avatar_color: &'static str,
}

const SIDEKIQS: [FixtureSidekiq; 2] = [
    FixtureSidekiq {
        owner_id: 1,
        team_id: Some(1),
        name: "Code Reviewer",
        description: Some("Reviews pull requests for the Acme team"),
        instructions: "You review code changes. Point out bugs first, style last.",
        model: "gpt-4o",
        avatar_color: "#6366f1",
    },
    FixtureSidekiq {
        owner_id: 2,
        team_id: None,
        name: "Writing Coach",
        description: None,
        instructions: "Help me tighten my prose without changing my voice.",
        model: "claude-3-5-sonnet",
        avatar_color: "#10b981",
    },
];

// (user_id, sidekiq_id, title)
const THREADS: [(i32, Option<i32>, &str); 2] = [
    (1, Some(1), "Review PR #42"),
    (2, None, "Blog post draft"),
];

// (thread_id, role, content, model)
const MESSAGES: [(i32, MessageRole, &str, Option<&str>); 4] = [
    (
        1,
        MessageRole::System,
        "You review code changes. Point out bugs first, style last.",
        None,
    ),
    (1, MessageRole::User, "Can you look at the retry loop in worker.rs?", None),
    (
        1,
        MessageRole::Assistant,
        "The loop never resets its backoff after a success.",
        Some("gpt-4o"),
    ),
    (2, MessageRole::User, "Here is my first paragraph.", None),
];

// (name, created_by_id)
const POSTS: [(&str, i32); 1] = [("Welcome to Sidekiq", 1)];

fn fixture_time(offset_minutes: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(FIXTURE_EPOCH_SECS + offset_minutes * 60)
}

/// Hash deterministico della password di fixture
pub fn fixture_password_hash() -> Result<String, AppError> {
    Ok(User::hash_password_with_salt(
        FIXTURE_PASSWORD,
        FIXTURE_HASH_COST,
        FIXTURE_SALT,
    )?)
}

#[instrument(skip(pool))]
pub async fn reset_and_seed(pool: &PgPool) -> Result<SeedSummary, AppError> {
    let password_hash = fixture_password_hash()?;
    let created_at = fixture_time(0);

    let mut tx = pool.begin().await?;

    // RESTART IDENTITY riporta a 1 tutte le sequenze possedute dalle tabelle, post_id_seq compresa
    sqlx::query(
        "TRUNCATE TABLE messages, threads, sidekiqs, team_members, teams, posts, users RESTART IDENTITY CASCADE",
    )
    .execute(&mut *tx)
    .await?;

    let mut users: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO users (email, name, password_hash, default_model, favorite_models, created_at, updated_at) ",
    );
    users.push_values(USERS.iter(), |mut row, user| {
        let favorites: Vec<String> = user.favorite_models.iter().map(|m| m.to_string()).collect();
        row.push_bind(user.email)
            .push_bind(user.name)
            .push_bind(password_hash.clone())
            .push_bind(user.default_model)
            .push_bind(favorites)
            .push_bind(created_at)
            .push_bind(created_at);
    });
    users.build().execute(&mut *tx).await?;

    let mut teams: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO teams (name, owner_id, created_at) ");
    teams.push_values(TEAMS.iter(), |mut row, (name, owner_id)| {
        row.push_bind(*name).push_bind(*owner_id).push_bind(created_at);
    });
    teams.build().execute(&mut *tx).await?;

    let mut members: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO team_members (team_id, user_id, role, joined_at) ");
    members.push_values(TEAM_MEMBERS.iter().enumerate(), |mut row, (i, (team_id, user_id, role))| {
        row.push_bind(*team_id)
            .push_bind(*user_id)
            .push_bind(*role)
            .push_bind(fixture_time(i as i64));
    });
    members.build().execute(&mut *tx).await?;

    let mut sidekiqs: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO sidekiqs (owner_id, team_id, name, description, instructions, model, avatar_color, created_at, updated_at) ",
    );
    sidekiqs.push_values(SIDEKIQS.iter(), |mut row, s| {
        row.push_bind(s.owner_id)
            .push_bind(s.team_id)
            .push_bind(s.name)
            .push_bind(s.description)
            .push_bind(s.instructions)
            .push_bind(s.model)
            .push_bind(s.avatar_color)
            .push_bind(created_at)
            .push_bind(created_at);
    });
    sidekiqs.build().execute(&mut *tx).await?;

    let mut threads: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO threads (user_id, sidekiq_id, title, created_at, updated_at) ",
    );
    threads.push_values(THREADS.iter().enumerate(), |mut row, (i, (user_id, sidekiq_id, title))| {
        let at = fixture_time(10 + i as i64);
        row.push_bind(*user_id)
            .push_bind(*sidekiq_id)
            .push_bind(*title)
            .push_bind(at)
            .push_bind(at);
    });
    threads.build().execute(&mut *tx).await?;

    let mut messages: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO messages (thread_id, role, content, model, created_at) ");
    messages.push_values(
        MESSAGES.iter().enumerate(),
        |mut row, (i, (thread_id, role, content, model))| {
            row.push_bind(*thread_id)
                .push_bind(*role)
                .push_bind(*content)
                .push_bind(*model)
                .push_bind(fixture_time(20 + i as i64));
        },
    );
    messages.build().execute(&mut *tx).await?;

    let mut posts: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO posts (name, created_by_id, created_at, updated_at) ");
    posts.push_values(POSTS.iter(), |mut row, (name, created_by_id)| {
        row.push_bind(*name)
            .push_bind(*created_by_id)
            .push_bind(created_at)
            .push_bind(created_at);
    });
    posts.build().execute(&mut *tx).await?;

    tx.commit().await?;

    let summary = SeedSummary {
        users: USERS.len(),
        teams: TEAMS.len(),
        team_members: TEAM_MEMBERS.len(),
        sidekiqs: SIDEKIQS.len(),
        threads: THREADS.len(),
        messages: MESSAGES.len(),
        posts: POSTS.len(),
    };
    info!(?summary, "Fixture baseline loaded");
    Ok(summary)
}
