//! Team entity - Team/workspace e relativa membership

use super::enums::TeamRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct TeamMember {
    pub team_id: i32,
    pub user_id: i32,
    pub role: TeamRole,
    pub joined_at: DateTime<Utc>,
}

impl TeamMember {
    pub fn is_owner(&self) -> bool {
        self.role == TeamRole::Owner
    }
}
