//! Team DTOs - Data Transfer Objects per team e membership

use super::non_blank;
use crate::entities::{Team, TeamRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Team visto dall'utente corrente, con il suo ruolo
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamDTO {
    pub id: i32,
    pub name: String,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    pub role: TeamRole,
}

impl TeamDTO {
    pub fn from_team(team: Team, role: TeamRole) -> Self {
        Self {
            id: team.id,
            name: team.name,
            owner_id: team.owner_id,
            created_at: team.created_at,
            role,
        }
    }
}

/// Membro di un team con i dati utente necessari alla UI
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDTO {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub role: TeamRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeamDetailsDTO {
    pub team: TeamDTO,
    pub members: Vec<TeamMemberDTO>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateTeamInput {
    #[validate(custom(function = "non_blank"), length(min = 1, max = 100, message = "Team name must be between 1 and 100 characters"))]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeamIdInput {
    pub team_id: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddTeamMemberInput {
    pub team_id: i32,

    #[validate(email(message = "Email is not valid"))]
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTeamMemberInput {
    pub team_id: i32,
    pub user_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_team_rejects_blank_name() {
        let input: CreateTeamInput = serde_json::from_value(json!({"name": "   "})).unwrap();
        assert!(input.validate().unwrap_err().field_errors().contains_key("name"));

        let input: CreateTeamInput = serde_json::from_value(json!({"name": " Acme "})).unwrap();
        assert!(input.validate().is_ok());
    }
}
