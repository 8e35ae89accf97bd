//! User DTOs - Data Transfer Objects per utenti e preferenze sui modelli

use super::non_blank;
use crate::entities::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Profilo utente esposto al client (mai la password)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub default_model: Option<String>,
    pub favorite_models: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            email: value.email,
            name: value.name,
            default_model: value.default_model,
            favorite_models: value.favorite_models,
            created_at: value.created_at,
        }
    }
}

/// DTO per creare un nuovo utente: body di sign-up e input del repository
/// (in quel caso `password` contiene già l'hash)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateUserDTO {
    #[validate(email(message = "Email is not valid"))]
    pub email: String,

    #[validate(custom(function = "non_blank"), length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,
}

/// DTO per il login (solo email e password)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignInDTO {
    pub email: String,
    pub password: String,
}

/// Aggiornamento delle preferenze sui modelli.
///
/// Entrambi i campi sono indipendenti e opzionali: un campo assente (o `null`)
/// significa "nessuna modifica", non "cancella il valore".
/// `toggle_favorite` aggiunge il modello ai preferiti se manca, lo toglie se c'è.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModelPreferencesInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Model id must be between 1 and 100 characters"))]
    pub default_model: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Model id must be between 1 and 100 characters"))]
    pub toggle_favorite: Option<String>,
}

impl UpdateModelPreferencesInput {
    pub fn is_noop(&self) -> bool {
        self.default_model.is_none() && self.toggle_favorite.is_none()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelPreferencesDTO {
    pub default_model: Option<String>,
    pub favorite_models: Vec<String>,
}

impl From<&User> for ModelPreferencesDTO {
    fn from(value: &User) -> Self {
        Self {
            default_model: value.default_model.clone(),
            favorite_models: value.favorite_models.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct UpdateProfileInput {
    #[validate(custom(function = "non_blank"), length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<UpdateModelPreferencesInput, String> {
        let input: UpdateModelPreferencesInput =
            serde_json::from_value(value).map_err(|e| e.to_string())?;
        input.validate().map_err(|e| e.to_string())?;
        Ok(input)
    }

    #[test]
    fn test_preferences_accepts_empty_object() {
        let input = parse(json!({})).unwrap();
        assert!(input.is_noop());
    }

    #[test]
    fn test_preferences_accepts_default_model_only() {
        let input = parse(json!({"defaultModel": "gpt-4"})).unwrap();
        assert_eq!(input.default_model.as_deref(), Some("gpt-4"));
        assert!(input.toggle_favorite.is_none());
    }

    #[test]
    fn test_preferences_accepts_toggle_only() {
        let input = parse(json!({"toggleFavorite": "gpt-4"})).unwrap();
        assert!(input.default_model.is_none());
        assert_eq!(input.toggle_favorite.as_deref(), Some("gpt-4"));
    }

    #[test]
    fn test_preferences_accepts_both() {
        let input = parse(json!({"defaultModel": "gpt-4", "toggleFavorite": "claude"})).unwrap();
        assert_eq!(input.default_model.as_deref(), Some("gpt-4"));
        assert_eq!(input.toggle_favorite.as_deref(), Some("claude"));
    }

    #[test]
    fn test_preferences_null_means_no_change() {
        let input = parse(json!({"defaultModel": null})).unwrap();
        assert!(input.is_noop());
    }

    #[test]
    fn test_preferences_rejects_non_string_fields() {
        assert!(parse(json!({"defaultModel": 4})).is_err());
        assert!(parse(json!({"toggleFavorite": true})).is_err());
        assert!(parse(json!({"defaultModel": ["gpt-4"]})).is_err());
        assert!(parse(json!({"defaultModel": "gpt-4", "toggleFavorite": {"id": "claude"}})).is_err());
    }

    #[test]
    fn test_create_user_validation() {
        let ok = CreateUserDTO {
            email: "dana@example.com".to_string(),
            name: "dana".to_string(),
            password: "Password123".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = CreateUserDTO {
            email: "not-an-email".to_string(),
            ..ok.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = CreateUserDTO {
            password: "short".to_string(),
            ..ok
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let sign_up = CreateUserDTO {
            email: "dana@example.com".to_string(),
            name: "   ".to_string(),
            password: "Password123".to_string(),
        };
        assert!(sign_up.validate().unwrap_err().field_errors().contains_key("name"));

        let profile = UpdateProfileInput {
            name: " \t ".to_string(),
        };
        assert!(profile.validate().unwrap_err().field_errors().contains_key("name"));
        assert!(UpdateProfileInput { name: " Dana ".to_string() }.validate().is_ok());
    }
}
