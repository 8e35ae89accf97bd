//! User entity - Entità utente con metodi per gestione password

use bcrypt::{DEFAULT_COST, Version, hash, hash_with_salt, verify};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub default_model: Option<String>,
    pub favorite_models: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Verify if target_password matches the stored hashed password
    pub fn verify_password(&self, target_password: &str) -> bool {
        verify(target_password, &self.password_hash).unwrap_or(false)
    }

    /// Hash a password using bcrypt with default cost
    pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
        hash(password, DEFAULT_COST)
    }

    /// Hash deterministico: stesso input, stesso hash. Usato solo per le fixture
    pub fn hash_password_with_salt(
        password: &str,
        cost: u32,
        salt: [u8; 16],
    ) -> Result<String, bcrypt::BcryptError> {
        Ok(hash_with_salt(password, cost, salt)?.format_for_version(Version::TwoB))
    }
}
