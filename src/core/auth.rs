use crate::core::AppError;
use crate::entities::{TeamMember, TeamRole};
use axum::http::{HeaderMap, header};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

/// Nome del cookie che trasporta il token di sessione
pub const SESSION_COOKIE: &str = "token";

/// Durata della sessione
pub const SESSION_TTL_HOURS: i64 = 24;

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub id: i32,
    pub email: String,
    pub name: String,
}

/// Utente autenticato della richiesta corrente, ricavato dal token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i32,
    pub email: String,
    pub name: String,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.id,
            email: claims.email,
            name: claims.name,
        }
    }
}

#[instrument(skip(secret), fields(user_id = %session.user_id))]
pub fn encode_jwt(session: &Session, secret: &str) -> Result<String, AppError> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let exp = (now + Duration::hours(SESSION_TTL_HOURS)).timestamp() as usize;
    let iat = now.timestamp() as usize;
    let claims = Claims {
        iat,
        exp,
        id: session.user_id,
        email: session.email.clone(),
        name: session.name.clone(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        error!("Failed to encode JWT token: {:?}", e);
        AppError::internal_server_error("Error in encoding jwt token")
    })
}

#[instrument(skip_all)]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<TokenData<Claims>, AppError> {
    decode::<Claims>(
        jwt_token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        AppError::unauthorized("Unable to decode token")
    })
}

/// Cerca il token prima nell'header `Authorization: Bearer`, poi nel cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());

    bearer.or_else(|| {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
            .map(|(_, value)| value.to_string())
    })
}

/// Ricava la sessione dalla richiesta. Token assente o non valido significa
/// richiesta anonima: sarà la procedura a rifiutarla se serve autenticazione.
pub fn session_from_headers(headers: &HeaderMap, secret: &str) -> Option<Session> {
    let token = extract_token(headers)?;
    decode_jwt(&token, secret)
        .ok()
        .map(|data| Session::from(data.claims))
}

/// Cookie HttpOnly con il token, valido quanto la sessione
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        token,
        SESSION_TTL_HOURS * 60 * 60
    )
}

/// Cookie con Max-Age=0 per forzare il logout lato client
pub fn expired_session_cookie() -> String {
    format!("{}=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE)
}

/// Helper per verificare che un membro del team abbia uno dei ruoli richiesti
///
/// # Returns
/// * `Ok(())` se il ruolo è permesso
/// * `Err(AppError)` FORBIDDEN se il ruolo non è tra quelli permessi
#[instrument(skip(member), fields(team_id = %member.team_id, user_id = %member.user_id, role = %member.role))]
pub fn require_role(member: &TeamMember, allowed_roles: &[TeamRole]) -> Result<(), AppError> {
    if !allowed_roles.contains(&member.role) {
        warn!(
            "User {} has insufficient role {}, required one of: {:?}",
            member.user_id, member.role, allowed_roles
        );
        return Err(AppError::forbidden("Insufficient role").with_details(format!(
            "This action requires one of the following roles: {:?}",
            allowed_roles
        )));
    }

    debug!("Role check passed with role {}", member.role);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "test-secret";

    fn alice() -> Session {
        Session {
            user_id: 1,
            email: "alice@example.com".to_string(),
            name: "alice".to_string(),
        }
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let token = encode_jwt(&alice(), SECRET).unwrap();
        let data = decode_jwt(&token, SECRET).unwrap();
        assert_eq!(Session::from(data.claims), alice());
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let token = encode_jwt(&alice(), SECRET).unwrap();
        let err = decode_jwt(&token, "another-secret").unwrap_err();
        assert_eq!(err.code(), crate::core::ErrorCode::Unauthorized);
    }

    #[test]
    fn test_session_from_bearer_header() {
        let token = encode_jwt(&alice(), SECRET).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        assert_eq!(session_from_headers(&headers, SECRET), Some(alice()));
    }

    #[test]
    fn test_session_from_cookie() {
        let token = encode_jwt(&alice(), SECRET).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; token={}", token)).unwrap(),
        );
        assert_eq!(session_from_headers(&headers, SECRET), Some(alice()));
    }

    #[test]
    fn test_invalid_or_missing_token_is_anonymous() {
        assert_eq!(session_from_headers(&HeaderMap::new(), SECRET), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer garbage"));
        assert_eq!(session_from_headers(&headers, SECRET), None);
    }

    #[test]
    fn test_require_role() {
        let member = TeamMember {
            team_id: 1,
            user_id: 2,
            role: TeamRole::Member,
            joined_at: Utc::now(),
        };
        assert!(require_role(&member, &[TeamRole::Owner, TeamRole::Member]).is_ok());
        let err = require_role(&member, &[TeamRole::Owner]).unwrap_err();
        assert_eq!(err.code(), crate::core::ErrorCode::Forbidden);
    }

    #[test]
    fn test_cookies_carry_expected_attributes() {
        assert!(session_cookie("abc").starts_with("token=abc; HttpOnly; Secure"));
        assert!(expired_session_cookie().ends_with("Max-Age=0"));
    }
}
