//! Auth services - registrazione, login e logout con password

use crate::core::auth::{Session, encode_jwt, expired_session_cookie, session_cookie};
use crate::core::{AppError, AppState};
use crate::dtos::{CreateUserDTO, SignInDTO, UserDTO};
use crate::entities::User;
use crate::repositories::Create;
use axum::{
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

fn header_value(value: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(value)
        .map_err(|_| AppError::internal_server_error("Failed to build response headers"))
}

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserDTO>,
) -> Result<(StatusCode, Json<UserDTO>), AppError> {
    // 1. Validare il DTO (email, lunghezza nome e password)
    // 2. Se esiste già un utente con la stessa email, CONFLICT
    // 3. Salvare l'utente con la password hashata
    body.validate()?;

    if state.user.find_by_email(&body.email).await?.is_some() {
        warn!("Sign-up with an email already in use");
        return Err(AppError::conflict("Email already registered"));
    }

    let password_hash = User::hash_password(&body.password)?;

    let new_user = CreateUserDTO {
        email: body.email.trim().to_lowercase(),
        name: body.name.trim().to_string(),
        password: password_hash,
    };

    let created_user = state.user.create(&new_user).await?;

    info!("User {} registered", created_user.id);
    Ok((StatusCode::CREATED, Json(UserDTO::from(created_user))))
}

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignInDTO>,
) -> Result<impl IntoResponse, AppError> {
    // 1. Cercare l'utente tramite email, se non esiste UNAUTHORIZED
    // 2. Verificare la password contro l'hash memorizzato
    // 3. Generare il token e restituirlo sia come cookie HttpOnly che come header Authorization
    let user = match state.user.find_by_email(&body.email).await? {
        Some(user) => user,
        None => {
            warn!("Sign-in for unknown email");
            return Err(AppError::unauthorized("Invalid email or password"));
        }
    };

    if !user.verify_password(&body.password) {
        warn!("Wrong password for user {}", user.id);
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    let session = Session {
        user_id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
    };
    let token = encode_jwt(&session, &state.jwt_secret)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, header_value(&session_cookie(&token))?);
    headers.insert(
        header::AUTHORIZATION,
        header_value(&format!("Bearer {}", token))?,
    );

    info!("User {} signed in", user.id);
    Ok((StatusCode::OK, headers, Json(UserDTO::from(user))))
}

/// Il token è stateless: il logout consiste nel far scadere il cookie lato client
pub async fn sign_out() -> Result<impl IntoResponse, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, header_value(&expired_session_cookie())?);
    Ok((StatusCode::OK, headers))
}
