//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user registration, login, and logout.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use health_tracker_core::{Account, AccountStore, SessionUser};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::middleware::{session_id_from_headers, SESSION_COOKIE};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub username: String,
}

impl From<SessionUser> for UserResponse {
    fn from(user: SessionUser) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
        }
    }
}

//=========================================================================================
// Credentials
//=========================================================================================

/// Hashes a password into a salted argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            ApiError::Internal("Failed to hash password".to_string())
        })
}

/// Checks a password against a stored hash. An unparseable hash never verifies.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            error!("Failed to parse password hash: {:?}", e);
            false
        }
    }
}

/// Creates an account after validating the input and checking the username is free.
pub async fn register_account(
    accounts: &dyn AccountStore,
    username: &str,
    password: &str,
) -> Result<Account, ApiError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    if !accounts.find_by_username(username).await?.is_empty() {
        return Err(ApiError::Conflict(
            "Username already exists. Choose another one.".to_string(),
        ));
    }

    // The store rejects a username registered since the check above.
    let password_hash = hash_password(password)?;
    Ok(accounts.create_account(username, &password_hash).await?)
}

/// Returns the account whose username and password both match.
pub async fn authenticate(
    accounts: &dyn AccountStore,
    username: &str,
    password: &str,
) -> Result<Account, ApiError> {
    accounts
        .find_by_username(username)
        .await?
        .into_iter()
        .find(|account| verify_password(password, &account.password_hash))
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))
}

fn session_cookie(session_id: &str) -> String {
    format!(
        "{}={}; HttpOnly; Secure; SameSite=Lax; Path=/",
        SESSION_COOKIE, session_id
    )
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/register - Create a new user account
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created successfully", body = UserResponse),
        (status = 400, description = "Missing username or password"),
        (status = 409, description = "Username already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = register_account(state.accounts.as_ref(), &req.username, &req.password).await?;
    info!("Registered account {} ({})", account.username, account.id);

    let response = UserResponse::from(SessionUser::from(&account));
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /auth/login - Login with an existing account
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = authenticate(state.accounts.as_ref(), &req.username, &req.password).await?;

    let auth_session_id = Uuid::new_v4().to_string();
    state
        .sessions
        .create_auth_session(&auth_session_id, account.id)
        .await?;

    let user = SessionUser::from(&account);
    info!("User {} logged in", user.username);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&auth_session_id))],
        Json(UserResponse::from(user)),
    ))
}

/// POST /auth/logout - Logout and invalidate the session
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "No active session")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let auth_session_id = session_id_from_headers(&headers)
        .ok_or_else(|| ApiError::Unauthorized("No session found".to_string()))?;

    state.sessions.delete_auth_session(auth_session_id).await?;

    let cookie = format!(
        "{}=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE
    );
    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryAdapter;

    #[test]
    fn password_hash_verifies_only_the_same_password() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
        assert!(!verify_password("hunter2", "not-a-hash"));
    }

    #[tokio::test]
    async fn register_rejects_empty_fields_without_writing() {
        let store = MemoryAdapter::new();
        for (username, password) in [("", "pw"), ("   ", "pw"), ("alice", "")] {
            let err = register_account(&store, username, password).await.unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }
        assert!(store.find_by_username("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn register_reports_conflict_for_taken_username() {
        let store = MemoryAdapter::new();
        register_account(&store, "alice", "pw").await.unwrap();

        let err = register_account(&store, "alice", "other").await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(store.find_by_username("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn register_stores_a_hash_not_the_password() {
        let store = MemoryAdapter::new();
        let account = register_account(&store, "alice", "pw").await.unwrap();
        assert_ne!(account.password_hash, "pw");
    }

    #[tokio::test]
    async fn authenticate_requires_matching_password() {
        let store = MemoryAdapter::new();
        let created = register_account(&store, "alice", "pw").await.unwrap();

        let account = authenticate(&store, "alice", "pw").await.unwrap();
        assert_eq!(account.id, created.id);

        assert!(matches!(
            authenticate(&store, "alice", "wrong").await,
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            authenticate(&store, "nobody", "pw").await,
            Err(ApiError::Unauthorized(_))
        ));
    }
}
