//! Registration, login and session validation.
//!
//! Sessions are opaque random tokens stored server-side. Expiry is enforced
//! when a token is presented: a session that is still flagged active but past
//! its `expires_at` is invalidated on the spot and reported as expired.

use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use stockroom_core::error::CoreError;
use stockroom_core::session_token::{generate_session_token, is_expired, session_expiry};
use stockroom_db::models::session::{CreateSession, Session};
use stockroom_db::models::user::{CreateUser, User};
use stockroom_db::repositories::{SessionRepo, UserRepo};
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;

/// Failures of the authentication flow.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("Username or email is already taken")]
    DuplicateUser,

    /// Unknown user and wrong password are deliberately indistinguishable.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Session has been revoked")]
    SessionRevoked,

    #[error("Session has expired")]
    SessionExpired,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(msg) => AppError::Core(CoreError::Validation(msg)),
            AuthError::DuplicateUser => AppError::Core(CoreError::Conflict(err.to_string())),
            AuthError::InvalidCredentials
            | AuthError::SessionNotFound
            | AuthError::SessionRevoked
            | AuthError::SessionExpired => AppError::Core(CoreError::Unauthorized(err.to_string())),
            AuthError::Hashing(msg) => AppError::InternalError(msg),
            AuthError::Database(e) => AppError::Database(e),
        }
    }
}

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Create a new user account.
///
/// Input is validated before anything touches the database. Uniqueness of
/// username and email is left to the `uq_users_*` constraints.
pub async fn register(pool: &PgPool, input: &RegisterRequest) -> Result<User, AuthError> {
    input
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let password_hash =
        hash_password(&input.password).map_err(|e| AuthError::Hashing(e.to_string()))?;

    let create = CreateUser {
        username: input.username.clone(),
        email: input.email.clone(),
        password_hash,
    };

    let user = UserRepo::create(pool, &create).await.map_err(|e| {
        if is_unique_violation(&e) {
            AuthError::DuplicateUser
        } else {
            AuthError::Database(e)
        }
    })?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
}

/// Verify credentials and issue a new session lasting six hours.
///
/// Every login creates its own session; earlier sessions stay valid.
pub async fn login(pool: &PgPool, input: &LoginRequest) -> Result<Session, AuthError> {
    let Some(user) = UserRepo::find_by_username(pool, &input.username).await? else {
        tracing::info!("Login rejected: invalid credentials");
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(&input.password, &user.password_hash) {
        tracing::info!("Login rejected: invalid credentials");
        return Err(AuthError::InvalidCredentials);
    }

    let create = CreateSession {
        user_id: user.id,
        session_token: generate_session_token(),
        expires_at: session_expiry(Utc::now()),
    };
    let session = SessionRepo::create(pool, &create).await?;

    tracing::info!(user_id = user.id, "Session issued");
    Ok(session)
}

/// Resolve a session token to its user.
///
/// - unknown token: [`AuthError::SessionNotFound`]
/// - past `expires_at`: invalidated if still active, then [`AuthError::SessionExpired`]
/// - inactive: [`AuthError::SessionRevoked`]
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<User, AuthError> {
    let session = SessionRepo::find_by_token(pool, token)
        .await?
        .ok_or(AuthError::SessionNotFound)?;

    if is_expired(session.expires_at, Utc::now()) {
        if session.is_active && SessionRepo::invalidate(pool, token).await? {
            tracing::info!(user_id = session.user_id, "Expired session invalidated");
        }
        return Err(AuthError::SessionExpired);
    }

    if !session.is_active {
        return Err(AuthError::SessionRevoked);
    }

    UserRepo::find_by_id(pool, session.user_id)
        .await?
        .ok_or(AuthError::SessionNotFound)
}

/// Invalidate a session.
///
/// A token that is unknown or already inactive yields
/// [`AuthError::SessionNotFound`].
pub async fn logout(pool: &PgPool, token: &str) -> Result<(), AuthError> {
    if !SessionRepo::invalidate(pool, token).await? {
        return Err(AuthError::SessionNotFound);
    }
    tracing::info!("Session invalidated by logout");
    Ok(())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505")
}
