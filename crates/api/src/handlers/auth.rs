//! Handlers for the `/auth` resource (register, login, logout).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use stockroom_core::types::{DbId, Timestamp};
use stockroom_db::models::user::UserResponse;

use crate::auth::cookie::{cleared_session_cookie, session_cookie};
use crate::auth::service::{self, LoginRequest, RegisterRequest};
use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/auth/register
///
/// Create an account. Returns 201 with the public user fields.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = service::register(&state.pool, &input).await?;
    Ok(ApiResponse::created(
        "User registered successfully",
        UserResponse::from(user),
    ))
}

/// Login response body. The token itself only travels in the cookie.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user_id: DbId,
    pub expires_at: Timestamp,
}

/// POST /api/auth/login
///
/// Authenticate with username + password. Sets the `token` cookie and returns
/// the session owner and expiry in the body.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> AppResult<([(axum::http::HeaderName, String); 1], Json<ApiResponse<SessionInfo>>)> {
    let session = service::login(&state.pool, &input).await?;
    let cookie = session_cookie(&session.session_token, state.config.cookie_secure);
    let info = SessionInfo {
        user_id: session.user_id,
        expires_at: session.expires_at,
    };
    Ok(([(SET_COOKIE, cookie)], ApiResponse::ok("Login successful", info)))
}

/// POST /api/auth/logout
///
/// Invalidate the caller's session and clear the cookie.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<([(axum::http::HeaderName, String); 1], Json<ApiResponse<()>>)> {
    service::logout(&state.pool, &auth_user.session_token).await?;
    tracing::info!(user_id = auth_user.user_id, "User logged out");
    Ok((
        [(SET_COOKIE, cleared_session_cookie(state.config.cookie_secure))],
        ApiResponse::message("Logout successful"),
    ))
}
