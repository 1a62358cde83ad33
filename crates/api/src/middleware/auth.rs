//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;

use crate::auth::cookie::session_token_from_headers;
use crate::auth::service::validate_session;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the `token` cookie.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// A missing cookie and an invalid, revoked or expired session all reject
/// with a JSON 401.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
    /// The presented session token, needed by logout.
    pub session_token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token_from_headers(&parts.headers)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing session cookie".into()))
            })?
            .to_string();

        let user = validate_session(&state.pool, &token).await?;

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
            session_token: token,
        })
    }
}
