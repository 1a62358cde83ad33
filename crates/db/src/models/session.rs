//! Login session model and DTOs.

use sqlx::FromRow;
use stockroom_core::types::{DbId, Timestamp};

/// A session row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub session_token: String,
    pub expires_at: Timestamp,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new session. The token is generated server-side.
pub struct CreateSession {
    pub user_id: DbId,
    pub session_token: String,
    pub expires_at: Timestamp,
}
