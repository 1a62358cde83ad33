//! Repository for the `sessions` table.

use sqlx::PgPool;

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, session_token, expires_at, is_active, created_at";

/// Provides persistence for login sessions.
///
/// Sessions are never deleted; invalidation flips `is_active` so the row is
/// kept for audit. Expiry is not enforced here -- callers decide liveness
/// from `is_active` and `expires_at` at read time.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, session_token, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.user_id)
            .bind(&input.session_token)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a session by its token, whatever its state.
    pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE session_token = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Mark an active session inactive. Returns `true` if a row was updated.
    ///
    /// Already-inactive or unknown tokens affect zero rows and return `false`,
    /// so of two concurrent calls exactly one reports success.
    pub async fn invalidate(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET is_active = false
             WHERE session_token = $1 AND is_active = true",
        )
        .bind(token)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
