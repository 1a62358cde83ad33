//! Opaque session tokens and session lifetime rules.
//!
//! Tokens are 32 bytes drawn from the thread-local CSPRNG and hex-encoded,
//! giving 256 bits of entropy. They are generated server-side only.

use rand::RngCore;

use crate::types::Timestamp;

/// Number of random bytes in a session token.
pub const TOKEN_BYTES: usize = 32;

/// Fixed lifetime of a session issued at login.
pub const SESSION_LIFETIME_HOURS: i64 = 6;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "token";

/// Generate a new random session token (64 lowercase hex characters).
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Expiry timestamp for a session issued at `issued_at`.
pub fn session_expiry(issued_at: Timestamp) -> Timestamp {
    issued_at + chrono::Duration::hours(SESSION_LIFETIME_HOURS)
}

/// A session is live iff it is active and `now` is strictly before expiry.
pub fn is_session_live(is_active: bool, expires_at: Timestamp, now: Timestamp) -> bool {
    is_active && now < expires_at
}

/// A session that is still flagged active but whose expiry has passed.
///
/// These must be invalidated when they are next presented.
pub fn is_expired(expires_at: Timestamp, now: Timestamp) -> bool {
    expires_at <= now
}
