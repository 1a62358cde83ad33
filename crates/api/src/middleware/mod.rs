//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from the `token` session cookie.

pub mod auth;
