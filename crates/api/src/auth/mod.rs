//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`cookie`] -- the `token` session cookie: parsing and `Set-Cookie` values.
//! - [`service`] -- registration, login, session validation and logout.

pub mod cookie;
pub mod password;
pub mod service;
