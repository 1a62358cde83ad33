//! Domain types and pure business logic for the Stockroom inventory backend.
//!
//! Nothing in this crate touches the database or the network; the `db` and
//! `api` crates build on it.

pub mod depreciation;
pub mod error;
pub mod items;
pub mod session_token;
pub mod status;
pub mod types;
