//! Record status values shared by the `categories` and `items` tables.
//!
//! Both tables soft-delete by flipping `status`; rows are never removed.

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_DELETED: &str = "deleted";
