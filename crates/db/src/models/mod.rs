//! Row models and DTOs, one module per table.

pub mod category;
pub mod item;
pub mod item_investment;
pub mod session;
pub mod user;
