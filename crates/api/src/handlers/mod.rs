pub mod auth;
pub mod category;
pub mod investment;
pub mod item;
