//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods that write more than
//! one statement open their own transaction.

pub mod category_repo;
pub mod item_investment_repo;
pub mod item_repo;
pub mod session_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use item_investment_repo::ItemInvestmentRepo;
pub use item_repo::ItemRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
