pub mod pool;
pub mod repos;

// Re-export commonly used items
pub use pool::{create_pool, run_migrations};
pub use repos::blog::{BlogRepo, BlogRow, BlogUpdate, BlogWithOwnerRow};
pub use repos::user::{UserRepo, UserRow};
