//! # spothub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `spothub-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! Deleting a spot relies on `ON DELETE CASCADE` (foreign keys are enabled on
//! every connection) to remove its images and reviews.
//!
//! ## Dependency rule
//! Depends on `spothub-app` (for port traits) and `spothub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod columns;
mod error;
mod pool;
mod review_repo;
mod spot_image_repo;
mod spot_repo;
mod user_repo;

#[cfg(test)]
mod testing;

pub use error::StorageError;
pub use pool::Database;
pub use review_repo::SqliteReviewRepository;
pub use spot_image_repo::SqliteSpotImageRepository;
pub use spot_repo::SqliteSpotRepository;
pub use user_repo::SqliteUserRepository;
