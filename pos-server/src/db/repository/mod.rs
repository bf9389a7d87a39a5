//! Repository Module
//!
//! All SQL lives here. Every method takes the owning `company_id` and
//! scopes its statement by it; tenant isolation is enforced at this
//! layer, and a query without the filter is a correctness defect.
//!
//! No method opens a multi-statement transaction: the store contract
//! is per-statement atomicity, and cross-row consistency is the order
//! engine's responsibility (compensating rollback, conditional
//! update).

pub mod item;
pub mod order;

pub use item::ItemRepository;
pub use order::OrderRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => crate::utils::AppError::NotFound(msg),
            RepoError::Validation(msg) => crate::utils::AppError::Validation(msg),
            RepoError::Database(msg) => crate::utils::AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
