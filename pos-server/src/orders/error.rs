//! Order domain errors

use thiserror::Error;

use crate::db::repository::RepoError;
use crate::utils::AppError;

/// Engine errors. All are recoverable from the caller's perspective;
/// none terminate the process.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Malformed input: empty cart, non-positive quantity
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Cart references an item id the company does not own
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Refund target absent or cross-tenant
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Second refund of the same order. Distinct from success: the
    /// caller must handle it, not retry it.
    #[error("Order is already refunded: {0}")]
    AlreadyRefunded(String),

    /// Header or line-item write failed. Safe to retry the whole
    /// operation: the compensating delete leaves nothing partial.
    #[error("Order persistence failed: {0}")]
    Persistence(String),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(msg) => AppError::Validation(msg),
            OrderError::ItemNotFound(msg) => AppError::NotFound(msg),
            OrderError::OrderNotFound(msg) => AppError::NotFound(msg),
            OrderError::AlreadyRefunded(msg) => AppError::Conflict(msg),
            OrderError::Persistence(msg) => AppError::Database(msg),
            OrderError::Storage(e) => e.into(),
        }
    }
}
