//! Error types for shopfront-core

use thiserror::Error;

use crate::gateway::RemoteError;
use crate::models::ItemId;

/// Result type alias using shopfront-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in shopfront-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Remote catalog could not be reached or answered with a failure
    #[error("Remote catalog unavailable: {0}")]
    RemoteUnavailable(#[from] RemoteError),

    /// Identifier unresolved in both the overlay and the remote catalog
    #[error("Product not found: {0}")]
    NotFound(ItemId),

    /// Mutation attempted against a deleted product
    #[error("Product {0} is deleted and cannot be edited")]
    Conflict(ItemId),

    /// Restore attempted on a product that is not deleted
    #[error("Product {0} is not deleted")]
    InvalidState(ItemId),

    /// Overlay store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
