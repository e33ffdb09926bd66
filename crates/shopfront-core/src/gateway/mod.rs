//! Remote catalog gateway.
//!
//! The remote catalog is authoritative for reads but does not persist writes,
//! so every call here is best-effort: callers decide how to degrade when a
//! request fails.

mod http;

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Item, ItemDraft, ItemId};

pub use http::HttpCatalogGateway;

/// Any failure to talk to the remote catalog.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfiguration(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Catalog returned an empty body (HTTP {0})")]
    EmptyBody(u16),
    #[error("Failed to parse catalog payload: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginToken {
    pub token: String,
}

impl fmt::Debug for LoginToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginToken")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Request/response surface of the remote catalog.
///
/// Implementations must be cheap to clone: mirror calls run on detached tasks
/// that own their own handle.
pub trait CatalogGateway: Clone + Send + Sync + 'static {
    /// `GET /products`
    fn list_items(&self) -> impl Future<Output = RemoteResult<Vec<Item>>> + Send;

    /// `GET /products/{id}`
    fn get_item(&self, id: ItemId) -> impl Future<Output = RemoteResult<Item>> + Send;

    /// `POST /products`
    fn create_item(&self, draft: &ItemDraft) -> impl Future<Output = RemoteResult<()>> + Send;

    /// `PUT /products/{id}`
    fn update_item(
        &self,
        id: ItemId,
        draft: &ItemDraft,
    ) -> impl Future<Output = RemoteResult<()>> + Send;

    /// `DELETE /products/{id}`
    fn delete_item(&self, id: ItemId) -> impl Future<Output = RemoteResult<()>> + Send;

    /// `POST /auth/login`
    fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> impl Future<Output = RemoteResult<LoginToken>> + Send;
}
