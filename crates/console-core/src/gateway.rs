//! # Remote Resource Gateway
//!
//! The boundary between the console core and the remote HTTP resource API.
//! The core consumes this contract only: it never builds requests or parses
//! responses itself. Production code implements it over an HTTP client (see
//! the `users-console` crate); tests implement it with the in-memory gateways
//! in [`crate::mock`].
//!
//! # Failure signal
//! Every operation fails with a [`GatewayError`] whose `Display` output is the
//! opaque diagnostic the session stores and surfaces. The core never inspects
//! the error structurally; no failure is retried automatically.

use crate::entity::ConsoleEntity;
use async_trait::async_trait;

/// Remote operations on the managed collection.
///
/// * `list` returns the full ordered collection.
/// * `create` submits a draft and returns the created record with its
///   server-assigned id.
/// * `update` submits a full record (id included) and returns the updated one.
/// * `delete` removes a record by id.
#[async_trait]
pub trait ResourceGateway<T: ConsoleEntity>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>, GatewayError>;
    async fn create(&self, draft: T::Draft) -> Result<T, GatewayError>;
    async fn update(&self, record: T) -> Result<T, GatewayError>;
    async fn delete(&self, id: T::Id) -> Result<(), GatewayError>;
}

/// Errors reported by a gateway implementation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response (connect failure, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered outside the operation's success class.
    /// The body text is carried verbatim as the diagnostic.
    #[error("unexpected status {status}: {body}")]
    Rejected { status: u16, body: String },
}
