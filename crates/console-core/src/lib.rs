//! # Console Core
//!
//! Building blocks for a client-resident administrative console over a remote
//! HTTP resource collection: list, create, edit, delete. This crate is the
//! state and orchestration layer only: it owns no HTTP code and renders no
//! pixels. A sibling crate supplies the entity model and the gateway; a
//! renderer consumes the projection.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into four layers:
//!
//! 1. **Entity Layer** ([`ConsoleEntity`]) - the managed record type, its
//!    draft shape, validation rules and edit-merge behavior.
//! 2. **Gateway Layer** ([`ResourceGateway`]) - the remote API boundary,
//!    consumed as a contract and implemented elsewhere (or by [`mock`]).
//! 3. **Session Layer** ([`ConsoleSession`]) - one task owning the
//!    [`ResourceCache`](cache::ResourceCache) and
//!    [`DialogCoordinator`](dialog::DialogCoordinator), executing the
//!    mutation pipeline and emitting [`Notification`]s.
//! 4. **Interface Layer** ([`ConsoleClient`], [`projection`]) - the typed
//!    handle commands flow through, and the pure render model read back out.
//!
//! ## Consistency model
//!
//! The session is the single writer of console state and processes messages
//! sequentially, so no locking guards the cache or dialog. The displayed
//! collection is always re-derived from a fresh fetch after every successful
//! mutation; the core never patches a client-guessed delta into the cache.
//! At most one dialog is open at a time, each open dialog binds an owned
//! snapshot of its target record, and at most one submission per dialog
//! instance is in flight. Results that arrive after their dialog closed or
//! their fetch was superseded are recognized and dropped.
//!
//! ## Testing
//!
//! The [`mock`] module provides an expectation-queue gateway and a
//! channel-driven gateway whose calls the test resolves explicitly; see the
//! module docs for the full guide.

pub mod cache;
pub mod client;
pub mod dialog;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod message;
pub mod mock;
pub mod notify;
pub mod projection;
pub mod session;
pub mod telemetry;

// Re-export core types for convenience
pub use cache::CacheState;
pub use client::ConsoleClient;
pub use dialog::DialogSelection;
pub use entity::{ConsoleEntity, FieldErrors};
pub use error::ConsoleError;
pub use gateway::{GatewayError, ResourceGateway};
pub use message::{MutationKind, SubmitOutcome};
pub use notify::{Notification, NotificationStream};
pub use projection::{DialogView, Row, RowAction, TableBody, TableView};
pub use session::ConsoleSession;
