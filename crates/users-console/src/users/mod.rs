//! # Users Console
//!
//! Wires the generic console session to the [`User`] record type.
//!
//! ## Structure
//!
//! - [`entity`] - [`ConsoleEntity`](console_core::ConsoleEntity)
//!   implementation for [`User`]: the field validation rules and the
//!   edit-merge behavior
//! - [`new()`] - factory that creates the session, its client and the
//!   notification stream
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (session, client, notifications) = users::new();
//! tokio::spawn(session.run(RestGateway::from_env()));
//! client.load().await?;
//! ```

pub mod entity;

use crate::model::User;
use console_core::{ConsoleClient, ConsoleSession, NotificationStream};

/// Creates a new users console session and its client.
pub fn new() -> (ConsoleSession<User>, ConsoleClient<User>, NotificationStream) {
    ConsoleSession::new(32)
}
