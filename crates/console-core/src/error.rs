//! # Core Errors
//!
//! Errors raised by the session plumbing itself, as opposed to gateway
//! failures ([`crate::gateway::GatewayError`]) which are domain outcomes the
//! session stores and surfaces rather than propagates.

/// Failures communicating with a console session.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// The session task has shut down; its command channel is closed.
    #[error("console session closed")]
    SessionClosed,
    /// The session dropped the reply channel before answering.
    #[error("console session dropped the reply channel")]
    SessionDropped,
}
