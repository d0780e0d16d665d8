//! # Notification Channel
//!
//! Fire-and-forget side channel reporting mutation outcomes to the user
//! (toasts, status lines). Advisory only: the session's correctness never
//! depends on a notification being observed, and sends ignore a dropped
//! receiver.

use tokio::sync::mpsc;

/// A human-readable outcome report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Receiving half handed to the embedder; the session keeps the sender.
pub type NotificationStream = mpsc::UnboundedReceiver<Notification>;

pub(crate) type NotificationSender = mpsc::UnboundedSender<Notification>;

pub(crate) fn channel() -> (NotificationSender, NotificationStream) {
    mpsc::unbounded_channel()
}
