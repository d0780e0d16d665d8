//! # System Lifecycle & Orchestration
//!
//! Runtime wiring for a users console: create the session, inject the
//! gateway, run the session task, and coordinate a clean shutdown.
//!
//! ## Shutdown
//!
//! 1. **Drop the client** - closes the sender side of the command channel
//! 2. **Session detects closure** - its receiver returns `None`
//! 3. **Await completion** - the session logs final state and exits
//!
//! A submission still in flight at shutdown is dropped with the session; the
//! remote operation may or may not have completed, exactly as if the process
//! had navigated away.

use crate::model::User;
use crate::users;
use console_core::{ConsoleClient, NotificationStream, ResourceGateway};
use tracing::{error, info};

/// The running console: the session task plus the handles to drive it.
///
/// # Example
///
/// ```ignore
/// let system = ConsoleSystem::new(RestGateway::from_env());
/// system.client.load().await?;
/// // ... drive the console, drain system.notifications ...
/// system.shutdown().await?;
/// ```
pub struct ConsoleSystem {
    /// Client for driving the console session
    pub client: ConsoleClient<User>,

    /// Mutation outcome reports, for the embedder's toast surface
    pub notifications: NotificationStream,

    /// Task handle for the running session (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl ConsoleSystem {
    /// Creates the session and starts it with the given gateway.
    pub fn new<G>(gateway: G) -> Self
    where
        G: ResourceGateway<User> + 'static,
    {
        let (session, client, notifications) = users::new();
        let handle = tokio::spawn(session.run(gateway));

        Self {
            client,
            notifications,
            handle,
        }
    }

    /// Gracefully shuts down the console.
    ///
    /// Drops the client, which closes the command channel; the session then
    /// exits its loop. Returns an error if the session task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down console...");

        drop(self.client);
        drop(self.notifications);

        if let Err(e) = self.handle.await {
            error!("Console session task failed: {:?}", e);
            return Err(format!("Console session task failed: {:?}", e));
        }

        info!("Console shutdown complete.");
        Ok(())
    }
}
