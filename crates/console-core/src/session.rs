//! # Console Session
//!
//! The `ConsoleSession` owns the [`ResourceCache`] and [`DialogCoordinator`]
//! for one console instance and executes the mutation pipeline against the
//! injected [`ResourceGateway`]. It is the only writer of console state.
//!
//! **Concurrency model**:
//! The session runs in its own Tokio task and processes messages one at a
//! time, so no `Mutex` or `RwLock` guards its state. Gateway calls never run
//! on the session task: each one is spawned as its own task and posts a
//! settlement event back through an internal channel. The session therefore
//! stays responsive while requests are in flight: a dialog can be cancelled,
//! a retry issued, the view projected. A settlement that arrives after
//! its dialog was closed or its fetch was superseded is recognized by its
//! ticket/epoch and dropped instead of corrupting newer state.
//!
//! # Usage Pattern
//!
//! 1. **Create**: [`ConsoleSession::new`] returns the session, its client and
//!    the notification stream.
//! 2. **Wire**: pass the gateway into `session.run(gateway)`.
//! 3. **Run**: spawn the run loop in a background task; drive it through the
//!    client.
//!
//! ```rust,ignore
//! let (session, client, mut notifications) = ConsoleSession::<User>::new(32);
//! tokio::spawn(session.run(RestGateway::from_env()));
//! client.load().await?;
//! ```
//!
//! The session shuts down when every client handle has been dropped.
//!
//! # Mutation pipeline
//!
//! Create and edit submissions validate first and reject locally (no gateway
//! call) on failure. A dispatched mutation sets the dialog's pending flag; at
//! most one submission is in flight per dialog instance. On success the
//! session emits a success notification, closes the dialog and re-derives the
//! collection with a fresh fetch; the record returned by the gateway is
//! never patched into the cache, avoiding divergence from server-side
//! defaulting. On failure it emits an error notification, clears the pending
//! flag and leaves the dialog open; the collection is untouched.

use crate::cache::ResourceCache;
use crate::client::ConsoleClient;
use crate::dialog::{DialogCoordinator, DialogSelection};
use crate::entity::{entity_kind, ConsoleEntity};
use crate::gateway::{GatewayError, ResourceGateway};
use crate::message::{ConsoleRequest, MutationKind, SessionEvent, SubmitOutcome};
use crate::notify::{self, Notification, NotificationSender, NotificationStream};
use crate::projection::project;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The session actor for one console instance.
pub struct ConsoleSession<T: ConsoleEntity> {
    receiver: mpsc::Receiver<ConsoleRequest<T>>,
    events: mpsc::UnboundedReceiver<SessionEvent<T>>,
    event_sender: mpsc::UnboundedSender<SessionEvent<T>>,
    cache: ResourceCache<T>,
    dialog: DialogCoordinator<T>,
    notifier: NotificationSender,
}

impl<T: ConsoleEntity> ConsoleSession<T> {
    /// Creates a session together with its client and notification stream.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - capacity of the command channel. If it is full,
    ///   client calls wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ConsoleClient<T>, NotificationStream) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (event_sender, events) = mpsc::unbounded_channel();
        let (notifier, notifications) = notify::channel();
        let session = Self {
            receiver,
            events,
            event_sender,
            cache: ResourceCache::new(),
            dialog: DialogCoordinator::new(),
            notifier,
        };
        (session, ConsoleClient::new(sender), notifications)
    }

    /// Runs the session loop until every client handle is dropped.
    ///
    /// # Gateway Injection
    /// The gateway is injected here rather than at construction time, so the
    /// same session wiring serves production gateways and test doubles alike.
    pub async fn run<G>(mut self, gateway: G)
    where
        G: ResourceGateway<T> + 'static,
    {
        let gateway = Arc::new(gateway);
        let entity_type = entity_kind::<T>();
        info!(entity_type, "Console session started");

        loop {
            tokio::select! {
                Some(event) = self.events.recv() => {
                    self.apply_event(event, &gateway);
                }
                request = self.receiver.recv() => match request {
                    Some(request) => self.handle_request(request, &gateway),
                    None => break,
                },
            }
        }

        info!(
            entity_type,
            cache = self.cache.state().tag(),
            "Console session shut down"
        );
    }

    fn handle_request<G>(&mut self, request: ConsoleRequest<T>, gateway: &Arc<G>)
    where
        G: ResourceGateway<T> + 'static,
    {
        let entity_type = entity_kind::<T>();
        match request {
            ConsoleRequest::Load { respond_to } => {
                debug!(entity_type, "Load");
                self.start_load(gateway);
                let _ = respond_to.send(Ok(()));
            }
            ConsoleRequest::OpenCreate { respond_to } => {
                debug!(entity_type, "OpenCreate");
                self.dialog.open_create();
                let _ = respond_to.send(Ok(()));
            }
            ConsoleRequest::OpenEdit { target, respond_to } => {
                debug!(entity_type, id = %target.id(), "OpenEdit");
                self.dialog.open_edit(target);
                let _ = respond_to.send(Ok(()));
            }
            ConsoleRequest::OpenDelete { target, respond_to } => {
                debug!(entity_type, id = %target.id(), "OpenDelete");
                self.dialog.open_delete(target);
                let _ = respond_to.send(Ok(()));
            }
            ConsoleRequest::Cancel { respond_to } => {
                debug!(entity_type, dialog = self.dialog.selection().tag(), "Cancel");
                self.dialog.cancel();
                let _ = respond_to.send(Ok(()));
            }
            ConsoleRequest::SubmitCreate { draft, respond_to } => {
                let outcome = self.submit_create(draft, gateway);
                let _ = respond_to.send(Ok(outcome));
            }
            ConsoleRequest::SubmitEdit { draft, respond_to } => {
                let outcome = self.submit_edit(draft, gateway);
                let _ = respond_to.send(Ok(outcome));
            }
            ConsoleRequest::ConfirmDelete { respond_to } => {
                let outcome = self.confirm_delete(gateway);
                let _ = respond_to.send(Ok(outcome));
            }
            ConsoleRequest::View { respond_to } => {
                let _ = respond_to.send(Ok(project(self.cache.state(), &self.dialog)));
            }
        }
    }

    fn apply_event<G>(&mut self, event: SessionEvent<T>, gateway: &Arc<G>)
    where
        G: ResourceGateway<T> + 'static,
    {
        let entity_type = entity_kind::<T>();
        match event {
            SessionEvent::LoadSettled { epoch, outcome } => {
                if self.cache.settle(epoch, outcome) {
                    debug!(entity_type, epoch, state = self.cache.state().tag(), "Fetch settled");
                }
            }
            SessionEvent::MutationSettled {
                ticket,
                kind,
                outcome,
            } => {
                if ticket != self.dialog.instance() || !self.dialog.pending() {
                    // The dialog was closed or replaced after dispatch; the
                    // result must not reactivate it or touch the cache.
                    debug!(entity_type, ticket, "Stale mutation result dropped");
                    return;
                }
                match outcome {
                    Ok(()) => {
                        info!(entity_type, ticket, "Mutation succeeded");
                        self.notify(Notification::Success(success_message::<T>(&kind)));
                        self.dialog.complete();
                        // Re-derive the collection from server truth instead
                        // of patching a client-guessed delta.
                        self.start_load(gateway);
                    }
                    Err(reason) => {
                        warn!(entity_type, ticket, error = %reason, "Mutation failed");
                        self.notify(Notification::Error(failure_message::<T>(&kind, &reason)));
                        self.dialog.fail_submission();
                    }
                }
            }
        }
    }

    /// Dispatch a collection fetch. The cache is `Loading` from this point
    /// until the fetch (or a newer one) settles.
    fn start_load<G>(&mut self, gateway: &Arc<G>)
    where
        G: ResourceGateway<T> + 'static,
    {
        let epoch = self.cache.begin_load();
        let gateway = Arc::clone(gateway);
        let events = self.event_sender.clone();
        tokio::spawn(async move {
            let outcome = gateway.list().await;
            let _ = events.send(SessionEvent::LoadSettled { epoch, outcome });
        });
    }

    fn submit_create<G>(&mut self, draft: T::Draft, gateway: &Arc<G>) -> SubmitOutcome
    where
        G: ResourceGateway<T> + 'static,
    {
        let entity_type = entity_kind::<T>();
        if !matches!(self.dialog.selection(), DialogSelection::Creating) {
            warn!(entity_type, dialog = self.dialog.selection().tag(), "SubmitCreate without create dialog");
            return SubmitOutcome::Ignored;
        }
        if self.dialog.pending() {
            warn!(entity_type, "SubmitCreate while submission pending");
            return SubmitOutcome::Ignored;
        }
        if let Err(errors) = T::validate(&draft) {
            debug!(entity_type, fields = errors.len(), "Create draft rejected");
            self.dialog.reject(errors.clone());
            return SubmitOutcome::Invalid(errors);
        }

        let ticket = self.dialog.begin_submission();
        debug!(entity_type, ticket, ?draft, "Create dispatched");
        let gateway = Arc::clone(gateway);
        let events = self.event_sender.clone();
        tokio::spawn(async move {
            // The created record (server id included) is deliberately
            // discarded; the reload re-derives the collection.
            let outcome = gateway.create(draft).await.map(|_| ());
            let _ = events.send(SessionEvent::MutationSettled {
                ticket,
                kind: MutationKind::Create,
                outcome,
            });
        });
        SubmitOutcome::Dispatched
    }

    fn submit_edit<G>(&mut self, draft: T::Draft, gateway: &Arc<G>) -> SubmitOutcome
    where
        G: ResourceGateway<T> + 'static,
    {
        let entity_type = entity_kind::<T>();
        let target = match self.dialog.selection() {
            DialogSelection::Editing(target) => target.clone(),
            other => {
                warn!(entity_type, dialog = other.tag(), "SubmitEdit without edit dialog");
                return SubmitOutcome::Ignored;
            }
        };
        if self.dialog.pending() {
            warn!(entity_type, "SubmitEdit while submission pending");
            return SubmitOutcome::Ignored;
        }
        if let Err(errors) = T::validate(&draft) {
            debug!(entity_type, fields = errors.len(), "Edit draft rejected");
            self.dialog.reject(errors.clone());
            return SubmitOutcome::Invalid(errors);
        }

        let record = target.merge_draft(draft);
        let ticket = self.dialog.begin_submission();
        debug!(entity_type, ticket, id = %record.id(), "Edit dispatched");
        let gateway = Arc::clone(gateway);
        let events = self.event_sender.clone();
        tokio::spawn(async move {
            let outcome = gateway.update(record).await.map(|_| ());
            let _ = events.send(SessionEvent::MutationSettled {
                ticket,
                kind: MutationKind::Edit,
                outcome,
            });
        });
        SubmitOutcome::Dispatched
    }

    fn confirm_delete<G>(&mut self, gateway: &Arc<G>) -> SubmitOutcome
    where
        G: ResourceGateway<T> + 'static,
    {
        let entity_type = entity_kind::<T>();
        let target = match self.dialog.selection() {
            DialogSelection::Deleting(target) => target.clone(),
            other => {
                warn!(entity_type, dialog = other.tag(), "ConfirmDelete without delete dialog");
                return SubmitOutcome::Ignored;
            }
        };
        if self.dialog.pending() {
            warn!(entity_type, "ConfirmDelete while submission pending");
            return SubmitOutcome::Ignored;
        }

        let ticket = self.dialog.begin_submission();
        let id = target.id().clone();
        let label = target.label();
        debug!(entity_type, ticket, %id, "Delete dispatched");
        let gateway = Arc::clone(gateway);
        let events = self.event_sender.clone();
        tokio::spawn(async move {
            let outcome = gateway.delete(id).await;
            let _ = events.send(SessionEvent::MutationSettled {
                ticket,
                kind: MutationKind::Delete { label },
                outcome,
            });
        });
        SubmitOutcome::Dispatched
    }

    fn notify(&self, notification: Notification) {
        // Advisory channel; a missing observer is not an error.
        let _ = self.notifier.send(notification);
    }
}

fn success_message<T>(kind: &MutationKind) -> String {
    let entity = entity_kind::<T>();
    match kind {
        MutationKind::Create => format!("{entity} created successfully"),
        MutationKind::Edit => format!("{entity} edited successfully"),
        MutationKind::Delete { label } => format!("{entity} {label} deleted successfully"),
    }
}

fn failure_message<T>(kind: &MutationKind, reason: &GatewayError) -> String {
    let entity = entity_kind::<T>().to_lowercase();
    match kind {
        MutationKind::Create => format!("Failed creating {entity}: {reason}"),
        MutationKind::Edit => format!("Failed editing {entity}: {reason}"),
        MutationKind::Delete { .. } => format!("Failed deleting {entity}: {reason}"),
    }
}
