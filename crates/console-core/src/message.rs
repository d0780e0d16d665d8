//! # Session Messages
//!
//! The message types flowing into a [`ConsoleSession`](crate::session::ConsoleSession).
//! Two channels feed the session loop:
//!
//! * [`ConsoleRequest`] - commands sent by a [`ConsoleClient`](crate::client::ConsoleClient)
//!   on user intent. Every command carries a oneshot reply so callers can await
//!   acknowledgement; submissions reply with the synchronous [`SubmitOutcome`]
//!   (the remote result arrives later through state and notifications).
//! * [`SessionEvent`] - settlements posted back by the fetch/mutation tasks the
//!   session spawned. These are internal; embedders never construct them.
//!
//! The split keeps the session loop single-writer: all state transitions
//! happen on one task, in message-arrival order.

use crate::entity::{ConsoleEntity, FieldErrors};
use crate::error::ConsoleError;
use crate::gateway::GatewayError;
use crate::projection::TableView;
use tokio::sync::oneshot;

/// Type alias for the oneshot reply channel used by session commands.
pub type Reply<V> = oneshot::Sender<Result<V, ConsoleError>>;

/// Commands a client sends to its session.
#[derive(Debug)]
pub enum ConsoleRequest<T: ConsoleEntity> {
    /// Fetch the full collection (initial load or user-initiated retry).
    /// The cache enters `Loading` before this command is acknowledged.
    Load { respond_to: Reply<()> },
    /// Open the create form.
    OpenCreate { respond_to: Reply<()> },
    /// Open the edit form bound to a snapshot of `target`.
    OpenEdit { target: T, respond_to: Reply<()> },
    /// Open the delete confirmation bound to a snapshot of `target`.
    OpenDelete { target: T, respond_to: Reply<()> },
    /// Dismiss whichever dialog is open.
    Cancel { respond_to: Reply<()> },
    /// Submit the create form.
    SubmitCreate {
        draft: T::Draft,
        respond_to: Reply<SubmitOutcome>,
    },
    /// Submit the edit form; the draft is merged over the bound record.
    SubmitEdit {
        draft: T::Draft,
        respond_to: Reply<SubmitOutcome>,
    },
    /// Explicitly confirm the open delete dialog. The delete call fires only
    /// here, never on dialog open.
    ConfirmDelete { respond_to: Reply<SubmitOutcome> },
    /// Project the current cache and dialog state into a render model.
    View {
        respond_to: Reply<TableView<T>>,
    },
}

/// Synchronous result of a submit/confirm command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed (or was not required) and the gateway call is in
    /// flight. The final outcome arrives via notification and state.
    Dispatched,
    /// Local validation rejected the draft; nothing was sent. The dialog
    /// stays open with these per-field messages.
    Invalid(FieldErrors),
    /// No matching dialog is open, or a submission is already pending for
    /// this dialog instance. Nothing was sent.
    Ignored,
}

/// Which mutation a settlement concludes, for notification copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Edit,
    /// Carries the deleted record's label, captured at dispatch time.
    Delete { label: String },
}

/// Settlements posted by the session's own spawned tasks.
#[derive(Debug)]
pub enum SessionEvent<T: ConsoleEntity> {
    /// A fetch dispatched under `epoch` resolved.
    LoadSettled {
        epoch: u64,
        outcome: Result<Vec<T>, GatewayError>,
    },
    /// A mutation dispatched under `ticket` resolved. Create results are
    /// already reduced to `()`; the created record is never patched into the
    /// cache directly; a reload re-derives the collection from server truth.
    MutationSettled {
        ticket: u64,
        kind: MutationKind,
        outcome: Result<(), GatewayError>,
    },
}
