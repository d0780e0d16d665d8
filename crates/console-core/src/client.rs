//! # Console Client
//!
//! The cloneable, type-safe handle for driving a console session. It forwards
//! commands over the session's mpsc channel and returns results via oneshot
//! channels. Cheap to clone and share across tasks; the session shuts down
//! when the last clone is dropped.

use crate::entity::ConsoleEntity;
use crate::error::ConsoleError;
use crate::message::{ConsoleRequest, SubmitOutcome};
use crate::projection::TableView;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Handle for one console session.
#[derive(Clone)]
pub struct ConsoleClient<T: ConsoleEntity> {
    sender: mpsc::Sender<ConsoleRequest<T>>,
}

impl<T: ConsoleEntity> ConsoleClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<ConsoleRequest<T>>) -> Self {
        Self { sender }
    }

    /// Fetch the collection. Returns once the session has entered `Loading`
    /// and dispatched the fetch; the terminal state arrives asynchronously.
    /// Also serves as the user-initiated retry after a load failure.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<(), ConsoleError> {
        debug!("Sending request");
        self.request(|respond_to| ConsoleRequest::Load { respond_to })
            .await
    }

    /// Open the create form.
    #[instrument(skip(self))]
    pub async fn open_create(&self) -> Result<(), ConsoleError> {
        debug!("Sending request");
        self.request(|respond_to| ConsoleRequest::OpenCreate { respond_to })
            .await
    }

    /// Open the edit form bound to a snapshot of `target`.
    #[instrument(skip(self, target))]
    pub async fn open_edit(&self, target: T) -> Result<(), ConsoleError> {
        debug!("Sending request");
        self.request(|respond_to| ConsoleRequest::OpenEdit { target, respond_to })
            .await
    }

    /// Open the delete confirmation bound to a snapshot of `target`.
    #[instrument(skip(self, target))]
    pub async fn open_delete(&self, target: T) -> Result<(), ConsoleError> {
        debug!("Sending request");
        self.request(|respond_to| ConsoleRequest::OpenDelete { target, respond_to })
            .await
    }

    /// Dismiss whichever dialog is open. Idempotent when none is.
    #[instrument(skip(self))]
    pub async fn cancel(&self) -> Result<(), ConsoleError> {
        debug!("Sending request");
        self.request(|respond_to| ConsoleRequest::Cancel { respond_to })
            .await
    }

    /// Submit the create form.
    #[instrument(skip(self, draft))]
    pub async fn submit_create(&self, draft: T::Draft) -> Result<SubmitOutcome, ConsoleError> {
        debug!("Sending request");
        self.request(|respond_to| ConsoleRequest::SubmitCreate { draft, respond_to })
            .await
    }

    /// Submit the edit form.
    #[instrument(skip(self, draft))]
    pub async fn submit_edit(&self, draft: T::Draft) -> Result<SubmitOutcome, ConsoleError> {
        debug!("Sending request");
        self.request(|respond_to| ConsoleRequest::SubmitEdit { draft, respond_to })
            .await
    }

    /// Explicitly confirm the open delete dialog.
    #[instrument(skip(self))]
    pub async fn confirm_delete(&self) -> Result<SubmitOutcome, ConsoleError> {
        debug!("Sending request");
        self.request(|respond_to| ConsoleRequest::ConfirmDelete { respond_to })
            .await
    }

    /// Project the current cache and dialog state into a render model.
    pub async fn view(&self) -> Result<TableView<T>, ConsoleError> {
        self.request(|respond_to| ConsoleRequest::View { respond_to })
            .await
    }

    async fn request<V>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<V, ConsoleError>>) -> ConsoleRequest<T>,
    ) -> Result<V, ConsoleError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| ConsoleError::SessionClosed)?;
        response.await.map_err(|_| ConsoleError::SessionDropped)?
    }
}
