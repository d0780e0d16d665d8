//! # Dialog Coordinator
//!
//! A small state machine selecting which editing surface is active: none, the
//! create form, the edit form for one record, or the delete confirmation for
//! one record. At most one is open at any time; opening a new dialog while one
//! is open replaces it.
//!
//! # Snapshot binding
//! `Editing`/`Deleting` carry an owned copy of the record taken when the
//! dialog opened, never an index into the live collection. A reload can
//! replace the collection wholesale while a dialog is open without
//! invalidating the dialog's target.
//!
//! # Instance sequence
//! Every transition advances an instance sequence. A submission dispatched by
//! the mutation pipeline carries the sequence as its ticket; when the result
//! arrives, a ticket that no longer matches identifies a dialog that has been
//! closed or replaced in the meantime, and the result is discarded instead of
//! reactivating a dead surface.

use crate::entity::{ConsoleEntity, FieldErrors};

/// Which editing surface is active. Exactly one tag at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogSelection<T> {
    Closed,
    Creating,
    Editing(T),
    Deleting(T),
}

impl<T> DialogSelection<T> {
    /// Tag name for structured logging.
    pub fn tag(&self) -> &'static str {
        match self {
            DialogSelection::Closed => "closed",
            DialogSelection::Creating => "creating",
            DialogSelection::Editing(_) => "editing",
            DialogSelection::Deleting(_) => "deleting",
        }
    }
}

/// Owned by one session. Starts `Closed`; it is never destroyed, only reset.
#[derive(Debug)]
pub struct DialogCoordinator<T: ConsoleEntity> {
    selection: DialogSelection<T>,
    pending: bool,
    field_errors: FieldErrors,
    instance: u64,
}

impl<T: ConsoleEntity> DialogCoordinator<T> {
    pub fn new() -> Self {
        Self {
            selection: DialogSelection::Closed,
            pending: false,
            field_errors: FieldErrors::new(),
            instance: 0,
        }
    }

    pub fn selection(&self) -> &DialogSelection<T> {
        &self.selection
    }

    /// True while a submission dispatched from this dialog instance is in
    /// flight. The projection disables the submit affordance while set.
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Field messages of the last locally rejected submission.
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Identifier of the current dialog instance; changes on every transition.
    pub fn instance(&self) -> u64 {
        self.instance
    }

    pub fn open_create(&mut self) {
        self.transition(DialogSelection::Creating);
    }

    pub fn open_edit(&mut self, target: T) {
        self.transition(DialogSelection::Editing(target));
    }

    pub fn open_delete(&mut self, target: T) {
        self.transition(DialogSelection::Deleting(target));
    }

    /// User dismissed the dialog. Any in-flight submission keeps running; its
    /// result will carry a stale ticket and be dropped.
    pub fn cancel(&mut self) {
        self.transition(DialogSelection::Closed);
    }

    /// Submission succeeded; the dialog closes.
    pub fn complete(&mut self) {
        self.transition(DialogSelection::Closed);
    }

    /// Local validation rejected the submission: stay open, remember the
    /// per-field messages, nothing was dispatched.
    pub fn reject(&mut self, errors: FieldErrors) {
        self.field_errors = errors;
    }

    /// Validation passed and a gateway call is being dispatched. Returns the
    /// ticket the settlement must present.
    pub fn begin_submission(&mut self) -> u64 {
        self.pending = true;
        self.field_errors = FieldErrors::new();
        self.instance
    }

    /// The dispatched submission failed remotely: stay open so the user can
    /// retry or cancel, allow a new submission.
    pub fn fail_submission(&mut self) {
        self.pending = false;
    }

    fn transition(&mut self, next: DialogSelection<T>) {
        self.selection = next;
        self.pending = false;
        self.field_errors = FieldErrors::new();
        self.instance += 1;
    }
}

impl<T: ConsoleEntity> Default for DialogCoordinator<T> {
    fn default() -> Self {
        Self::new()
    }
}
