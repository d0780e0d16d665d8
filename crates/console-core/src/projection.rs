//! # Table Projection
//!
//! A pure function from (cache state, dialog state) to a render model. The
//! core prescribes *which* branch a renderer shows and with what data; row
//! widgets, skeletons and styling stay the renderer's concern.
//!
//! # Branch precedence
//! Error > Loading (including a never-loaded cache) > Empty > Rows. The
//! ordering is deliberate, not incidental: an error always dominates, even
//! when an older `Ready` collection could still be shown: stale rows under
//! an error banner would misrepresent server truth.

use crate::cache::CacheState;
use crate::dialog::{DialogCoordinator, DialogSelection};
use crate::entity::{entity_kind, ConsoleEntity, FieldErrors};

/// Render model for the whole console surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<T: ConsoleEntity> {
    pub body: TableBody<T>,
    pub dialog: DialogView<T>,
}

/// Mutually exclusive table body branches.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<T> {
    /// The last fetch failed; show the diagnostic and a retry affordance.
    Error { message: String },
    /// A fetch is in flight (or nothing was fetched yet); show placeholders.
    Loading,
    /// The server returned an empty collection.
    Empty,
    /// One row per record, in collection order.
    Rows(Vec<Row<T>>),
}

/// One table row: the record plus its action affordances.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    pub record: T,
    pub actions: Vec<RowAction>,
}

/// Actions offered on every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

/// The editing surface to render, if any. `pending` mirrors the dialog's
/// in-flight submission flag so the renderer disables the submit control.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogView<T> {
    Hidden,
    CreateForm {
        pending: bool,
        field_errors: FieldErrors,
    },
    EditForm {
        target: T,
        pending: bool,
        field_errors: FieldErrors,
    },
    ConfirmDelete {
        target: T,
        prompt: String,
        pending: bool,
    },
}

/// Project the current states into a render model. Pure: no side effects, no
/// awaits, same inputs always produce the same view.
pub fn project<T: ConsoleEntity>(
    cache: &CacheState<T>,
    dialog: &DialogCoordinator<T>,
) -> TableView<T> {
    let body = match cache {
        CacheState::Error(reason) => TableBody::Error {
            message: reason.clone(),
        },
        CacheState::Idle | CacheState::Loading => TableBody::Loading,
        CacheState::Ready(records) if records.is_empty() => TableBody::Empty,
        CacheState::Ready(records) => TableBody::Rows(
            records
                .iter()
                .map(|record| Row {
                    record: record.clone(),
                    actions: vec![RowAction::Edit, RowAction::Delete],
                })
                .collect(),
        ),
    };

    let dialog = match dialog.selection() {
        DialogSelection::Closed => DialogView::Hidden,
        DialogSelection::Creating => DialogView::CreateForm {
            pending: dialog.pending(),
            field_errors: dialog.field_errors().clone(),
        },
        DialogSelection::Editing(target) => DialogView::EditForm {
            target: target.clone(),
            pending: dialog.pending(),
            field_errors: dialog.field_errors().clone(),
        },
        DialogSelection::Deleting(target) => DialogView::ConfirmDelete {
            prompt: format!(
                "Are you sure you want to delete {} {}?",
                entity_kind::<T>().to_lowercase(),
                target.label()
            ),
            target: target.clone(),
            pending: dialog.pending(),
        },
    };

    TableView { body, dialog }
}
