//! # ConsoleEntity Trait
//!
//! The `ConsoleEntity` trait defines the contract that every record type managed
//! by a [`ConsoleSession`](crate::session::ConsoleSession) must implement. It
//! specifies associated types for the server-assigned identifier and the editable
//! draft, plus the pure hooks the mutation pipeline calls (`validate`,
//! `merge_draft`). Implementing this trait enables the generic session to offer a
//! uniform list/create/edit/delete console for any domain model.
//!
//! # Architecture Note
//! Why do we need this trait?
//! By defining a contract that every admin-console record type must satisfy, we
//! write the session loop, cache, dialog coordination and projection *once* and
//! reuse them everywhere. The associated types enforce type safety: a `User`
//! console accepts a `UserDraft`, and the compiler rejects anything else.
//!
//! # Purity
//! Both hooks are synchronous and total. `validate` never performs I/O and never
//! panics; `merge_draft` copies the editable fields over an owned snapshot of the
//! record and preserves every server-owned field unchanged.

use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display};

/// Trait that any record type must implement to be managed by a console session.
pub trait ConsoleEntity: Clone + Debug + Send + Sync + 'static {
    /// The server-assigned identifier (e.g., String, Uuid, u64).
    /// Stable and immutable once the record exists.
    type Id: Eq + Clone + Send + Sync + Display + Debug;

    /// The editable subset of the record a form submits (DTO).
    /// A create submits a bare draft; an edit merges the draft over an
    /// existing record via [`ConsoleEntity::merge_draft`].
    type Draft: Clone + Debug + Send + Sync;

    /// The identifier of this record.
    fn id(&self) -> &Self::Id;

    /// Human-readable label used in notifications and confirm prompts.
    fn label(&self) -> String;

    /// Check a draft against the record type's field rules.
    ///
    /// Pure and total: every failing field is reported, none short-circuits,
    /// and no I/O happens here. The mutation pipeline rejects a submission
    /// locally (no gateway call) when this returns `Err`.
    fn validate(draft: &Self::Draft) -> Result<(), FieldErrors>;

    /// Produce the full record an edit submits: the draft's fields layered
    /// over this record, with `id` and all other server-owned fields kept.
    fn merge_draft(&self, draft: Self::Draft) -> Self;
}

/// Per-field validation messages, keyed by field name.
///
/// Ordered iteration (BTreeMap) keeps rendering and assertions deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Short display name of the entity type, for logs and notification copy
/// (e.g., "User" instead of "users_console::model::user::User").
pub(crate) fn entity_kind<T>() -> &'static str {
    std::any::type_name::<T>().rsplit("::").next().unwrap_or("record")
}
