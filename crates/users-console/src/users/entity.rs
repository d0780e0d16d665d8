//! Entity contract implementation for the [`User`] record type.
//!
//! The validation rules mirror the console's form constraints: a name of at
//! least three characters, a well-formed email address and a non-empty phone
//! number. Every failing field is reported, so a form can mark all invalid
//! inputs in one pass.

use crate::model::{User, UserDraft};
use console_core::{ConsoleEntity, FieldErrors};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"));

impl ConsoleEntity for User {
    type Id = String;
    type Draft = UserDraft;

    fn id(&self) -> &String {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn validate(draft: &UserDraft) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if draft.name.chars().count() < 3 {
            errors.insert("name", "Name must consist of at least three characters");
        }
        if !EMAIL.is_match(&draft.email) {
            errors.insert("email", "Email is not valid");
        }
        if draft.phone.is_empty() {
            errors.insert("phone", "Phone is required");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The edited fields over the original record; `id` and every other
    /// server-owned field are preserved unchanged.
    fn merge_draft(&self, draft: UserDraft) -> User {
        User {
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            ..self.clone()
        }
    }
}
