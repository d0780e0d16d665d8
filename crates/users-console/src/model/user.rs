use serde::{Deserialize, Serialize};

/// A user record as the resource API serves it.
///
/// # Console Core
/// This struct implements the [`ConsoleEntity`](console_core::ConsoleEntity)
/// trait, allowing it to be managed by a
/// [`ConsoleSession`](console_core::ConsoleSession). The console edits only
/// `name`, `email` and `phone`; everything else is server-owned and passed
/// through unmodified, wire field names included (`catchPhrase`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
}

/// Postal address, opaque to the console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

/// Geographic coordinates, opaque to the console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

/// Employer details, opaque to the console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
    pub bs: String,
}

/// The editable subset a form submits: a create sends it bare, an edit merges
/// it over the existing record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl UserDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}
