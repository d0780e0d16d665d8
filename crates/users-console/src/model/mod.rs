//! Pure data structures for the users console.

pub mod user;

pub use user::*;
