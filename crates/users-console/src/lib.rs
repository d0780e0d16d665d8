//! # Users Console Library
//!
//! The concrete users administration console: the [`User`](model::User)
//! record type with its validation rules, the REST gateway against the users
//! resource API, and the lifecycle wiring around the generic session in
//! `console-core`.

pub mod gateway;
pub mod lifecycle;
pub mod model;
pub mod users;
