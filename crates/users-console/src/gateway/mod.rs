//! Gateway implementations for the users resource API.

pub mod rest;

pub use rest::RestGateway;
