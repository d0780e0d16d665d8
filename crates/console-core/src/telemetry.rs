//! # Observability & Tracing
//!
//! Structured logging setup for a console process.
//!
//! The compact format hides the crate/module prefix (`with_target(false)`);
//! log lines carry the entity type as a structured field instead. Verbosity
//! is controlled through `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle + mutation outcomes
//! RUST_LOG=debug cargo run     # every command, dispatch and settlement
//! ```

/// Initialize the tracing subscriber once for the entire application.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Entity type is logged as a field instead
        .compact()
        .init();
}
