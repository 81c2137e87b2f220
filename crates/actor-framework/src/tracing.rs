//! # Observability & Tracing
//!
//! Structured logging for the actor system, built on `tracing` and `tracing-subscriber`.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup, shutdown and final store size
//! - **Entity Operations**: Create, Get, GetMany, List, Update, Delete and Actions, each
//!   with an `entity_type` field and the entity id
//! - **Request Flow**: `#[instrument]` spans on clients and services
//! - **Errors**: rejected hooks, conflicts and missing ids at `warn`
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run      # compact
//! RUST_LOG=debug cargo run     # full payloads on every request
//! ```
//!
//! `RUST_LOG` always wins; otherwise the directive passed to [`setup_tracing`] applies.
//! Module paths are hidden (`with_target(false)`), the `entity_type` field already says
//! which actor produced the line.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `default_directive` is used when `RUST_LOG` is unset or unparsable (e.g. `"info"` or
/// `"storefront=debug"`). Calling this more than once is harmless: later calls are no-ops,
/// which keeps tests that each set up tracing from panicking.
pub fn setup_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type already identifies the actor
        .compact()
        .try_init();
}
