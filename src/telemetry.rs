//! # Observability & Tracing
//!
//! Structured logging for the console, built on `tracing`.
//!
//! ## What Gets Traced
//!
//! - **Dispatch**: requested path, resolved path and redirect hops (`debug`)
//! - **Controls**: modal transitions (`debug`), settled mutations (`info`),
//!   failed or abandoned mutations (`warn`)
//! - **Service**: start, shutdown and every record operation
//!
//! ## Usage
//!
//! ```bash
//! # Settled mutations and service lifecycle
//! RUST_LOG=info cargo run
//!
//! # Transitions, dispatch decisions and full payloads
//! RUST_LOG=debug cargo run
//!
//! # Only the dispatcher
//! RUST_LOG=admin_console::routing=debug cargo run
//! ```

use tracing_subscriber::EnvFilter;

/// Installs a compact subscriber driven by `RUST_LOG` (defaults to `info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
