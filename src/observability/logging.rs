//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries embedding this crate
//! - Log level configurable via `RUST_LOG`
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Library code never installs a subscriber; only this opt-in helper does

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a default tracing subscriber: env-filter (falling back to
/// crate-level debug) plus the fmt layer.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "axle=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
