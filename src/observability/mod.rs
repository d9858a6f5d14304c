//! Cross-cutting observability concerns.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is the embedder's job, with [`logging::init`] as the convenience default.

pub mod logging;
