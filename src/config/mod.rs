//! Configuration types.
//!
//! # Design Decisions
//! - Construction-time options only: there is no file or environment
//!   configuration surface in this core.
//! - Options are immutable for the lifetime of the registry they configure.

pub mod schema;

pub use schema::{AppConfig, ListenConfig};
