//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     Module { endpoints }
//!         → resolver.rs (compose /prefix/version/route)
//!         → registry.rs (insert under "METHOD:path" key)
//!
//! Dispatch (per request):
//!     (method, path)
//!         → registry.rs (exact-match lookup)
//!         → Return: matched Endpoint or None
//! ```
//!
//! # Design Decisions
//! - Registry populated strictly before serving, immutable at runtime
//! - Exact method+path keys only; no wildcards, no path parameters
//! - Duplicate keys overwrite silently (last registration wins)

pub mod registry;
pub mod resolver;

pub use registry::{Endpoint, Module, Registry, RegistryError};
pub use resolver::{EmptyRouteError, PathResolver};
