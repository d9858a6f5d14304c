//! Route path resolution.
//!
//! # Responsibilities
//! - Reject empty route strings at registration time
//! - Compose the final path from global prefix, global version, and route
//!
//! # Design Decisions
//! - Empty prefix/version segments are omitted, never emitted as `//`
//! - No normalization beyond that: duplicate slashes inside a route and
//!   percent-encoding are passed through untouched

use thiserror::Error;

/// Raised when an endpoint declares an empty route string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("route must not be empty")]
pub struct EmptyRouteError;

/// Composes registered routes with the configured global prefix and version.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    prefix: String,
    version: String,
}

impl PathResolver {
    /// Create a resolver; `None` segments behave as absent.
    pub fn new(prefix: Option<String>, version: Option<String>) -> Self {
        Self {
            prefix: prefix.unwrap_or_default(),
            version: version.unwrap_or_default(),
        }
    }

    /// Resolve a route to its final path: `/` + the non-empty segments of
    /// [prefix, version, route] joined with `/`.
    pub fn resolve(&self, route: &str) -> Result<String, EmptyRouteError> {
        if route.is_empty() {
            return Err(EmptyRouteError);
        }

        let segments: Vec<&str> = [self.prefix.as_str(), self.version.as_str(), route]
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .collect();

        Ok(format!("/{}", segments.join("/")))
    }
}
