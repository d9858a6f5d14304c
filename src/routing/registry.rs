//! Endpoint registry: the method+path → handler mapping.
//!
//! # Responsibilities
//! - Store endpoints under their composite `"METHOD:path"` key
//! - Bulk-register modules of endpoints
//! - Exact-match lookup for the dispatcher
//!
//! # Design Decisions
//! - Explicit `HashMap` keyed by the composite string: O(1) lookup and
//!   last-write-wins overwrite, never an array scan
//! - Registration is `&mut self`; the server freezes the registry behind an
//!   `Arc` before serving, so no locking is needed at dispatch time

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use thiserror::Error;

use crate::http::response::HandlerResponse;
use crate::routing::resolver::{EmptyRouteError, PathResolver};

/// Failure value a handler may produce in place of a response.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future returned by a registered handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HandlerResponse, BoxError>> + Send>>;

/// A registered handler: raw incoming request in, response descriptor out.
pub type Handler = Arc<dyn Fn(Request<Body>) -> HandlerFuture + Send + Sync>;

/// Error type for registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An endpoint declared an empty route; the registration call is aborted.
    #[error("endpoint `{endpoint}` in module `{module}`: {source}")]
    EmptyRoute {
        module: String,
        endpoint: String,
        source: EmptyRouteError,
    },
}

/// A single method+route+handler registration. Immutable once registered.
#[derive(Clone)]
pub struct Endpoint {
    pub name: String,
    pub method: Method,
    pub route: String,
    handler: Handler,
}

impl Endpoint {
    /// Create an endpoint from an async closure.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        method: Method,
        route: impl Into<String>,
        handler: F,
    ) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HandlerResponse, BoxError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            method,
            route: route.into(),
            handler: Arc::new(move |req| Box::pin(handler(req))),
        }
    }

    /// Invoke the handler with the raw incoming request.
    pub fn invoke(&self, request: Request<Body>) -> HandlerFuture {
        (self.handler)(request)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

/// A named grouping of endpoints, registered together. Not retained after
/// registration.
#[derive(Debug)]
pub struct Module {
    pub name: String,
    pub endpoints: Vec<Endpoint>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoints: Vec::new(),
        }
    }

    /// Append an endpoint, builder-style.
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }
}

/// The method+path → handler mapping, populated before serving begins.
#[derive(Debug, Default)]
pub struct Registry {
    endpoints: HashMap<String, Endpoint>,
    resolver: PathResolver,
}

impl Registry {
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            endpoints: HashMap::new(),
            resolver,
        }
    }

    /// Composite lookup key. The method token is uppercased so that lookup
    /// and registration agree regardless of how the verb was spelled.
    fn endpoint_key(method: &str, path: &str) -> String {
        format!("{}:{}", method.to_ascii_uppercase(), path)
    }

    /// Register every endpoint of a module.
    ///
    /// A duplicate method+path silently overwrites the earlier entry. An
    /// empty route aborts the call with [`RegistryError::EmptyRoute`].
    pub fn register(&mut self, module: Module) -> Result<(), RegistryError> {
        for endpoint in module.endpoints {
            let path = self.resolver.resolve(&endpoint.route).map_err(|source| {
                RegistryError::EmptyRoute {
                    module: module.name.clone(),
                    endpoint: endpoint.name.clone(),
                    source,
                }
            })?;

            let key = Self::endpoint_key(endpoint.method.as_str(), &path);
            tracing::debug!(
                module = %module.name,
                endpoint = %endpoint.name,
                key = %key,
                "Endpoint registered"
            );
            self.endpoints.insert(key, endpoint);
        }
        Ok(())
    }

    /// Register a sequence of modules.
    pub fn register_all(
        &mut self,
        modules: impl IntoIterator<Item = Module>,
    ) -> Result<(), RegistryError> {
        for module in modules {
            self.register(module)?;
        }
        Ok(())
    }

    /// Exact-match lookup. The caller supplies the already-extracted path;
    /// the method token is uppercased here.
    pub fn lookup(&self, method: &str, path: &str) -> Option<&Endpoint> {
        self.endpoints.get(&Self::endpoint_key(method, path))
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
