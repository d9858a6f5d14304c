//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a catch-all dispatch handler
//! - Bind the listener and log the startup address
//! - Derive the lookup key from each inbound request
//! - Invoke the matched handler and serialize its response descriptor
//! - Wrap the whole cycle in a blanket failure handler (404 / 500 pages)
//!
//! # Design Decisions
//! - The framework route table has exactly `/` and `/{*path}`; the real
//!   lookup happens in our own registry
//! - The registry is frozen behind an `Arc` when serving starts, so dispatch
//!   needs no locks
//! - A handler failure is terminal for that request only; the server keeps
//!   accepting connections

use std::fmt::Write as _;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, Response, StatusCode},
    response::IntoResponse,
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, ListenConfig};
use crate::routing::registry::{BoxError, Endpoint, Module, Registry, RegistryError};
use crate::routing::resolver::PathResolver;

/// Error type for server startup.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind the listen address.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    /// The accept loop failed.
    #[error("serve failed: {0}")]
    Serve(#[from] std::io::Error),
}

/// Application state injected into the dispatch handler.
#[derive(Clone)]
struct AppState {
    registry: Arc<Registry>,
    expose_errors: bool,
}

/// HTTP server owning the endpoint registry.
///
/// Populate the registry with [`register`](Self::register) before calling
/// [`listen`](Self::listen); the registry is read-only once serving starts.
pub struct HttpServer {
    registry: Registry,
    config: AppConfig,
}

impl HttpServer {
    /// Create a server with the given construction-time options.
    pub fn new(config: AppConfig) -> Self {
        let resolver = PathResolver::new(
            config.global_prefix.clone(),
            config.global_version.clone(),
        );
        Self {
            registry: Registry::new(resolver),
            config,
        }
    }

    /// Register a module of endpoints.
    pub fn register(&mut self, module: Module) -> Result<(), RegistryError> {
        self.registry.register(module)
    }

    /// Register a sequence of modules.
    pub fn register_all(
        &mut self,
        modules: impl IntoIterator<Item = Module>,
    ) -> Result<(), RegistryError> {
        self.registry.register_all(modules)
    }

    /// Read access to the registry, mainly for assertions in tests.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Build the Axum router around the dispatch handler.
    fn build_router(self) -> Router {
        let state = AppState {
            registry: Arc::new(self.registry),
            expose_errors: self.config.expose_errors,
        };

        Router::new()
            .route("/", any(dispatch))
            .route("/{*path}", any(dispatch))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the configured address and serve until the process exits.
    pub async fn listen(self, listen: &ListenConfig) -> Result<(), ServerError> {
        let address = format!("{}:{}", listen.hostname, listen.port);
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind {
                address: address.clone(),
                source,
            })?;

        tracing::info!(
            "Server running at http://{}:{}",
            listen.hostname,
            listen.port
        );

        self.run(listener).await
    }

    /// Serve on an already-bound listener. Tests bind port 0 themselves and
    /// read `local_addr` before handing the listener over.
    pub async fn run(self, listener: TcpListener) -> Result<(), ServerError> {
        let app = self.build_router();
        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// Per-request dispatch: lookup, invoke, serialize. Three terminal outcomes:
/// the handler's response, the fixed 404 page, or the 500 error page.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    let method = request.method().as_str().to_ascii_uppercase();
    let path = request.uri().path().to_string();

    tracing::debug!(method = %method, path = %path, "Dispatching request");

    let Some(endpoint) = state.registry.lookup(&method, &path) else {
        tracing::debug!(method = %method, path = %path, "No route matched");
        return (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            "Route not found",
        )
            .into_response();
    };

    let endpoint = endpoint.clone();
    match invoke(&endpoint, request).await {
        Ok(response) => response,
        Err(error) => {
            tracing::error!(
                method = %method,
                path = %path,
                endpoint = %endpoint.name,
                error = %error,
                "Handler failed"
            );
            error_page(&error, state.expose_errors)
        }
    }
}

/// Invoke the handler and normalize its descriptor. A handler failure and a
/// malformed descriptor are treated identically.
async fn invoke(endpoint: &Endpoint, request: Request<Body>) -> Result<Response<Body>, BoxError> {
    let descriptor = endpoint.invoke(request).await?;
    descriptor.into_http().await
}

/// Build the 500 page. With `expose_errors` the body carries the failure
/// message and its cause chain (the placeholder line when there is none);
/// otherwise a generic page.
fn error_page(error: &BoxError, expose_errors: bool) -> Response<Body> {
    let body = if expose_errors {
        let mut detail = String::new();
        let mut cause = error.source();
        while let Some(inner) = cause {
            let _ = writeln!(detail, "caused by: {inner}");
            cause = inner.source();
        }
        if detail.is_empty() {
            detail.push_str("No stack trace available");
        }
        format!("<pre>{}\n{}</pre>", error, detail.trim_end())
    } else {
        "<pre>Internal Server Error</pre>".to_string()
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/html")],
        body,
    )
        .into_response()
}
