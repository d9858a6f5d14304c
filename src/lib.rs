//! Minimal HTTP routing and dispatch core.
//!
//! Endpoints are registered in named modules before the server starts, then
//! every inbound request is resolved against an exact method+path registry
//! and forwarded to the matched handler.
//!
//! ```no_run
//! use axle::{AppConfig, Endpoint, HandlerResponse, HttpServer, ListenConfig, Module};
//! use axum::http::Method;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut server = HttpServer::new(AppConfig {
//!     global_prefix: Some("api".into()),
//!     global_version: Some("v1".into()),
//!     ..Default::default()
//! });
//!
//! server.register(Module::new("health").endpoint(Endpoint::new(
//!     "ping",
//!     Method::GET,
//!     "ping",
//!     |_req| async {
//!         Ok(HandlerResponse::new()
//!             .header("Content-Type", "text/plain")
//!             .text("pong"))
//!     },
//! )))?;
//!
//! server
//!     .listen(&ListenConfig { hostname: "127.0.0.1".into(), port: 3000 })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::{AppConfig, ListenConfig};
pub use http::response::{HandlerResponse, ResponseHeaders};
pub use http::server::{HttpServer, ServerError};
pub use routing::registry::{BoxError, Endpoint, Module, Registry, RegistryError};
pub use routing::resolver::{EmptyRouteError, PathResolver};
