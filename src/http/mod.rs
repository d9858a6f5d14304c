//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all dispatch handler)
//!     → registry lookup (exact method+path)
//!     → handler invocation (awaited)
//!     → response.rs (normalize descriptor: status, headers, body text)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use response::{HandlerResponse, ResponseHeaders};
pub use server::{HttpServer, ServerError};
