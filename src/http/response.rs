//! Response descriptor returned by handlers, and its normalization.
//!
//! # Responsibilities
//! - Carry status, headers, and a text body from the handler to the wire
//! - Collapse the two header flavors (typed `HeaderMap` vs. plain mapping)
//!   into one ordered name/value list
//! - Materialize the body text, awaiting it when the handler deferred it
//!
//! # Design Decisions
//! - Status defaults to 200 when the handler leaves it unset
//! - Header normalization happens once, at the `Into<ResponseHeaders>`
//!   boundary, not inside the dispatcher
//! - Invalid header names/values surface as per-request failures (500), not
//!   panics

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use axum::body::Body;
use axum::http::header::{HeaderMap, HeaderName, HeaderValue};
use axum::http::{Response, StatusCode};

use crate::routing::registry::BoxError;

/// Ordered name/value header pairs: the single internal representation both
/// header flavors collapse into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: Vec<(String, String)>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header pair, preserving insertion order.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    fn into_header_map(self) -> Result<HeaderMap, BoxError> {
        let mut headers = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in self.entries {
            let name = HeaderName::try_from(name.as_str())?;
            let value = HeaderValue::try_from(value.as_str())?;
            headers.append(name, value);
        }
        Ok(headers)
    }
}

impl From<HeaderMap> for ResponseHeaders {
    fn from(map: HeaderMap) -> Self {
        let mut headers = Self::new();
        for (name, value) in map.iter() {
            headers.push(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
        headers
    }
}

impl From<HashMap<String, String>> for ResponseHeaders {
    fn from(map: HashMap<String, String>) -> Self {
        let mut headers = Self::new();
        for (name, value) in map {
            headers.push(name, value);
        }
        headers
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ResponseHeaders {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.push(name, value);
        }
        headers
    }
}

impl<N: Into<String>, V: Into<String>, const LEN: usize> From<[(N, V); LEN]> for ResponseHeaders {
    fn from(pairs: [(N, V); LEN]) -> Self {
        pairs.into_iter().collect()
    }
}

/// The body text, available now or later.
enum TextSource {
    Ready(String),
    Deferred(Pin<Box<dyn Future<Output = String> + Send>>),
}

impl TextSource {
    async fn materialize(self) -> String {
        match self {
            TextSource::Ready(text) => text,
            TextSource::Deferred(fut) => fut.await,
        }
    }
}

/// Response descriptor a handler returns to the dispatcher.
pub struct HandlerResponse {
    status: Option<StatusCode>,
    headers: ResponseHeaders,
    text: TextSource,
}

impl HandlerResponse {
    /// Empty descriptor: status 200, no headers, empty body.
    pub fn new() -> Self {
        Self {
            status: None,
            headers: ResponseHeaders::new(),
            text: TextSource::Ready(String::new()),
        }
    }

    /// Set the response status. Unset means 200.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Append one header pair.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(name, value);
        self
    }

    /// Replace the header set. Accepts a typed `HeaderMap`, a plain
    /// `HashMap`, or any collection of name/value pairs.
    pub fn headers(mut self, headers: impl Into<ResponseHeaders>) -> Self {
        self.headers = headers.into();
        self
    }

    /// Set the body text directly.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = TextSource::Ready(text.into());
        self
    }

    /// Set the body text from a future resolved at serialization time.
    pub fn text_with<Fut>(mut self, fut: Fut) -> Self
    where
        Fut: Future<Output = String> + Send + 'static,
    {
        self.text = TextSource::Deferred(Box::pin(fut));
        self
    }

    /// Normalize into a wire response: resolve status and headers, then
    /// await the fully-materialized body text.
    pub(crate) async fn into_http(self) -> Result<Response<Body>, BoxError> {
        let status = self.status.unwrap_or(StatusCode::OK);
        let headers = self.headers.into_header_map()?;
        let text = self.text.materialize().await;

        let mut response = Response::new(Body::from(text));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

impl Default for HandlerResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlerResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
