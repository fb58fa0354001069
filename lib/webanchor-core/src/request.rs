//! The synthesized request.

use crate::{Body, Method};

/// A fully resolved request: verb, URL with route tokens substituted and
/// query string appended, and optional body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    url: String,
    body: Option<Body>,
}

impl RequestDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub const fn new(method: Method, url: String, body: Option<Body>) -> Self {
        Self { method, url, body }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Path and query, relative to the API root.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Consume into (method, url, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, String, Option<Body>) {
        (self.method, self.url, self.body)
    }
}

impl std::fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
