//! Verbs of declared endpoints.

use derive_more::Display;

/// Verb of an [`Endpoint`](crate::Endpoint).
///
/// Displays as the upper-case token sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// Fetch.
    #[display("GET")]
    Get,
    /// Create.
    #[display("POST")]
    Post,
    /// Replace.
    #[display("PUT")]
    Put,
    /// Remove.
    #[display("DELETE")]
    Delete,
    /// Partial update.
    #[display("PATCH")]
    Patch,
    /// Fetch headers only.
    #[display("HEAD")]
    Head,
    /// Query capabilities.
    #[display("OPTIONS")]
    Options,
}

impl Method {
    /// Whether a request with this verb carries the content parameter.
    ///
    /// Only POST, PUT and PATCH do; a content parameter declared on any
    /// other verb is classified but never serialized.
    #[must_use]
    pub const fn permits_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
            Method::Head => Self::HEAD,
            Method::Options => Self::OPTIONS,
        }
    }
}
