//! Error types for webanchor.

use derive_more::{Display, Error, From};

/// Main error type for webanchor operations.
///
/// The first group of variants are configuration errors raised while a
/// request is synthesized from an invocation. They mean the API declaration
/// is inconsistent with the call and are never retried.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A `{name}` placeholder of the URL template has no route parameter.
    #[display("missing route parameter '{name}' for template '{template}'")]
    #[from(skip)]
    MissingRouteParameter {
        /// Placeholder name.
        #[error(not(source))]
        name: String,
        /// URL template being resolved.
        template: String,
    },

    /// More than one parameter was classified as request content.
    #[display("ambiguous content: parameters {} are all classified as content", names.join(", "))]
    #[from(skip)]
    AmbiguousContent {
        /// Names of the competing content parameters.
        #[error(not(source))]
        names: Vec<String>,
    },

    /// The number of supplied arguments does not match the declared parameters.
    #[display("endpoint '{template}' declares {expected} parameter(s) but {actual} argument(s) were supplied")]
    #[from(skip)]
    ArityMismatch {
        /// URL template of the endpoint.
        template: String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        actual: usize,
    },

    /// A tag names a transformer that is not registered.
    #[display("unknown transformer '{_0}'")]
    #[from(skip)]
    UnknownTransformer(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// HTTP-level errors (non-2xx status codes).
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Response body, if available.
        #[error(not(source))]
        body: Option<bytes::Bytes>,
    },

    /// Failure reported by the transport collaborator.
    #[display("transport error: {_0}")]
    #[from(skip)]
    Transport(#[error(not(source))] String),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a missing route parameter error.
    #[must_use]
    pub fn missing_route_parameter(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self::MissingRouteParameter {
            name: name.into(),
            template: template.into(),
        }
    }

    /// Create an HTTP error from status code and message.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Create an HTTP error with body.
    #[must_use]
    pub fn http_with_body(status: u16, message: impl Into<String>, body: bytes::Bytes) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: Some(body),
        }
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if the error comes from an invalid API declaration
    /// rather than from serialization or the transport.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingRouteParameter { .. }
                | Self::AmbiguousContent { .. }
                | Self::ArityMismatch { .. }
                | Self::UnknownTransformer(_)
        )
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the response body if this is an HTTP error with a body.
    #[must_use]
    pub fn body(&self) -> Option<&bytes::Bytes> {
        match self {
            Self::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}
