//! Client configuration types.

use std::collections::BTreeMap;

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("webanchor/", env!("CARGO_PKG_VERSION"));

/// Configuration for an [`AnchorClient`](crate::AnchorClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Value of the `User-Agent` header; `None` sends no header.
    pub user_agent: Option<String>,
    /// Headers added to every request.
    pub default_headers: BTreeMap<String, String>,
    /// Whether `call_optional` maps a 404 response to `None`.
    pub not_found_as_none: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            default_headers: BTreeMap::new(),
            not_found_as_none: true,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    user_agent: Option<Option<String>>,
    default_headers: BTreeMap<String, String>,
    not_found_as_none: Option<bool>,
}

impl ClientConfigBuilder {
    /// Set the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(Some(user_agent.into()));
        self
    }

    /// Do not send a `User-Agent` header.
    #[must_use]
    pub fn without_user_agent(mut self) -> Self {
        self.user_agent = Some(None);
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Set whether `call_optional` maps a 404 response to `None`.
    #[must_use]
    pub const fn not_found_as_none(mut self, enabled: bool) -> Self {
        self.not_found_as_none = Some(enabled);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            default_headers: self.default_headers,
            not_found_as_none: self.not_found_as_none.unwrap_or(defaults.not_found_as_none),
        }
    }
}
