//! Dispatching client.
//!
//! [`AnchorClient`] glues the request synthesis to a transport: it builds the
//! request of an invocation, resolves it against a base URL, sends it
//! through an [`HttpClient`] and decodes the response.

use std::time::Instant;

use serde::de::DeserializeOwned;
use tracing::{Instrument, Level, info, span, warn};
use url::Url;

use crate::{
    ClientConfig, ContentDeserializer, ContentSerializer, HttpClient, InvocationDescriptor,
    JsonContentDeserializer, JsonContentSerializer, Request, RequestDescriptor, RequestFactory,
    Response, Result,
};

/// Declarative API client over any [`HttpClient`].
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use webanchor::prelude::*;
///
/// let users = Arc::new(ApiGroup::new().base_path("/api"));
/// let get_user = Arc::new(Endpoint::get("/users/{id}").param(ParamDecl::typed::<u64>("id")));
///
/// let client = AnchorClient::new(transport, "https://example.com")?;
/// let invocation = InvocationDescriptor::new(&users, &get_user, args![42_u64])?;
/// let user: Option<User> = client.call_optional(&invocation).await?;
/// ```
#[derive(Debug, Clone)]
pub struct AnchorClient<C, S = JsonContentSerializer, D = JsonContentDeserializer> {
    http: C,
    base_url: Url,
    factory: RequestFactory<S>,
    deserializer: D,
    config: ClientConfig,
}

impl<C> AnchorClient<C> {
    /// Create a client with the given base URL, the canonical pipeline and
    /// JSON bodies.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(http: C, base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self::with_url(http, Url::parse(base_url.as_ref())?))
    }

    /// Create a client with a pre-parsed base URL.
    #[must_use]
    pub fn with_url(http: C, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            factory: RequestFactory::default(),
            deserializer: JsonContentDeserializer,
            config: ClientConfig::default(),
        }
    }
}

impl<C, S, D> AnchorClient<C, S, D> {
    /// Use another request factory, with its own pipeline and serializer.
    #[must_use]
    pub fn with_factory<S2>(self, factory: RequestFactory<S2>) -> AnchorClient<C, S2, D> {
        AnchorClient {
            http: self.http,
            base_url: self.base_url,
            factory,
            deserializer: self.deserializer,
            config: self.config,
        }
    }

    /// Use another response deserializer.
    #[must_use]
    pub fn with_deserializer<D2>(self, deserializer: D2) -> AnchorClient<C, S, D2> {
        AnchorClient {
            http: self.http,
            base_url: self.base_url,
            factory: self.factory,
            deserializer,
            config: self.config,
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Base URL every request path is appended to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The request factory.
    #[must_use]
    pub const fn factory(&self) -> &RequestFactory<S> {
        &self.factory
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The wrapped transport.
    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.http
    }
}

impl<C, S, D> AnchorClient<C, S, D>
where
    C: HttpClient,
    S: ContentSerializer,
    D: ContentDeserializer,
{
    /// Build the absolute transport request of an invocation.
    ///
    /// # Errors
    ///
    /// Returns the synthesis error, or [`Error::InvalidUrl`](crate::Error::InvalidUrl).
    pub fn build_request(&self, invocation: &InvocationDescriptor) -> Result<Request> {
        let descriptor = self.factory.create(invocation)?;
        self.to_transport(descriptor)
    }

    fn to_transport(&self, descriptor: RequestDescriptor) -> Result<Request> {
        let (method, path, body) = descriptor.into_parts();
        let url = join_url(&self.base_url, &path)?;

        let mut request = Request::new(method, url);
        if let Some(user_agent) = &self.config.user_agent {
            request = request.header("User-Agent", user_agent.clone());
        }
        if let Some(accept) = self.deserializer.accept() {
            request = request.header("Accept", accept);
        }
        request = request.headers(self.config.default_headers.clone());
        if let Some(body) = body {
            request = request
                .header("Content-Type", body.content_type().as_str())
                .body(body.into_bytes());
        }

        Ok(request)
    }

    /// Send an invocation and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns the synthesis or transport error, or
    /// [`Error::Http`](crate::Error::Http) for a non-2xx status.
    pub async fn send(&self, invocation: &InvocationDescriptor) -> Result<Response> {
        let request = self.build_request(invocation)?;
        self.dispatch(request).await?.error_for_status()
    }

    /// Send an invocation and decode the response body.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send), plus the deserializer error.
    pub async fn call<T>(&self, invocation: &InvocationDescriptor) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(invocation).await?;
        self.deserializer.deserialize(&response)
    }

    /// Like [`call`](Self::call), with a 404 response decoded as `None`.
    ///
    /// The mapping is disabled by [`ClientConfig::not_found_as_none`].
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn call_optional<T>(&self, invocation: &InvocationDescriptor) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.send(invocation).await {
            Ok(response) => self.deserializer.deserialize(&response).map(Some),
            Err(err) if err.is_not_found() && self.config.not_found_as_none => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn dispatch(&self, request: Request) -> Result<Response> {
        let method = request.method();
        let url = request.url().to_string();
        let span = span!(Level::INFO, "anchor_call", %method, %url);

        async move {
            let start = Instant::now();
            info!("sending request");

            let result = self.http.execute(request).await;
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(response) if response.is_success() => {
                    info!(status = response.status(), elapsed_ms, "request completed");
                }
                Ok(response) => {
                    warn!(status = response.status(), elapsed_ms, "request failed with HTTP error");
                }
                Err(err) => {
                    warn!(error = %err, elapsed_ms, "request failed");
                }
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Append a request path to the base URL, keeping the base path.
fn join_url(base: &Url, path: &str) -> Result<Url> {
    let mut joined = base.as_str().trim_end_matches('/').to_string();
    if !path.starts_with('/') {
        joined.push('/');
    }
    joined.push_str(path);
    Ok(Url::parse(&joined)?)
}
