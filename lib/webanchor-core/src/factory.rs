//! Request synthesis.
//!
//! [`RequestFactory::create`] runs one invocation through a linear,
//! synchronous sequence of stages:
//!
//! ```text
//! Start -> ParametersResolved -> UrlResolved -> BodyResolved | NoBody -> RequestBuilt
//! ```
//!
//! Nothing is cached between invocations; a factory is shared read-only and
//! may build requests from many threads at once.

use tracing::{debug, debug_span};

use crate::transform::{ParameterTransformer, Pipeline, Transformer, TransformerRegistry};
use crate::{
    ContentSerializer, InvocationDescriptor, JsonContentSerializer, RequestDescriptor,
    ResolvedParameters, Result, classify, resolve_content, resolve_url,
};

/// Builds [`RequestDescriptor`]s from [`InvocationDescriptor`]s.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use webanchor_core::{ApiGroup, Endpoint, InvocationDescriptor, ParamDecl, RequestFactory, args};
///
/// let factory = RequestFactory::default();
/// let group = Arc::new(ApiGroup::new().base_path("/api"));
/// let search = Arc::new(
///     Endpoint::get("/repos/{owner}")
///         .param(ParamDecl::new("owner"))
///         .param(ParamDecl::new("q"))
///         .param(ParamDecl::new("tag")),
/// );
///
/// let invocation =
///     InvocationDescriptor::new(&group, &search, args!["rust lang", "http client", vec!["a", "b"]])?;
/// let request = factory.create(&invocation)?;
/// assert_eq!(request.url(), "/api/repos/rust%20lang?q=http%20client&tag=a&tag=b");
/// # Ok::<(), webanchor_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RequestFactory<S = JsonContentSerializer> {
    pipeline: Pipeline,
    serializer: S,
}

impl RequestFactory<JsonContentSerializer> {
    /// Creates a new [`RequestFactoryBuilder`].
    #[must_use]
    pub fn builder() -> RequestFactoryBuilder<JsonContentSerializer> {
        RequestFactoryBuilder::default()
    }
}

impl Default for RequestFactory<JsonContentSerializer> {
    fn default() -> Self {
        Self::new(JsonContentSerializer)
    }
}

impl<S> RequestFactory<S>
where
    S: ContentSerializer,
{
    /// A factory with the canonical pipeline and the given serializer.
    #[must_use]
    pub fn new(serializer: S) -> Self {
        Self {
            pipeline: Pipeline::canonical(),
            serializer,
        }
    }

    /// The transformer pipeline.
    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// The content serializer.
    #[must_use]
    pub const fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Build the request for one invocation.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the invocation does not fit its
    /// declaration (missing route parameter, ambiguous content, unknown
    /// transformer), or the serializer error.
    pub fn create(&self, invocation: &InvocationDescriptor) -> Result<RequestDescriptor> {
        let method = invocation.method();
        let span = debug_span!("synthesize", %method, template = invocation.url_template());
        let _entered = span.enter();

        let parameters = self.resolve_parameters(invocation)?;
        debug!(
            route = parameters.route.len(),
            query = parameters.query.len(),
            content = parameters.content.is_some(),
            "parameters resolved"
        );

        let url = resolve_url(invocation.url_template(), invocation.base_path(), &parameters)?;
        debug!(%url, "url resolved");

        let body = resolve_content(method, &parameters, &self.serializer)?;
        match &body {
            Some(body) => debug!(
                content_type = %body.content_type(),
                size = body.bytes().len(),
                "body resolved"
            ),
            None => debug!("no body"),
        }

        Ok(RequestDescriptor::new(method, url, body))
    }

    /// Classify the arguments and run the pipeline, without building the
    /// request.
    ///
    /// # Errors
    ///
    /// Returns the first transformer error, or
    /// [`Error::AmbiguousContent`](crate::Error::AmbiguousContent).
    pub fn resolve_parameters(&self, invocation: &InvocationDescriptor) -> Result<ResolvedParameters> {
        let classified = classify(invocation);
        let transformed = self.pipeline.apply(classified, invocation)?;
        ResolvedParameters::partition(transformed)
    }
}

/// Builder for [`RequestFactory`].
#[derive(Debug, Clone)]
pub struct RequestFactoryBuilder<S = JsonContentSerializer> {
    pipeline: Option<Pipeline>,
    registry: TransformerRegistry,
    serializer: S,
}

impl Default for RequestFactoryBuilder<JsonContentSerializer> {
    fn default() -> Self {
        Self {
            pipeline: None,
            registry: TransformerRegistry::new(),
            serializer: JsonContentSerializer,
        }
    }
}

impl<S> RequestFactoryBuilder<S> {
    /// Use another content serializer.
    #[must_use]
    pub fn serializer<S2>(self, serializer: S2) -> RequestFactoryBuilder<S2> {
        RequestFactoryBuilder {
            pipeline: self.pipeline,
            registry: self.registry,
            serializer,
        }
    }

    /// Use a custom pipeline instead of the canonical one.
    ///
    /// Transformers registered on the builder are added to the pipeline's
    /// registry.
    #[must_use]
    pub fn pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Register a list transformer for `ListTag::Transform(name)`.
    #[must_use]
    pub fn list_transformer(
        mut self,
        name: impl Into<String>,
        transformer: impl Transformer + 'static,
    ) -> Self {
        self.registry.register_list(name, transformer);
        self
    }

    /// Register a parameter transformer for `ParamTag::Transform(name)`.
    #[must_use]
    pub fn parameter_transformer(
        mut self,
        name: impl Into<String>,
        transformer: impl ParameterTransformer + 'static,
    ) -> Self {
        self.registry.register_parameter(name, transformer);
        self
    }

    /// Build the factory.
    #[must_use]
    pub fn build(self) -> RequestFactory<S> {
        let mut pipeline = self.pipeline.unwrap_or_else(Pipeline::canonical);
        pipeline.registry_mut().merge(self.registry);
        RequestFactory {
            pipeline,
            serializer: self.serializer,
        }
    }
}
