//! API declarations and invocation descriptors.
//!
//! An API is declared once as an [`ApiGroup`] plus its [`Endpoint`]s. Each
//! call binds live argument values to an endpoint, producing an immutable
//! [`InvocationDescriptor`] that the [`RequestFactory`](crate::RequestFactory)
//! turns into a request.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use webanchor_core::{ApiGroup, Endpoint, InvocationDescriptor, ParamDecl, args};
//!
//! let users = Arc::new(ApiGroup::new().base_path("/api"));
//! let get_user = Arc::new(
//!     Endpoint::get("/users/{id}")
//!         .param(ParamDecl::typed::<u64>("id"))
//!         .param(ParamDecl::typed::<Option<bool>>("verbose")),
//! );
//!
//! let invocation = InvocationDescriptor::new(&users, &get_user, args![42_u64, None::<bool>])
//!     .expect("arity matches");
//! assert_eq!(invocation.url_template(), "/users/{id}");
//! ```

use std::sync::Arc;

use crate::{Error, ListTag, Method, ParamTag, Result, Value};

/// Build an argument vector, converting each expression into a [`Value`].
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}

/// A group of endpoints sharing a base path and list-level tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiGroup {
    base_path: Option<String>,
    tags: Vec<ListTag>,
}

impl ApiGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base path prepended to every endpoint template.
    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Adds a list-level tag.
    #[must_use]
    pub fn tag(mut self, tag: ListTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// The declared base path.
    #[must_use]
    pub fn declared_base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// The list-level tags.
    #[must_use]
    pub fn tags(&self) -> &[ListTag] {
        &self.tags
    }
}

/// Declaration of one formal parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    name: String,
    declared_type: Option<&'static str>,
    tags: Arc<[ParamTag]>,
}

impl ParamDecl {
    /// Declares an untyped parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            tags: Arc::from([]),
        }
    }

    /// Declares a parameter of type `T`.
    pub fn typed<T: ?Sized>(name: impl Into<String>) -> Self {
        Self {
            declared_type: Some(std::any::type_name::<T>()),
            ..Self::new(name)
        }
    }

    /// Adds a tag.
    #[must_use]
    pub fn tag(mut self, tag: ParamTag) -> Self {
        let mut tags = self.tags.to_vec();
        tags.push(tag);
        self.tags = tags.into();
        self
    }

    /// Marks the parameter as request content.
    #[must_use]
    pub fn content(self) -> Self {
        self.tag(ParamTag::Content)
    }

    /// Parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type name.
    #[must_use]
    pub const fn declared_type(&self) -> Option<&'static str> {
        self.declared_type
    }

    /// Parameter tags.
    #[must_use]
    pub fn tags(&self) -> &Arc<[ParamTag]> {
        &self.tags
    }
}

/// Declaration of one API call: verb, URL template, parameters and tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    method: Method,
    url_template: String,
    params: Vec<ParamDecl>,
    tags: Vec<ListTag>,
}

impl Endpoint {
    /// Declares an endpoint.
    pub fn new(method: Method, url_template: impl Into<String>) -> Self {
        Self {
            method,
            url_template: url_template.into(),
            params: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Declares a GET endpoint.
    pub fn get(url_template: impl Into<String>) -> Self {
        Self::new(Method::Get, url_template)
    }

    /// Declares a POST endpoint.
    pub fn post(url_template: impl Into<String>) -> Self {
        Self::new(Method::Post, url_template)
    }

    /// Declares a PUT endpoint.
    pub fn put(url_template: impl Into<String>) -> Self {
        Self::new(Method::Put, url_template)
    }

    /// Declares a PATCH endpoint.
    pub fn patch(url_template: impl Into<String>) -> Self {
        Self::new(Method::Patch, url_template)
    }

    /// Declares a DELETE endpoint.
    pub fn delete(url_template: impl Into<String>) -> Self {
        Self::new(Method::Delete, url_template)
    }

    /// Appends a formal parameter.
    #[must_use]
    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    /// Adds a list-level tag.
    #[must_use]
    pub fn tag(mut self, tag: ListTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// URL template.
    #[must_use]
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Formal parameters, in declaration order.
    #[must_use]
    pub fn params(&self) -> &[ParamDecl] {
        &self.params
    }

    /// The list-level tags.
    #[must_use]
    pub fn tags(&self) -> &[ListTag] {
        &self.tags
    }
}

/// Immutable description of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationDescriptor {
    group: Arc<ApiGroup>,
    endpoint: Arc<Endpoint>,
    args: Vec<Value>,
}

impl InvocationDescriptor {
    /// Binds argument values to an endpoint of a group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] when the number of arguments differs
    /// from the number of declared parameters.
    pub fn new(group: &Arc<ApiGroup>, endpoint: &Arc<Endpoint>, args: Vec<Value>) -> Result<Self> {
        let expected = endpoint.params().len();
        if args.len() != expected {
            return Err(Error::ArityMismatch {
                template: endpoint.url_template().to_string(),
                expected,
                actual: args.len(),
            });
        }

        Ok(Self {
            group: Arc::clone(group),
            endpoint: Arc::clone(endpoint),
            args,
        })
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.endpoint.method()
    }

    /// Unresolved URL template.
    #[must_use]
    pub fn url_template(&self) -> &str {
        self.endpoint.url_template()
    }

    /// Base path of the group.
    #[must_use]
    pub fn base_path(&self) -> Option<&str> {
        self.group.declared_base_path()
    }

    /// The enclosing group.
    #[must_use]
    pub fn group(&self) -> &ApiGroup {
        &self.group
    }

    /// The endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Supplied argument values, aligned with [`Endpoint::params`].
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Formal parameters paired with their argument values.
    pub fn arguments(&self) -> impl Iterator<Item = (&ParamDecl, &Value)> {
        self.endpoint.params().iter().zip(&self.args)
    }

    /// List tags of the group followed by those of the endpoint.
    pub fn list_tags(&self) -> impl Iterator<Item = &ListTag> {
        self.group.tags().iter().chain(self.endpoint.tags())
    }
}
