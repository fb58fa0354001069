//! Parameters flowing through the pipeline.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::{Error, ParamTag, Result, Value};

/// Where a parameter ends up in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterRole {
    /// Substituted into a `{name}` placeholder of the URL template.
    Route,
    /// Appended as a `key=value` pair to the query string.
    Query,
    /// Serialized into the request body.
    Content,
}

impl fmt::Display for ParameterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Route => write!(f, "route"),
            Self::Query => write!(f, "query"),
            Self::Content => write!(f, "content"),
        }
    }
}

/// A call argument with its assigned role.
///
/// Transformers receive and return parameters by value; `formatted` holds
/// the string form chosen by the resolvers, `value` keeps the raw value.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name, used as route placeholder or query key.
    pub name: String,
    /// Declared Rust type, when the parameter comes from a declaration.
    pub declared_type: Option<&'static str>,
    /// Raw argument value.
    pub value: Value,
    /// String form chosen by a resolver.
    pub formatted: Option<String>,
    /// Assigned role.
    pub role: ParameterRole,
    /// Tags from the parameter declaration.
    pub tags: Arc<[ParamTag]>,
}

impl Parameter {
    /// Creates an untagged parameter.
    pub fn new(name: impl Into<String>, value: impl Into<Value>, role: ParameterRole) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            value: value.into(),
            formatted: None,
            role,
            tags: Arc::from([]),
        }
    }

    /// Derive a parameter sharing name, type and tags, with another value.
    #[must_use]
    pub fn with_value(&self, value: Value) -> Self {
        Self {
            name: self.name.clone(),
            declared_type: self.declared_type,
            value,
            formatted: None,
            role: self.role,
            tags: Arc::clone(&self.tags),
        }
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<Arc<[ParamTag]>>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Sets the declared type.
    #[must_use]
    pub const fn with_declared_type(mut self, declared_type: &'static str) -> Self {
        self.declared_type = Some(declared_type);
        self
    }

    /// Text emitted for this parameter in the URL.
    ///
    /// Falls back to the raw textual representation of the value when no
    /// resolver formatted it.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match &self.formatted {
            Some(formatted) => Cow::Borrowed(formatted),
            None => Cow::Owned(self.value.to_string()),
        }
    }

    /// Declared type without module path and generic arguments.
    ///
    /// `my_api::models::Invoice` and `my_api::Page<Invoice>` become
    /// `Invoice` and `Page`. An optional type is named after its inner
    /// type: `Option<Invoice>` becomes `Invoice`.
    #[must_use]
    pub fn short_type_name(&self) -> Option<&'static str> {
        self.declared_type.map(short_type_name)
    }
}

pub(crate) fn short_type_name(type_name: &str) -> &str {
    if let Some(inner) = type_name
        .strip_prefix("core::option::Option<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return short_type_name(inner);
    }

    let base = type_name
        .split_once('<')
        .map_or(type_name, |(base, _)| base);
    base.rsplit("::").next().unwrap_or(base)
}

/// Parameters partitioned by role after the pipeline ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedParameters {
    /// Route parameters, in pipeline order.
    pub route: Vec<Parameter>,
    /// Query parameters, in pipeline order.
    pub query: Vec<Parameter>,
    /// The content parameter, if any.
    pub content: Option<Parameter>,
}

impl ResolvedParameters {
    /// Partition a parameter list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmbiguousContent`] when more than one parameter has
    /// the content role.
    pub fn partition(parameters: Vec<Parameter>) -> Result<Self> {
        let mut resolved = Self::default();
        let mut contents = Vec::new();

        for parameter in parameters {
            match parameter.role {
                ParameterRole::Route => resolved.route.push(parameter),
                ParameterRole::Query => resolved.query.push(parameter),
                ParameterRole::Content => contents.push(parameter),
            }
        }

        if contents.len() > 1 {
            return Err(Error::AmbiguousContent {
                names: contents.into_iter().map(|p| p.name).collect(),
            });
        }
        resolved.content = contents.pop();

        Ok(resolved)
    }

    /// Route parameter by name.
    #[must_use]
    pub fn route_parameter(&self, name: &str) -> Option<&Parameter> {
        self.route.iter().find(|p| p.name == name)
    }
}
