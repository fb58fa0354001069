//! Declarative metadata tags.
//!
//! Tags are attached to parameters ([`ParamTag`]) and to groups or endpoints
//! ([`ListTag`]) when an API is declared. The pipeline reads them while
//! resolving an invocation; named transformers are looked up in the
//! [`TransformerRegistry`](crate::TransformerRegistry).

/// Collection format for list-valued query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollectionFormat {
    /// Repeated parameters: `?tags=a&tags=b&tags=c` (default)
    #[default]
    Multi,
    /// Comma-separated: `?tags=a,b,c`
    Csv,
    /// Space-separated: `?tags=a%20b%20c`
    Ssv,
    /// Pipe-separated: `?tags=a|b|c`
    Pipes,
}

impl CollectionFormat {
    /// Get the separator string for this format.
    ///
    /// Returns `None` for `Multi` format (uses repeated parameters).
    #[must_use]
    pub const fn separator(self) -> Option<&'static str> {
        match self {
            Self::Multi => None,
            Self::Csv => Some(","),
            Self::Ssv => Some(" "),
            Self::Pipes => Some("|"),
        }
    }
}

/// Tag attached to a single parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamTag {
    /// The parameter is the request body.
    Content,
    /// Emit the parameter under another key.
    Rename(String),
    /// Formatting pattern for dates and formattable values.
    Format(String),
    /// How a list value is laid out in the query string.
    Collection(CollectionFormat),
    /// Apply the named per-parameter transformer.
    Transform(String),
}

impl ParamTag {
    /// Shorthand for [`ParamTag::Rename`].
    pub fn rename(key: impl Into<String>) -> Self {
        Self::Rename(key.into())
    }

    /// Shorthand for [`ParamTag::Format`].
    pub fn format(pattern: impl Into<String>) -> Self {
        Self::Format(pattern.into())
    }

    /// Shorthand for [`ParamTag::Transform`].
    pub fn transform(name: impl Into<String>) -> Self {
        Self::Transform(name.into())
    }
}

/// Tag attached to an API group or an endpoint, applied to the whole
/// parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListTag {
    /// Emit a route parameter with the given name whose value is the short
    /// type name of the content parameter.
    TypeNameAsRoute(String),
    /// Apply the named list transformer.
    Transform(String),
}

impl ListTag {
    /// Shorthand for [`ListTag::TypeNameAsRoute`].
    pub fn type_name_as_route(route: impl Into<String>) -> Self {
        Self::TypeNameAsRoute(route.into())
    }

    /// Shorthand for [`ListTag::Transform`].
    pub fn transform(name: impl Into<String>) -> Self {
        Self::Transform(name.into())
    }
}

/// Lookup helpers over a tag slice.
pub(crate) trait ParamTags {
    fn is_content(&self) -> bool;
    fn format_pattern(&self) -> Option<&str>;
    fn collection_format(&self) -> CollectionFormat;
}

impl ParamTags for [ParamTag] {
    fn is_content(&self) -> bool {
        self.contains(&ParamTag::Content)
    }

    fn format_pattern(&self) -> Option<&str> {
        self.iter().find_map(|tag| match tag {
            ParamTag::Format(pattern) => Some(pattern.as_str()),
            _ => None,
        })
    }

    fn collection_format(&self) -> CollectionFormat {
        self.iter()
            .find_map(|tag| match tag {
                ParamTag::Collection(format) => Some(*format),
                _ => None,
            })
            .unwrap_or_default()
    }
}
