//! Request body serialization.

use bytes::Bytes;

use crate::{Method, ResolvedParameters, Result, Value};

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
    /// Plain text content type (`text/plain`).
    PlainText,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::PlainText => "text/plain",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A serialized request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    content_type: ContentType,
    bytes: Bytes,
}

impl Body {
    /// Creates a body.
    #[must_use]
    pub fn new(content_type: ContentType, bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Content type of the bytes.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Body bytes.
    #[must_use]
    pub const fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Consume into the bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// Turns the content parameter into a request body.
///
/// Failures are propagated to the caller untouched.
pub trait ContentSerializer: Send + Sync {
    /// Serialize a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded.
    fn serialize(&self, value: &Value) -> Result<Body>;
}

/// JSON bodies through `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonContentSerializer;

impl ContentSerializer for JsonContentSerializer {
    fn serialize(&self, value: &Value) -> Result<Body> {
        let bytes = serde_json::to_vec(value)?;
        Ok(Body::new(ContentType::Json, bytes))
    }
}

/// Form URL-encoded bodies through `serde_html_form`.
///
/// Only map-like values (structs captured as JSON objects, named pairs) can
/// be encoded; lists inside them become repeated fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormContentSerializer;

impl ContentSerializer for FormContentSerializer {
    fn serialize(&self, value: &Value) -> Result<Body> {
        let encoded = serde_html_form::to_string(value)?;
        Ok(Body::new(ContentType::FormUrlEncoded, encoded.into_bytes()))
    }
}

/// Plain text bodies from the raw text of the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextContentSerializer;

impl ContentSerializer for TextContentSerializer {
    fn serialize(&self, value: &Value) -> Result<Body> {
        Ok(Body::new(ContentType::PlainText, value.to_string().into_bytes()))
    }
}

/// Serialize the content parameter when the method permits a body.
///
/// # Errors
///
/// Returns the serializer error, if any.
pub fn resolve_content<S>(
    method: Method,
    parameters: &ResolvedParameters,
    serializer: &S,
) -> Result<Option<Body>>
where
    S: ContentSerializer + ?Sized,
{
    match &parameters.content {
        Some(content) if method.permits_body() => serializer.serialize(&content.value).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, NamedArg, Parameter, ParameterRole};

    fn with_content(value: Value) -> ResolvedParameters {
        ResolvedParameters::partition(vec![Parameter::new(
            "body",
            value,
            ParameterRole::Content,
        )])
        .expect("partition")
    }

    #[test]
    fn content_type_as_str() {
        assert_eq!(ContentType::Json.as_str(), "application/json");
        assert_eq!(
            ContentType::FormUrlEncoded.as_str(),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(ContentType::PlainText.to_string(), "text/plain");
    }

    #[test]
    fn json_body() {
        let value = Value::Json(serde_json::json!({"name": "Alice"}));
        let body = JsonContentSerializer.serialize(&value).expect("serialize");
        assert_eq!(body.content_type(), ContentType::Json);
        assert_eq!(body.bytes().as_ref(), br#"{"name":"Alice"}"#);
    }

    #[test]
    fn form_body() {
        let value = Value::pairs([
            NamedArg::query("username", "alice"),
            NamedArg::query("tags", vec!["a", "b"]),
        ]);
        let body = FormContentSerializer.serialize(&value).expect("serialize");
        assert_eq!(body.content_type(), ContentType::FormUrlEncoded);
        assert_eq!(body.bytes().as_ref(), b"username=alice&tags=a&tags=b");
    }

    #[test]
    fn form_serializer_error_is_propagated() {
        let err = FormContentSerializer
            .serialize(&Value::from(42))
            .expect_err("scalar cannot be a form");
        assert!(matches!(err, Error::FormSerialization(_)));
    }

    #[test]
    fn text_body() {
        let body = TextContentSerializer
            .serialize(&Value::from("hello"))
            .expect("serialize");
        assert_eq!(body.into_bytes().as_ref(), b"hello");
    }

    #[test]
    fn body_only_for_write_methods() {
        let parameters = with_content(Value::from("x"));

        for method in [Method::Post, Method::Put, Method::Patch] {
            let body = resolve_content(method, &parameters, &JsonContentSerializer).expect("body");
            assert_eq!(body.map(Body::into_bytes), Some(Bytes::from_static(br#""x""#)));
        }
        for method in [Method::Get, Method::Delete, Method::Head, Method::Options] {
            let body = resolve_content(method, &parameters, &JsonContentSerializer).expect("body");
            assert!(body.is_none(), "{method} must not carry a body");
        }
    }

    #[test]
    fn no_content_no_body() {
        let parameters = ResolvedParameters::default();
        let body = resolve_content(Method::Post, &parameters, &JsonContentSerializer).expect("body");
        assert!(body.is_none());
    }
}
