//! Response body decoding.

use serde::de::DeserializeOwned;

use crate::{Error, Response, Result};

/// Decodes a successful response body into a typed value.
pub trait ContentDeserializer: Send + Sync {
    /// Media type sent in the `Accept` header, if any.
    fn accept(&self) -> Option<&str> {
        None
    }

    /// Decode the body of a response.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be decoded into `T`.
    fn deserialize<T: DeserializeOwned>(&self, response: &Response) -> Result<T>;
}

/// JSON decoding through `serde_json`, with the path of the failing field.
///
/// An empty body decodes as JSON `null`, so `()` and `Option<T>` accept a
/// `204 No Content`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonContentDeserializer;

impl ContentDeserializer for JsonContentDeserializer {
    fn accept(&self) -> Option<&str> {
        Some("application/json")
    }

    fn deserialize<T: DeserializeOwned>(&self, response: &Response) -> Result<T> {
        let body = response.body();
        if body.is_empty() {
            from_json(b"null")
        } else {
            from_json(body)
        }
    }
}

/// Deserialize JSON bytes, reporting the path to the failing field.
///
/// # Errors
///
/// Returns [`Error::JsonDeserialization`] on malformed input or a type
/// mismatch.
pub fn from_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|err| Error::json_deserialization(err.path().to_string(), err.inner().to_string()))?;
    deserializer
        .end()
        .map_err(|err| Error::json_deserialization(".", err.to_string()))?;
    Ok(value)
}
