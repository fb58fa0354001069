//! Declarative HTTP client for Rust.
//!
//! Declare an API once as data, then turn each call into a resolved HTTP
//! request with the [`RequestFactory`] and send it through any
//! [`HttpClient`] with an [`AnchorClient`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use webanchor::prelude::*;
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! pub struct Customer {
//!     id: u64,
//!     name: String,
//! }
//!
//! let api = Arc::new(
//!     ApiGroup::new()
//!         .base_path("/api")
//!         .tag(ListTag::type_name_as_route("type")),
//! );
//! let create = Arc::new(
//!     Endpoint::post("/{type}").param(ParamDecl::typed::<Customer>("customer").content()),
//! );
//!
//! let client = AnchorClient::new(transport, "https://crm.example.com")?;
//! let customer = Value::json(&Customer { id: 0, name: "Ada".into() })?;
//! let invocation = InvocationDescriptor::new(&api, &create, vec![customer])?;
//!
//! // POST https://crm.example.com/api/Customer
//! let created: Customer = client.call(&invocation).await?;
//! ```

mod anchor;
mod client;
mod config;
mod deserialize;
pub mod prelude;
mod request;
mod response;

pub use anchor::AnchorClient;
pub use client::HttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_USER_AGENT};
pub use deserialize::{ContentDeserializer, JsonContentDeserializer, from_json};
pub use request::Request;
pub use response::Response;

// Re-export the request synthesis core
pub use webanchor_core::{
    ApiGroup, Body, CollectionFormat, ContentSerializer, ContentType, Endpoint, Error,
    FormContentSerializer, Formattable, InvocationDescriptor, JsonContentSerializer, ListTag,
    Method, NamedArg, ParamDecl, ParamTag, Parameter, ParameterRole, RequestDescriptor,
    RequestFactory, RequestFactoryBuilder, ResolvedParameters, Result, TextContentSerializer,
    Value, args, transform,
};

pub use url;
