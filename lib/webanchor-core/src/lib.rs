//! Declarative HTTP request synthesis.
//!
//! An API is declared as data ([`ApiGroup`], [`Endpoint`], [`ParamDecl`]);
//! each call becomes an [`InvocationDescriptor`] which the
//! [`RequestFactory`] turns into a [`RequestDescriptor`]:
//!
//! 1. [`classify`] assigns each argument a route, query or content role,
//! 2. the transformer [`Pipeline`] expands, formats, renames and augments
//!    the parameters,
//! 3. [`resolve_url`] substitutes route tokens and appends the query string,
//! 4. [`resolve_content`] serializes the body for `POST`, `PUT` and `PATCH`.
//!
//! Performing the request is left to a transport, see the `webanchor` crate.
//!
//! Main types:
//! - [`Value`] and [`Formattable`] - argument values
//! - [`ParamTag`] and [`ListTag`] - declarative metadata
//! - [`Transformer`] and [`TransformerRegistry`] - pipeline steps
//! - [`ContentSerializer`] - body encoding
//! - [`Error`] and [`Result`] - error handling

mod classify;
mod content;
mod error;
mod factory;
mod invocation;
mod method;
mod param;
pub mod prelude;
mod request;
mod tag;
pub mod transform;
mod url_resolver;
mod value;

pub use classify::classify;
pub use content::{
    Body, ContentSerializer, ContentType, FormContentSerializer, JsonContentSerializer,
    TextContentSerializer, resolve_content,
};
pub use error::{Error, Result};
pub use factory::{RequestFactory, RequestFactoryBuilder};
pub use invocation::{ApiGroup, Endpoint, InvocationDescriptor, ParamDecl};
pub use method::Method;
pub use param::{Parameter, ParameterRole, ResolvedParameters};
pub use request::RequestDescriptor;
pub use tag::{CollectionFormat, ListTag, ParamTag};
pub use transform::{
    DefaultResolver, FormattableResolver, ListExpansion, ListTagTransformer, ParamTagTransformer,
    ParameterTransformer, Pipeline, TransformContext, Transformer, TransformerRegistry,
    TypeNameAsRoute,
};
pub use url_resolver::{encode_component, placeholders, resolve_url};
pub use value::{Formattable, NamedArg, Value};
