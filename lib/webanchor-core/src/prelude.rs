//! Prelude module for convenient imports.
//!
//! ```ignore
//! use webanchor_core::prelude::*;
//! ```

pub use crate::{
    ApiGroup, CollectionFormat, ContentSerializer, Endpoint, Error, Formattable,
    InvocationDescriptor, ListTag, Method, NamedArg, ParamDecl, ParamTag, Parameter,
    ParameterRole, RequestDescriptor, RequestFactory, Result, Transformer, Value, args,
};
