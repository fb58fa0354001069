//! Prelude module for convenient imports.
//!
//! ```ignore
//! use webanchor::prelude::*;
//! ```

pub use crate::{
    AnchorClient, ApiGroup, ClientConfig, Endpoint, Error, HttpClient, InvocationDescriptor,
    ListTag, Method, NamedArg, ParamDecl, ParamTag, Request, Response, Result, Value, args,
};

pub use serde::{Deserialize, Serialize};
