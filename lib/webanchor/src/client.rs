//! Transport contract.

use std::future::Future;

use crate::{Request, Response, Result};

/// Executes HTTP requests.
///
/// The request synthesis performs no I/O; an implementation of this trait
/// sends the resulting request over whatever transport it wraps (a pooled
/// HTTP client, a test double, a recorded session).
///
/// Implementations return the response for every status code. Mapping
/// non-2xx statuses to errors is done by
/// [`AnchorClient`](crate::AnchorClient).
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::Error::Transport) when the request
    /// could not be sent or the response could not be read.
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

impl<C> HttpClient for &C
where
    C: HttpClient,
{
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).execute(request)
    }
}

impl<C> HttpClient for std::sync::Arc<C>
where
    C: HttpClient,
{
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).execute(request)
    }
}
