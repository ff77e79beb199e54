//! The transport seam.
//!
//! - [`RequestAdapter`] - performs one exchange, always resolving to a
//!   [`GenericResponse`]
//! - [`adapter_fn`] - turns a closure into an adapter, mostly for test doubles
//!
//! The hyper-based HTTP adapter lives in the `reqcodec` crate.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::{GenericRequest, GenericResponse};

/// Transport capability injected into a [`CodecFactory`](crate::CodecFactory).
///
/// Implementations own the network boundary. They must never fail: DNS
/// errors, refused connections, timeouts and unreadable bodies are all
/// reported as [`GenericResponse::Failure`], with code 500 unless something
/// more specific is known.
pub trait RequestAdapter: Send + Sync {
    /// Perform the exchange described by `request`.
    fn send(&self, request: GenericRequest) -> impl Future<Output = GenericResponse> + Send;
}

impl<A: RequestAdapter> RequestAdapter for Arc<A> {
    fn send(&self, request: GenericRequest) -> impl Future<Output = GenericResponse> + Send {
        (**self).send(request)
    }
}

impl<A: RequestAdapter> RequestAdapter for &A {
    fn send(&self, request: GenericRequest) -> impl Future<Output = GenericResponse> + Send {
        (**self).send(request)
    }
}

/// Adapter backed by a closure. See [`adapter_fn`].
#[derive(Clone, Copy)]
pub struct AdapterFn<F> {
    f: F,
}

impl<F> fmt::Debug for AdapterFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterFn").finish_non_exhaustive()
    }
}

/// Use an async closure as a [`RequestAdapter`].
///
/// # Example
///
/// ```
/// use reqcodec_core::{GenericRequest, GenericResponse, adapter_fn};
///
/// let echo_path = adapter_fn(|request: GenericRequest| async move {
///     GenericResponse::ok(serde_json::json!({ "path": request.url() }))
/// });
/// # let _ = echo_path;
/// ```
pub fn adapter_fn<F, Fut>(f: F) -> AdapterFn<F>
where
    F: Fn(GenericRequest) -> Fut + Send + Sync,
    Fut: Future<Output = GenericResponse> + Send,
{
    AdapterFn { f }
}

impl<F, Fut> RequestAdapter for AdapterFn<F>
where
    F: Fn(GenericRequest) -> Fut + Send + Sync,
    Fut: Future<Output = GenericResponse> + Send,
{
    fn send(&self, request: GenericRequest) -> impl Future<Output = GenericResponse> + Send {
        (self.f)(request)
    }
}
