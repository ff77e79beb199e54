//! Bridge from tower services to [`RequestAdapter`].

use std::fmt::Display;
use std::future::Future;

use reqcodec_core::{GenericRequest, GenericResponse, RequestAdapter};
use tower::ServiceExt;
use tower_service::Service;
use tracing::warn;

/// Use a tower [`Service`] as a [`RequestAdapter`].
///
/// This lets tower middleware such as `timeout` sit in front of an
/// adapter. Service errors become transport faults with code 500 and the
/// error's message as explanation.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use reqcodec::middleware::ServiceBuilder;
/// use reqcodec::{CodecFactory, HttpAdapter, HttpAdapterConfig, ServiceAdapter};
///
/// let service = ServiceBuilder::new()
///     .timeout(Duration::from_secs(5))
///     .service(HttpAdapter::new(HttpAdapterConfig::new("localhost")));
///
/// let factory = CodecFactory::new(ServiceAdapter::new(service));
/// ```
#[derive(Debug, Clone)]
pub struct ServiceAdapter<S> {
    inner: S,
}

impl<S> ServiceAdapter<S> {
    /// Wrap a service.
    #[must_use]
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Consume the adapter, returning the wrapped service.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> RequestAdapter for ServiceAdapter<S>
where
    S: Service<GenericRequest, Response = GenericResponse> + Clone + Send + Sync,
    S::Error: Display,
    S::Future: Send,
{
    fn send(&self, request: GenericRequest) -> impl Future<Output = GenericResponse> + Send {
        // Each call drives its own clone, so `&self` stays shareable
        let service = self.inner.clone();
        async move {
            match service.oneshot(request).await {
                Ok(response) => response,
                Err(err) => {
                    warn!(error = %err, "service error");
                    GenericResponse::transport_fault(err.to_string())
                }
            }
        }
    }
}
