//! Request/response logging middleware.
//!
//! This middleware logs adapter exchanges using the `tracing` crate.

use std::future::Future;
use std::time::Instant;

use reqcodec_core::{GenericRequest, GenericResponse, RequestAdapter};
use tower::Layer;
use tracing::{Instrument, Level, debug, info, span, warn};

/// Layer that adds request/response logging to a [`RequestAdapter`].
///
/// # Example
///
/// ```no_run
/// use reqcodec::middleware::{LoggingLayer, ServiceBuilder};
/// use reqcodec::{HttpAdapter, HttpAdapterConfig};
///
/// let adapter = ServiceBuilder::new()
///     .layer(LoggingLayer::new())
///     .service(HttpAdapter::new(HttpAdapterConfig::new("localhost")));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (request headers included).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that logs at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl<A> Layer<A> for LoggingLayer {
    type Service = Logging<A>;

    fn layer(&self, inner: A) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Adapter that logs requests and responses.
#[derive(Debug, Clone)]
pub struct Logging<A> {
    inner: A,
    level: LogLevel,
}

impl<A> Logging<A> {
    /// Create a new logging adapter wrapping the given adapter.
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
        }
    }

    /// The wrapped adapter.
    #[must_use]
    pub fn get_ref(&self) -> &A {
        &self.inner
    }
}

impl<A: RequestAdapter> RequestAdapter for Logging<A> {
    fn send(&self, request: GenericRequest) -> impl Future<Output = GenericResponse> + Send {
        let method = request.method();
        let url = request.url().to_string();
        let level = self.level;

        let span = span!(Level::INFO, "http_request", %method, %url);

        async move {
            let start = Instant::now();

            match level {
                LogLevel::Debug => {
                    debug!(
                        method = %method,
                        url = %url,
                        headers = ?request.headers(),
                        "sending request"
                    );
                }
                LogLevel::Info => {
                    info!(method = %method, url = %url, "sending request");
                }
            }

            let response = self.inner.send(request).await;

            // Saturating conversion to u64 (truncates after ~584 million years)
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &response {
                GenericResponse::Ok { .. } => {
                    info!(elapsed_ms, "request completed");
                }
                GenericResponse::Failure { code, explanation } => {
                    warn!(code, %explanation, elapsed_ms, "request failed with HTTP error");
                }
            }

            response
        }
        .instrument(span)
    }
}
