//! HTTP adapter implementation using hyper-util.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use derive_more::Display;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use reqcodec_core::{
    APPLICATION_JSON, CONTENT_TYPE, GenericRequest, GenericResponse, RequestAdapter,
    TRANSPORT_FAULT_CODE,
};
use serde_json::Value;
use tower_service::Service;
use tracing::{debug, warn};

use crate::config::HttpAdapterConfig;

/// Explanation used for non-success statuses without a canonical reason.
const UNKNOWN_STATUS: &str = "Unknown Status";

type HyperClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Why an exchange could not produce an HTTP status.
#[derive(Debug, Display)]
enum TransportFault {
    #[display("invalid request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[display("invalid request: {_0}")]
    InvalidRequest(http::Error),
    #[display("connection error: {_0}")]
    Connection(String),
    #[display("request timed out after {}ms", _0.as_millis())]
    Timeout(Duration),
    #[display("failed to read response body: {_0}")]
    Body(String),
    #[display("response body is not valid JSON: {_0}")]
    InvalidJson(serde_json::Error),
}

/// Create an HTTPS connector with rustls that also accepts plain HTTP.
fn https_connector(connect_timeout: Duration) -> HttpsConnector<HttpConnector> {
    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_connect_timeout(Some(connect_timeout));

    let root_store: rustls::RootCertStore =
        webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(http)
}

/// [`RequestAdapter`] that performs real HTTP exchanges.
///
/// The request URL is appended to the configured base URL. Every request is
/// sent with `Content-Type: application/json`; a caller-supplied content
/// type is dropped, other headers are forwarded as given.
///
/// Never fails: unreachable hosts, timeouts and unparsable bodies come back
/// as [`GenericResponse::Failure`] with code 500.
///
/// # Example
///
/// ```no_run
/// use reqcodec::{HttpAdapter, HttpAdapterConfig};
///
/// let config = HttpAdapterConfig::builder("localhost").port(3333).build();
/// let adapter = HttpAdapter::new(config);
/// assert_eq!(adapter.base_url(), "http://localhost:3333");
/// ```
#[derive(Clone)]
pub struct HttpAdapter {
    client: HyperClient,
    config: Arc<HttpAdapterConfig>,
    base_url: Arc<str>,
}

impl std::fmt::Debug for HttpAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAdapter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpAdapter {
    /// Create an adapter for the given configuration.
    #[must_use]
    pub fn new(config: HttpAdapterConfig) -> Self {
        let connector = https_connector(config.connect_timeout);
        let client = Client::builder(TokioExecutor::new()).build(connector);
        let base_url = Arc::from(config.base_url());

        Self {
            client,
            config: Arc::new(config),
            base_url,
        }
    }

    /// Get the adapter configuration.
    #[must_use]
    pub fn config(&self) -> &HttpAdapterConfig {
        &self.config
    }

    /// Base URL every request path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn exchange(&self, request: GenericRequest) -> GenericResponse {
        let method = request.method();
        let url = format!("{}{}", self.base_url, request.url());
        debug!(%method, %url, "dispatching request");

        match self.execute(&url, request).await {
            Ok(response) => response,
            Err(fault) => {
                warn!(%method, %url, error = %fault, code = TRANSPORT_FAULT_CODE, "transport fault");
                GenericResponse::transport_fault(fault.to_string())
            }
        }
    }

    async fn execute(
        &self,
        url: &str,
        request: GenericRequest,
    ) -> Result<GenericResponse, TransportFault> {
        let hyper_request = build_hyper_request(url, request)?;
        let timeout = self.config.timeout;

        let (status, body) = tokio::time::timeout(timeout, async {
            let response = self
                .client
                .request(hyper_request)
                .await
                .map_err(|err| TransportFault::Connection(err.to_string()))?;

            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|err| TransportFault::Body(err.to_string()))?
                .to_bytes();

            Ok::<_, TransportFault>((status, body))
        })
        .await
        .map_err(|_| TransportFault::Timeout(timeout))??;

        interpret_response(status, &body)
    }
}

/// Build a hyper request from a generic request and its absolute URL.
fn build_hyper_request(
    url: &str,
    request: GenericRequest,
) -> Result<http::Request<Full<Bytes>>, TransportFault> {
    let invalid_url = |reason: String| TransportFault::InvalidUrl {
        url: url.to_string(),
        reason,
    };
    let parsed = url::Url::parse(url).map_err(|e| invalid_url(e.to_string()))?;
    let uri: http::Uri = parsed
        .as_str()
        .parse()
        .map_err(|e: http::uri::InvalidUri| invalid_url(e.to_string()))?;

    let (_, init) = request.into_parts();
    let mut builder = http::Request::builder()
        .method(http::Method::from(init.method()))
        .uri(uri);

    for (name, value) in init.headers() {
        if name.eq_ignore_ascii_case(CONTENT_TYPE) {
            continue;
        }
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder = builder.header(CONTENT_TYPE, APPLICATION_JSON);

    let body = init.body().cloned().map_or_else(Full::default, Full::new);
    builder.body(body).map_err(TransportFault::InvalidRequest)
}

/// Fold a received status and body into a [`GenericResponse`].
fn interpret_response(status: StatusCode, body: &[u8]) -> Result<GenericResponse, TransportFault> {
    if !status.is_success() {
        let explanation = status.canonical_reason().unwrap_or(UNKNOWN_STATUS);
        return Ok(GenericResponse::failure(status.as_u16(), explanation));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenericResponse::ok(Value::Null));
    }

    let body = serde_json::from_slice(body).map_err(TransportFault::InvalidJson)?;
    Ok(GenericResponse::ok(body))
}

impl RequestAdapter for HttpAdapter {
    fn send(&self, request: GenericRequest) -> impl Future<Output = GenericResponse> + Send {
        self.exchange(request)
    }
}

// ============================================================================
// Tower Service Implementation
// ============================================================================

impl Service<GenericRequest> for HttpAdapter {
    type Response = GenericResponse;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<GenericResponse, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: GenericRequest) -> Self::Future {
        let adapter = self.clone();
        Box::pin(async move { Ok(adapter.exchange(request).await) })
    }
}
