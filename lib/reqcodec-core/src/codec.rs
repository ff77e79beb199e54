//! Request codecs: typed, reusable request functions.
//!
//! A [`CodecFactory`] owns an adapter. Each call to [`CodecFactory::codec`]
//! fixes a method, a path template and a response decoder, and returns a
//! [`RequestCodec`]. Calling the codec interpolates the path, serializes the
//! body, dispatches through the adapter, classifies the response and decodes
//! it:
//!
//! ```text
//! Built -> Interpolated -> Dispatched -> Classified -> Decoded | Failed
//! ```
//!
//! # Example
//!
//! ```
//! use reqcodec_core::{
//!     CodecFactory, GenericRequest, GenericResponse, Method, ParamMap, SerdeDecoder,
//!     adapter_fn,
//! };
//! use serde::Deserialize;
//!
//! #[derive(Debug, PartialEq, Deserialize)]
//! struct Site {
//!     id: u32,
//! }
//!
//! let adapter = adapter_fn(|request: GenericRequest| async move {
//!     assert_eq!(request.url(), "/sites/5");
//!     GenericResponse::ok(serde_json::json!({"id": 5}))
//! });
//!
//! let factory = CodecFactory::new(adapter);
//! let get_site = factory
//!     .codec::<ParamMap, (), _>(Method::Get, "/sites/:siteId", SerdeDecoder::<Site>::new())
//!     .expect("valid codec");
//!
//! # let runtime = tokio::runtime::Builder::new_current_thread().build().expect("runtime");
//! # runtime.block_on(async {
//! let site = get_site.call(&ParamMap::new().with("siteId", 5), &()).await?;
//! assert_eq!(site, Site { id: 5 });
//! # Ok::<(), reqcodec_core::Error>(())
//! # }).expect("call");
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{
    APPLICATION_JSON, CONTENT_TYPE, Decoder, GenericRequest, GenericResponse, Method, PathParams,
    PathTemplate, RequestAdapter, Result, decode_or_fail,
};

/// Builds [`RequestCodec`]s that share one adapter.
pub struct CodecFactory<A> {
    adapter: Arc<A>,
}

impl<A> Clone for CodecFactory<A> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
        }
    }
}

impl<A> fmt::Debug for CodecFactory<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecFactory").finish_non_exhaustive()
    }
}

impl<A: RequestAdapter> CodecFactory<A> {
    /// Create a factory around an adapter.
    #[must_use]
    pub fn new(adapter: A) -> Self {
        Self::from_shared(Arc::new(adapter))
    }

    /// Create a factory around an adapter that is already shared.
    #[must_use]
    pub const fn from_shared(adapter: Arc<A>) -> Self {
        Self { adapter }
    }

    /// The underlying adapter.
    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Build a request codec.
    ///
    /// `P` supplies path parameters and `B` is the request body type. If `P`
    /// declares its parameter names, they must match the template's exactly,
    /// or this returns [`Error::ParamMismatch`](crate::Error::ParamMismatch).
    pub fn codec<P, B, D>(
        &self,
        method: Method,
        template: impl Into<PathTemplate>,
        decoder: D,
    ) -> Result<RequestCodec<A, P, B, D>>
    where
        P: PathParams,
        B: serde::Serialize,
        D: Decoder,
    {
        let template = template.into();
        if let Some(names) = P::declared_names() {
            template.check_params(names)?;
        }

        Ok(RequestCodec {
            inner: Arc::new(CodecInner {
                method,
                template,
                decoder,
                adapter: Arc::clone(&self.adapter),
            }),
            _marker: PhantomData,
        })
    }

    /// Shorthand for a `GET` codec.
    pub fn get<P, B, D>(
        &self,
        template: impl Into<PathTemplate>,
        decoder: D,
    ) -> Result<RequestCodec<A, P, B, D>>
    where
        P: PathParams,
        B: serde::Serialize,
        D: Decoder,
    {
        self.codec(Method::Get, template, decoder)
    }

    /// Shorthand for a `POST` codec.
    pub fn post<P, B, D>(
        &self,
        template: impl Into<PathTemplate>,
        decoder: D,
    ) -> Result<RequestCodec<A, P, B, D>>
    where
        P: PathParams,
        B: serde::Serialize,
        D: Decoder,
    {
        self.codec(Method::Post, template, decoder)
    }

    /// Shorthand for a `PUT` codec.
    pub fn put<P, B, D>(
        &self,
        template: impl Into<PathTemplate>,
        decoder: D,
    ) -> Result<RequestCodec<A, P, B, D>>
    where
        P: PathParams,
        B: serde::Serialize,
        D: Decoder,
    {
        self.codec(Method::Put, template, decoder)
    }

    /// Shorthand for a `PATCH` codec.
    pub fn patch<P, B, D>(
        &self,
        template: impl Into<PathTemplate>,
        decoder: D,
    ) -> Result<RequestCodec<A, P, B, D>>
    where
        P: PathParams,
        B: serde::Serialize,
        D: Decoder,
    {
        self.codec(Method::Patch, template, decoder)
    }

    /// Shorthand for a `DELETE` codec.
    pub fn delete<P, B, D>(
        &self,
        template: impl Into<PathTemplate>,
        decoder: D,
    ) -> Result<RequestCodec<A, P, B, D>>
    where
        P: PathParams,
        B: serde::Serialize,
        D: Decoder,
    {
        self.codec(Method::Delete, template, decoder)
    }
}

struct CodecInner<A, D> {
    method: Method,
    template: PathTemplate,
    decoder: D,
    adapter: Arc<A>,
}

/// A reusable request function for one method and path template.
///
/// Cheap to clone; clones share the same immutable state. Calls are
/// independent of each other and may run concurrently.
pub struct RequestCodec<A, P, B, D> {
    inner: Arc<CodecInner<A, D>>,
    _marker: PhantomData<fn(&P, &B)>,
}

impl<A, P, B, D> Clone for RequestCodec<A, P, B, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

impl<A, P, B, D> fmt::Debug for RequestCodec<A, P, B, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestCodec")
            .field("method", &self.inner.method)
            .field("template", &self.inner.template.as_str())
            .finish_non_exhaustive()
    }
}

impl<A, P, B, D> RequestCodec<A, P, B, D>
where
    A: RequestAdapter,
    P: PathParams,
    B: serde::Serialize,
    D: Decoder,
{
    /// Method fixed at construction.
    #[must_use]
    pub fn method(&self) -> Method {
        self.inner.method
    }

    /// Template fixed at construction.
    #[must_use]
    pub fn template(&self) -> &PathTemplate {
        &self.inner.template
    }

    /// Build the request a call would send, without sending it.
    ///
    /// The path is interpolated, the body serialized to JSON, and
    /// `Content-Type: application/json` set.
    pub fn build_request(&self, params: &P, body: &B) -> Result<GenericRequest> {
        let url = self.inner.template.render(params);
        let body = crate::to_json(body)?;
        Ok(GenericRequest::builder(self.inner.method, url)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(body)
            .build())
    }

    /// Send a request and decode the response.
    ///
    /// Fails with [`Error::RequestFailed`](crate::Error::RequestFailed) if the
    /// adapter reports a failure, and with
    /// [`Error::Validation`](crate::Error::Validation) if the body does not
    /// satisfy the decoder.
    pub async fn call(&self, params: &P, body: &B) -> Result<D::Output> {
        let request = self.build_request(params, body)?;
        let response = self.inner.adapter.send(request).await;

        match response {
            GenericResponse::Ok { body } => decode_or_fail(&self.inner.decoder, body),
            GenericResponse::Failure { code, explanation } => {
                Err(crate::Error::RequestFailed { code, explanation })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert2::let_assert;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;
    use crate::{Error, Kind, ObjectSchema, ParamMap, PathValue, SerdeDecoder, adapter_fn};

    #[derive(Debug, Serialize)]
    struct SampleBody {
        foo: String,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Foo {
        foo: String,
    }

    struct SiteParams {
        site_id: u32,
    }

    impl PathParams for SiteParams {
        fn declared_names() -> Option<&'static [&'static str]> {
            Some(&["siteId"])
        }

        fn path_pairs(&self) -> Vec<(String, PathValue)> {
            vec![("siteId".to_string(), self.site_id.into())]
        }
    }

    fn respond(response: GenericResponse) -> impl RequestAdapter {
        adapter_fn(move |_request: GenericRequest| {
            let response = response.clone();
            async move { response }
        })
    }

    #[test]
    fn build_request_interpolates_and_serializes() {
        let factory = CodecFactory::new(respond(GenericResponse::ok(json!({}))));
        let codec = factory
            .post::<SiteParams, SampleBody, _>("/sites/:siteId", SerdeDecoder::<Foo>::new())
            .expect("codec");

        let request = codec
            .build_request(
                &SiteParams { site_id: 5 },
                &SampleBody {
                    foo: "bar".to_string(),
                },
            )
            .expect("request");

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.url(), "/sites/5");
        assert_eq!(request.body_text(), Some(r#"{"foo":"bar"}"#));
        assert_eq!(request.header("content-type"), Some("application/json"));
    }

    #[test]
    fn declared_names_are_checked_at_construction() {
        let factory = CodecFactory::new(respond(GenericResponse::ok(json!({}))));
        let result =
            factory.get::<SiteParams, (), _>("/sites/:id", SerdeDecoder::<Foo>::new());

        let_assert!(Err(Error::ParamMismatch { template, missing, unexpected }) = result);
        assert_eq!(template, "/sites/:id");
        assert_eq!(missing, ["id"]);
        assert_eq!(unexpected, ["siteId"]);
    }

    #[test]
    fn unit_params_require_static_template() {
        let factory = CodecFactory::new(respond(GenericResponse::ok(json!({}))));
        assert!(
            factory
                .get::<(), (), _>("/health", SerdeDecoder::<Foo>::new())
                .is_ok()
        );
        assert!(
            factory
                .get::<(), (), _>("/sites/:siteId", SerdeDecoder::<Foo>::new())
                .is_err()
        );
    }

    #[tokio::test]
    async fn ok_response_is_decoded() {
        let factory = CodecFactory::new(respond(GenericResponse::ok(json!({"foo": "bar"}))));
        let codec = factory
            .post::<ParamMap, SampleBody, _>("/test/:hello", SerdeDecoder::<Foo>::new())
            .expect("codec");

        let value = codec
            .call(
                &ParamMap::new().with("hello", "world"),
                &SampleBody {
                    foo: "x".to_string(),
                },
            )
            .await
            .expect("decoded");
        assert_eq!(
            value,
            Foo {
                foo: "bar".to_string()
            }
        );
    }

    #[tokio::test]
    async fn failure_response_is_rejected_with_code_and_explanation() {
        let adapter = respond(GenericResponse::failure(503, "Service Unavailable"));
        let factory = CodecFactory::new(adapter);
        let codec = factory
            .get::<(), (), _>("/status", SerdeDecoder::<Foo>::new())
            .expect("codec");

        let err = codec.call(&(), &()).await.expect_err("failure");
        let message = err.to_string();
        assert!(message.contains("503"), "{message}");
        assert!(message.contains("Service Unavailable"), "{message}");
        assert_eq!(err.code(), Some(503));
    }

    #[tokio::test]
    async fn decode_failure_is_rejected() {
        let adapter = respond(GenericResponse::ok(json!({"unexpectedField": 1})));
        let factory = CodecFactory::new(adapter);
        let codec = factory
            .get::<(), (), _>("/foo", ObjectSchema::new().field("foo", Kind::String))
            .expect("codec");

        let err = codec.call(&(), &()).await.expect_err("invalid");
        assert!(err.is_validation());
        assert!(err.to_string().contains("foo"));
    }

    #[tokio::test]
    async fn adapter_receives_exactly_one_request_per_call() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let adapter = adapter_fn(move |request: GenericRequest| {
            recorder
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(request.url().to_string());
            async { GenericResponse::ok(json!({"foo": "bar"})) }
        });

        let codec = CodecFactory::new(adapter)
            .get::<ParamMap, (), _>("/items/:id", SerdeDecoder::<Foo>::new())
            .expect("codec");

        for id in 1..=3 {
            codec
                .call(&ParamMap::new().with("id", id), &())
                .await
                .expect("call");
        }

        let seen = seen
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();
        assert_eq!(seen, ["/items/1", "/items/2", "/items/3"]);
    }
}
