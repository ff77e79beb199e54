//! Typed HTTP request codecs for Rust.
//!
//! Declare a request once (method, `:name` path template, response decoder)
//! and call it many times with typed parameters and bodies. Responses are
//! validated before they reach your code; failures and validation errors come
//! back as [`Error`].
//!
//! # Example
//!
//! ```no_run
//! use reqcodec::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! struct Foo {
//!     foo: String,
//! }
//!
//! #[derive(Serialize)]
//! struct Test {
//!     test: u32,
//! }
//!
//! #[derive(PathParams)]
//! struct Hello {
//!     hello: String,
//! }
//!
//! # async fn run() -> reqcodec::Result<()> {
//! let adapter = HttpAdapter::new(HttpAdapterConfig::builder("localhost").port(3333).build());
//! let factory = CodecFactory::new(adapter);
//! let post_test = factory.post::<Hello, Test, _>("/test/:hello", SerdeDecoder::<Foo>::new())?;
//!
//! let params = Hello { hello: "world".to_string() };
//! let foo = post_test.call(&params, &Test { test: 42 }).await?;
//! assert_eq!(foo.foo, "bar");
//! # Ok(())
//! # }
//! ```

mod config;
mod http_adapter;
pub mod middleware;
pub mod prelude;
mod service;

// Re-export adapter types
pub use config::{HttpAdapterConfig, HttpAdapterConfigBuilder, Protocol};
pub use http_adapter::HttpAdapter;
pub use service::ServiceAdapter;

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use reqcodec_core::{
    APPLICATION_JSON, AdapterFn, CONTENT_TYPE, CodecFactory, Decoder, DecoderFn, Error,
    GenericRequest, GenericRequestBuilder, GenericResponse, Kind, Method, ObjectSchema,
    PARAM_PREFIX, ParamMap, PathParams, PathTemplate, PathValue, RequestAdapter, RequestCodec,
    RequestInit, Result, Segment, SerdeDecoder, TRANSPORT_FAULT_CODE, ToPathValue,
    UnknownMethod, ValidationError, ValidationErrors, adapter_fn, decode_or_fail, decoder_fn,
    interpolate, to_json,
};

// Re-export macros
pub use reqcodec_macro::PathParams;
