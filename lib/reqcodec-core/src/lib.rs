//! Core types and traits for reqcodec typed request codecs.
//!
//! This crate provides the pure request pipeline used by reqcodec:
//! - [`PathTemplate`] - `:name` path templates, parsing and interpolation
//! - [`PathParams`], [`ParamMap`] and [`PathValue`] - path parameter sources
//! - [`GenericRequest`] and [`GenericResponse`] - transport-agnostic envelopes
//! - [`RequestAdapter`] - the transport seam
//! - [`Decoder`], [`SerdeDecoder`] and [`ObjectSchema`] - response validation
//! - [`CodecFactory`] and [`RequestCodec`] - the composed request function
//! - [`Error`] and [`Result`] - Error handling
//!
//! Nothing here performs I/O; the HTTP adapter lives in the `reqcodec` crate.

mod adapter;
mod codec;
mod decode;
mod envelope;
mod error;
mod method;
mod params;
mod path_template;
pub mod prelude;
mod schema;

pub use adapter::{AdapterFn, RequestAdapter, adapter_fn};
pub use codec::{CodecFactory, RequestCodec};
pub use decode::{
    Decoder, DecoderFn, SerdeDecoder, ValidationError, ValidationErrors, decode_or_fail,
    decoder_fn, to_json,
};
pub use envelope::{
    APPLICATION_JSON, CONTENT_TYPE, GenericRequest, GenericRequestBuilder, GenericResponse,
    RequestInit, TRANSPORT_FAULT_CODE,
};
pub use error::{Error, Result};
pub use method::{Method, UnknownMethod};
pub use params::{ParamMap, PathParams, PathValue, ToPathValue};
pub use path_template::{PARAM_PREFIX, PathTemplate, Segment, interpolate};
pub use schema::{Kind, ObjectSchema};
