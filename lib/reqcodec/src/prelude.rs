//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, functions, and macros
//! for easy glob importing:
//!
//! ```ignore
//! use reqcodec::prelude::*;
//! ```

pub use crate::{
    CodecFactory, Decoder, Error, GenericRequest, GenericResponse, HttpAdapter, HttpAdapterConfig,
    Kind, Method, ObjectSchema, ParamMap, PathParams, PathTemplate, PathValue, Protocol,
    RequestAdapter, RequestCodec, Result, SerdeDecoder, ValidationErrors, adapter_fn, decoder_fn,
};
pub use serde::{Deserialize, Serialize};
