//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use reqcodec_core::prelude::*;
//! ```

pub use crate::{
    CodecFactory, Decoder, Error, GenericRequest, GenericResponse, Kind, Method, ObjectSchema,
    ParamMap, PathParams, PathTemplate, PathValue, RequestAdapter, RequestCodec, Result,
    SerdeDecoder, ValidationError, ValidationErrors, adapter_fn, decoder_fn,
};
