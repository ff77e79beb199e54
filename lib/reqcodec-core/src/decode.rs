//! Body serialization and response decoding.
//!
//! A [`Decoder`] turns untyped JSON into a typed value or a non-empty list of
//! [`ValidationError`]s. [`decode_or_fail`] runs one and converts a rejection
//! into [`Error::Validation`].

use std::fmt;
use std::marker::PhantomData;

use bytes::Bytes;
use serde_json::Value;

use crate::{Error, Result};

/// A single validation failure: where it happened and what was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    path: String,
    message: String,
}

impl ValidationError {
    /// Create a validation error at a field path (e.g. `user.address.city`).
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Path to the offending value. `.` is the document root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Human-readable expectation that was violated.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Ordered, non-empty list of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Build from a first error and any further ones.
    #[must_use]
    pub fn new(first: ValidationError, rest: impl IntoIterator<Item = ValidationError>) -> Self {
        let mut errors = vec![first];
        errors.extend(rest);
        Self { errors }
    }

    /// Build from a list, or `None` if it is empty.
    #[must_use]
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Errors in the order the decoder reported them.
    #[must_use]
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Number of errors, always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false`; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Schema capability: untyped JSON in, typed value or validation errors out.
pub trait Decoder: Send + Sync {
    /// The decoded type.
    type Output;

    /// Decode a JSON value.
    fn decode(&self, value: Value) -> std::result::Result<Self::Output, ValidationErrors>;
}

impl<D: Decoder + ?Sized> Decoder for &D {
    type Output = D::Output;

    fn decode(&self, value: Value) -> std::result::Result<Self::Output, ValidationErrors> {
        (**self).decode(value)
    }
}

/// Decoder for any `DeserializeOwned` type.
///
/// Errors carry the path of the failing field through `serde_path_to_error`.
/// Serde stops at the first problem, so the error list has one entry.
///
/// ```
/// use reqcodec_core::{Decoder, SerdeDecoder};
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Site { name: String }
///
/// let decoder = SerdeDecoder::<Site>::new();
/// let site = decoder.decode(serde_json::json!({"name": "home"})).expect("decode");
/// assert_eq!(site, Site { name: "home".to_string() });
/// ```
pub struct SerdeDecoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeDecoder<T> {
    /// Create a decoder for `T`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeDecoder<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SerdeDecoder<T> {}

impl<T> fmt::Debug for SerdeDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeDecoder")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: serde::de::DeserializeOwned> Decoder for SerdeDecoder<T> {
    type Output = T;

    fn decode(&self, value: Value) -> std::result::Result<T, ValidationErrors> {
        serde_path_to_error::deserialize(value).map_err(|e| {
            ValidationError::new(e.path().to_string(), e.inner().to_string()).into()
        })
    }
}

/// Decoder backed by a closure. See [`decoder_fn`].
#[derive(Clone, Copy)]
pub struct DecoderFn<F> {
    f: F,
}

impl<F> fmt::Debug for DecoderFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderFn").finish_non_exhaustive()
    }
}

/// Use a closure as a [`Decoder`].
///
/// ```
/// use reqcodec_core::{Decoder, ValidationError, decoder_fn};
///
/// let count = decoder_fn(|value: serde_json::Value| {
///     value
///         .as_u64()
///         .ok_or_else(|| ValidationError::new(".", "expected a count").into())
/// });
/// assert_eq!(count.decode(serde_json::json!(3)), Ok(3));
/// assert!(count.decode(serde_json::json!("three")).is_err());
/// ```
pub fn decoder_fn<F, T>(f: F) -> DecoderFn<F>
where
    F: Fn(Value) -> std::result::Result<T, ValidationErrors> + Send + Sync,
{
    DecoderFn { f }
}

impl<F, T> Decoder for DecoderFn<F>
where
    F: Fn(Value) -> std::result::Result<T, ValidationErrors> + Send + Sync,
{
    type Output = T;

    fn decode(&self, value: Value) -> std::result::Result<T, ValidationErrors> {
        (self.f)(value)
    }
}

/// Run `value` through `decoder`, turning a rejection into an error.
///
/// The decoded value is returned as the decoder produced it. A rejection
/// becomes [`Error::Validation`], whose message has one line per error.
pub fn decode_or_fail<D: Decoder + ?Sized>(decoder: &D, value: Value) -> Result<D::Output> {
    decoder.decode(value).map_err(Error::Validation)
}

/// Serialize a value to JSON bytes.
///
/// # Example
///
/// ```
/// use reqcodec_core::to_json;
///
/// let bytes = to_json(&serde_json::json!({"foo": "bar"})).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"foo":"bar"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}
