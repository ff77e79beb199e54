//! Error types for reqcodec.

use derive_more::{Display, Error, From};

use crate::ValidationErrors;

/// Main error type for request codec operations.
///
/// A request codec call fails with exactly one of these; nothing is retried
/// or recovered below the caller.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The adapter answered with a failure: a non-2xx status or a transport
    /// fault folded into a status code.
    #[display("failed to execute request: {code} {explanation}")]
    #[from(skip)]
    RequestFailed {
        /// Status code, or 500 for transport faults.
        code: u16,
        /// Status text or fault description.
        #[error(not(source))]
        explanation: String,
    },

    /// The response body did not satisfy the decoder.
    ///
    /// Displays one line per validation error.
    #[display("{_0}")]
    #[from]
    Validation(#[error(not(source))] ValidationErrors),

    /// The request body could not be serialized.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// The declared parameters of a codec do not match its template.
    #[display(
        "path parameters do not match template '{template}': missing {missing:?}, unexpected {unexpected:?}"
    )]
    #[from(skip)]
    ParamMismatch {
        /// The template as written.
        #[error(not(source))]
        template: String,
        /// Template parameters the declared names lack.
        missing: Vec<String>,
        /// Declared names the template does not use.
        unexpected: Vec<String>,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a request failure from a code and explanation.
    #[must_use]
    pub fn request_failed(code: u16, explanation: impl Into<String>) -> Self {
        Self::RequestFailed {
            code,
            explanation: explanation.into(),
        }
    }

    /// The failure code, if this is a request failure.
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` if the adapter reported a failure.
    #[must_use]
    pub const fn is_request_failed(&self) -> bool {
        matches!(self, Self::RequestFailed { .. })
    }

    /// Returns `true` if the response failed validation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` if this is a 404 request failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code() == Some(404)
    }

    /// The individual validation errors, if this is a validation failure.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
