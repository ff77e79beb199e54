//! Tower middleware layers for reqcodec adapters.
//!
//! Layers wrap any [`RequestAdapter`](crate::RequestAdapter) using Tower's
//! `Layer` trait, and compose with [`ServiceBuilder`].
//!
//! - [`LoggingLayer`] - Logs exchanges using `tracing`
//!
//! Tower's own middleware (`timeout` for instance) needs a
//! `Service`; [`HttpAdapter`](crate::HttpAdapter) is one, and
//! [`ServiceAdapter`](crate::ServiceAdapter) turns the stack back into an
//! adapter.
//!
//! # Example
//!
//! ```no_run
//! use reqcodec::middleware::{LoggingLayer, ServiceBuilder};
//! use reqcodec::{CodecFactory, HttpAdapter, HttpAdapterConfig};
//!
//! let adapter = ServiceBuilder::new()
//!     .layer(LoggingLayer::debug())
//!     .service(HttpAdapter::new(HttpAdapterConfig::new("localhost")));
//!
//! let factory = CodecFactory::new(adapter);
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
