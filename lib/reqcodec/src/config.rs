//! HTTP adapter configuration types.

use std::time::Duration;

use derive_more::Display;

/// URL scheme used to reach the remote API.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Plain HTTP.
    #[default]
    #[display("http")]
    Http,
    /// HTTP over TLS.
    #[display("https")]
    Https,
}

/// Configuration for the [`HttpAdapter`](crate::HttpAdapter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpAdapterConfig {
    /// URL scheme.
    pub protocol: Protocol,
    /// Host name or address.
    pub host: String,
    /// Port, omitted from the base URL when `None`.
    pub port: Option<u16>,
    /// Whole-exchange timeout, including body collection.
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
}

impl HttpAdapterConfig {
    /// Default whole-exchange timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default connection timeout.
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Configuration for `host` with every other option at its default.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self::builder(host).build()
    }

    /// Create a new configuration builder.
    #[must_use]
    pub fn builder(host: impl Into<String>) -> HttpAdapterConfigBuilder {
        HttpAdapterConfigBuilder::new(host)
    }

    /// Base URL requests are resolved against: `protocol://host[:port]`.
    ///
    /// ```
    /// use reqcodec::HttpAdapterConfig;
    ///
    /// let config = HttpAdapterConfig::builder("localhost").port(3333).build();
    /// assert_eq!(config.base_url(), "http://localhost:3333");
    /// ```
    #[must_use]
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{port}", self.protocol, self.host),
            None => format!("{}://{}", self.protocol, self.host),
        }
    }
}

/// Builder for [`HttpAdapterConfig`].
#[derive(Debug, Clone)]
pub struct HttpAdapterConfigBuilder {
    host: String,
    protocol: Option<Protocol>,
    port: Option<u16>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl HttpAdapterConfigBuilder {
    /// Create a builder for `host`.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            protocol: None,
            port: None,
            timeout: None,
            connect_timeout: None,
        }
    }

    /// Set the URL scheme.
    #[must_use]
    pub const fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    /// Set the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> HttpAdapterConfig {
        HttpAdapterConfig {
            protocol: self.protocol.unwrap_or_default(),
            host: self.host,
            port: self.port,
            timeout: self.timeout.unwrap_or(HttpAdapterConfig::DEFAULT_TIMEOUT),
            connect_timeout: self
                .connect_timeout
                .unwrap_or(HttpAdapterConfig::DEFAULT_CONNECT_TIMEOUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = HttpAdapterConfig::new("localhost");
        assert_eq!(config.protocol, Protocol::Http);
        assert_eq!(config.port, None);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn base_url_defaults_to_http() {
        let config = HttpAdapterConfig::builder("localhost").port(3333).build();
        assert_eq!(config.base_url(), "http://localhost:3333");
    }

    #[test]
    fn base_url_without_port() {
        let config = HttpAdapterConfig::builder("api.example.com")
            .protocol(Protocol::Https)
            .build();
        assert_eq!(config.base_url(), "https://api.example.com");
    }

    #[test]
    fn builder_overrides() {
        let config = HttpAdapterConfig::builder("127.0.0.1")
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn protocol_display() {
        assert_eq!(Protocol::Http.to_string(), "http");
        assert_eq!(Protocol::Https.to_string(), "https");
    }
}
