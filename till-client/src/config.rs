//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | API_USERNAME | (required) | Account email sent to the token endpoint |
//! | API_KEY | (required) | Secret key sent to the token endpoint |
//! | TOKEN_URL | (required) | Token endpoint |
//! | ORDER_URL | (required) | Order URL template, `%s` is replaced by the order ID |
//! | HEADER_KEY | (required) | Custom header name sent with every request |
//! | HEADER_VALUE | (required) | Custom header value |
//! | REQUEST_TIMEOUT_SECS | 30 | Request timeout in seconds |

use crate::{ClientError, ClientResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Placeholder in the order URL template replaced by the order identifier
pub const ORDER_ID_PLACEHOLDER: &str = "%s";

/// Client configuration for the order service
#[derive(Clone)]
pub struct ClientConfig {
    /// Account identifier (email) for the token endpoint
    pub email: String,

    /// Secret key for the token endpoint
    pub key: String,

    /// Token endpoint URL
    pub token_url: String,

    /// Order endpoint URL template containing `%s`
    pub order_url: String,

    /// Custom header name attached to every request
    pub header_name: String,

    /// Custom header value attached to every request
    pub header_value: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a configuration for the given endpoints
    pub fn new(token_url: impl Into<String>, order_url: impl Into<String>) -> Self {
        Self {
            email: String::new(),
            key: String::new(),
            token_url: token_url.into(),
            order_url: order_url.into(),
            header_name: String::new(),
            header_value: String::new(),
            timeout: 30,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through a variable lookup function
    ///
    /// Unset and empty variables are treated the same.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ClientError::MissingEnv(name))
        };

        let timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(v) => v.trim().parse().map_err(|_| {
                ClientError::InvalidConfig(format!("REQUEST_TIMEOUT_SECS is not a number: {}", v))
            })?,
            None => 30,
        };

        let config = Self::new(required("TOKEN_URL")?, required("ORDER_URL")?)
            .with_credentials(required("API_USERNAME")?, required("API_KEY")?)
            .with_header(required("HEADER_KEY")?, required("HEADER_VALUE")?)
            .with_timeout(timeout);

        config.validate()?;
        Ok(config)
    }

    /// Set the account credentials
    pub fn with_credentials(mut self, email: impl Into<String>, key: impl Into<String>) -> Self {
        self.email = email.into();
        self.key = key.into();
        self
    }

    /// Set the custom header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.header_name = name.into();
        self.header_value = value.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Check that the order URL template and custom header are usable
    pub fn validate(&self) -> ClientResult<()> {
        if !self.order_url.contains(ORDER_ID_PLACEHOLDER) {
            return Err(ClientError::InvalidConfig(format!(
                "ORDER_URL must contain {}: {}",
                ORDER_ID_PLACEHOLDER, self.order_url
            )));
        }
        self.default_headers().map(|_| ())
    }

    /// Headers attached to every request (the custom header, if any)
    pub fn default_headers(&self) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        if self.header_name.is_empty() {
            return Ok(headers);
        }

        let name = HeaderName::from_bytes(self.header_name.as_bytes()).map_err(|_| {
            ClientError::InvalidConfig(format!("Invalid header name: {}", self.header_name))
        })?;
        let value = HeaderValue::from_str(&self.header_value).map_err(|_| {
            ClientError::InvalidConfig(format!("Invalid value for header {}", self.header_name))
        })?;
        headers.insert(name, value);
        Ok(headers)
    }

    /// Create the shared HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout))
            .default_headers(self.default_headers()?)
            .build()?;
        Ok(client)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("email", &self.email)
            .field("key", &"<redacted>")
            .field("token_url", &self.token_url)
            .field("order_url", &self.order_url)
            .field("header_name", &self.header_name)
            .field("header_value", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
