use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod config;

pub use config::LoaderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

/// An outbound call as issued by page code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl NetworkRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Whatever the network handed back. The body is opaque to the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Error categories for network failures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection refused, reset, DNS failures
    Network,
    /// The request could not be built (bad url, bad header)
    InvalidRequest,
    /// Timeout errors
    Timeout,
    /// Body could not be read or decoded
    Body,
    /// Redirect loops or limits
    Redirect,
    /// Unknown or uncategorized errors
    Unknown,
}

/// Structured network failure. Handed back to the caller exactly as the
/// underlying client produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkError {
    /// Error category for programmatic handling
    pub category: ErrorCategory,
    /// Human-readable error message
    pub message: String,
    /// Optional context (url, method, ...)
    pub context: serde_json::Value,
    /// Whether retrying the same call could succeed
    pub recoverable: bool,
}

impl NetworkError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            context: serde_json::json!({}),
            recoverable: false,
        }
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = context;
        self
    }

    pub fn recoverable(mut self) -> Self {
        self.recoverable = true;
        self
    }

    // Convenience constructors
    pub fn connection_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Network, message).recoverable()
    }

    pub fn timeout_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Timeout, message).recoverable()
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InvalidRequest, message)
    }

    pub fn body_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Body, message)
    }
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.category, self.message)
    }
}

impl std::error::Error for NetworkError {}

/// The ambient network primitive. Everything the page fetches goes through
/// one of these.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    async fn call(&self, request: NetworkRequest) -> Result<NetworkResponse, NetworkError>;
}

#[async_trait]
impl<C: NetworkClient + ?Sized> NetworkClient for std::sync::Arc<C> {
    async fn call(&self, request: NetworkRequest) -> Result<NetworkResponse, NetworkError> {
        (**self).call(request).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Overlay shown, content hidden
    Visible,
    /// Overlay hidden, content shown
    Hidden,
}

/// Rendering surface for the overlay/content pair.
///
/// Both calls are unconditional: `show` puts the overlay up and hides the
/// content, `hide` does the reverse. Repeating a call must leave the surface
/// in the same state.
///
/// The gate calls these while holding its state lock. Implementations must
/// not call back into the gate (`snapshot`, `visibility`, ...) or they will
/// deadlock.
pub trait Display: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

impl<D: Display + ?Sized> Display for std::sync::Arc<D> {
    fn show(&self) {
        (**self).show()
    }

    fn hide(&self) {
        (**self).hide()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("element #{0} not found in host page")]
    MissingElement(String),
    #[error("invalid markup: {0}")]
    Markup(String),
    #[error("script evaluation failed: {0}")]
    Script(String),
}
