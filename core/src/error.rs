use crate::Vendor;
use std::fmt;
use thiserror::Error;

/// The error type for aisign operations.
///
/// One error value covers every failure of the signing layer. The [`ErrorKind`]
/// tells callers how to react, while `vendor`, `code` and `http_status` keep what
/// the vendor reported verbatim for diagnostics.
#[derive(Error, Debug)]
#[error("{message}{}", describe(.vendor, .code, .http_status))]
pub struct Error {
    kind: ErrorKind,
    vendor: Option<Vendor>,
    code: Option<String>,
    http_status: Option<u16>,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

fn describe(vendor: &Option<Vendor>, code: &Option<String>, status: &Option<u16>) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(v) = vendor {
        parts.push(format!("vendor: {v}"));
    }
    if let Some(c) = code {
        parts.push(format!("code: {c}"));
    }
    if let Some(s) = status {
        parts.push(format!("http status: {s}"));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-2xx HTTP status or connection failure.
    Transport,

    /// Missing or invalid credentials, or a rejected token grant.
    Auth,

    /// Vendor reported an application error.
    Vendor,

    /// Async task polling exhausted its attempt budget.
    Timeout,

    /// The requested capability does not exist for this vendor.
    Unsupported,

    /// Request cannot be built (missing required fields, etc.)
    RequestInvalid,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Unexpected errors (I/O, encoding, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            vendor: None,
            code: None,
            http_status: None,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Tag the error with the vendor that produced it.
    pub fn with_vendor(mut self, vendor: Vendor) -> Self {
        self.vendor = Some(vendor);
        self
    }

    /// Attach the vendor error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach the HTTP status of the reply.
    pub fn with_status(mut self, status: http::StatusCode) -> Self {
        self.http_status = Some(status.as_u16());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Vendor that produced this error, if known.
    pub fn vendor(&self) -> Option<Vendor> {
        self.vendor
    }

    /// Vendor error code, if the vendor reported one.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// HTTP status of the reply, if the error came from one.
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    /// Error message without the vendor decorations.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is an authentication error
    pub fn is_auth_error(&self) -> bool {
        self.kind == ErrorKind::Auth
    }

    /// Whether aisign would retry this error.
    ///
    /// Always `false`: no operation in this layer retries, retry policy belongs to the caller.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

// Convenience constructors
impl Error {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    /// Create a vendor error
    pub fn vendor_error(vendor: Vendor, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Vendor, message).with_vendor(vendor)
    }

    /// Create a timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Create an unsupported error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unsupported, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::Auth => write!(f, "authentication error"),
            ErrorKind::Vendor => write!(f, "vendor error"),
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::Unsupported => write!(f, "unsupported"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
