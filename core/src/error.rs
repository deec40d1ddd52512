//! Error taxonomy for the See client.
//!
//! # Design
//! Every failure a caller can observe is one of three kinds:
//! - `ValidationError`: the input was rejected locally, nothing was sent.
//! - `ServiceError`: the backend answered with its own error envelope.
//! - `NetworkError`: the request failed in transit, or the failure could not
//!   be attributed to the backend's envelope.
//!
//! `SeeError` wraps the three so call sites can use `?` and callers can
//! `match` on the kind. `TransportError` is the raw executor failure; only
//! the classifier turns it into a `SeeError`.

use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeeError>;

/// Caller-input defect detected before any I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The backend explicitly rejected the request.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} ({code})")]
pub struct ServiceError {
    code: String,
    message: String,
    details: Option<Value>,
}

impl ServiceError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Backend-provided error code, `UNKNOWN_ERROR` when it sent none.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

/// Transport-level failure, or an error outside the backend's envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NetworkError {
    message: String,
    status: Option<u16>,
}

impl NetworkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, when a response was received at all.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

/// Any error returned by the client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeeError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

impl SeeError {
    /// Only network failures are plausibly transient. Invalid input never
    /// becomes valid by retrying, and backend rejections carry a reason the
    /// caller has to look at.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SeeError::Network(_))
    }

    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            SeeError::Validation(err) => Some(err),
            _ => None,
        }
    }

    pub fn as_service(&self) -> Option<&ServiceError> {
        match self {
            SeeError::Service(err) => Some(err),
            _ => None,
        }
    }

    pub fn as_network(&self) -> Option<&NetworkError> {
        match self {
            SeeError::Network(err) => Some(err),
            _ => None,
        }
    }
}

/// A request that never produced a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("I/O error: {0}")]
    Io(String),

    /// The status line arrived but the body could not be read.
    #[error("failed to read response body: {message}")]
    Body { status: u16, message: String },

    #[error("{0}")]
    Other(String),
}
