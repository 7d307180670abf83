//! API call results and the client-side error taxonomy.
//!
//! Every remote call resolves to exactly one [`ApiResult`] - network-layer
//! failures are folded into it rather than propagated as faults. The server
//! itself only ever sends `{success, message}`; `errorType` is attached on
//! the client when the failure is local (transport, parse, HTTP status).

use serde::{Deserialize, Serialize};

/// Fixed taxonomy of remote-call failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Transport/connectivity failure
    NetworkError,
    /// Failure reading a received body
    IoError,
    /// Body received but not valid JSON / not the expected shape
    ParseError,
    /// Non-2xx, non-404 HTTP status
    ServerError,
    /// 404 on key lookup - the expected "key does not exist" signal, not an
    /// error to log loudly
    KeyNotFound,
    /// Failure constructing the outgoing request itself
    RequestError,
    /// Unknown category for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ErrorKind {
    /// Short user-facing string for key-validation feedback.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::KeyNotFound => "Invalid event key",
            Self::NetworkError | Self::IoError | Self::RequestError => "Can't reach the server",
            Self::ServerError | Self::ParseError | Self::Unknown => "An unexpected error occurred",
        }
    }
}

/// Result of any remote call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult {
    pub success: bool,
    pub message: String,
    /// Populated only on failure
    #[serde(rename = "errorType", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorKind>,
}

impl ApiResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error_type: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error_type: None,
        }
    }

    pub fn error_with_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error_type: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
