//! Error types for the Siemens facade
//!
//! Configuration errors (`Configuration`, `InvalidArgument`,
//! `UnsupportedTransport`) are raised at construction or bind time and always
//! reach the caller. Everything else describes a single failed read or write.

use thiserror::Error;

use crate::protocol::AccessResult;

/// Result type for facade operations
pub type SiemensResult<T> = Result<T, SiemensError>;

/// Errors produced by the Siemens facade and its collaborators
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SiemensError {
    /// Unrecognized device model or other unusable configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Selector value that names no transport kind
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Transport kind that is known but has no wrapper
    #[error("Unsupported transport: {transport}")]
    UnsupportedTransport { transport: String },

    /// Symbolic address could not be translated
    #[error("Address translation failed for '{address}': {message}")]
    Translation { address: String, message: String },

    /// Wrapper failed to exchange the request
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Wrapper gave up waiting for a reply
    #[error("Timeout: {message} (after {timeout_ms}ms)")]
    Timeout { message: String, timeout_ms: u64 },

    /// Underlying serial or socket I/O failure
    #[error("IO error: {message}")]
    Io { message: String },

    /// Response did not match the request that was sent
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// PLC rejected a write
    #[error("Access denied by PLC: {result}")]
    AccessDenied { result: AccessResult },
}

impl From<std::io::Error> for SiemensError {
    fn from(err: std::io::Error) -> Self {
        SiemensError::Io {
            message: err.to_string(),
        }
    }
}

impl SiemensError {
    pub fn configuration(message: impl Into<String>) -> Self {
        SiemensError::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        SiemensError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn unsupported_transport(transport: impl Into<String>) -> Self {
        SiemensError::UnsupportedTransport {
            transport: transport.into(),
        }
    }

    pub fn translation(address: impl Into<String>, message: impl Into<String>) -> Self {
        SiemensError::Translation {
            address: address.into(),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        SiemensError::Transport {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>, timeout_ms: u64) -> Self {
        SiemensError::Timeout {
            message: message.into(),
            timeout_ms,
        }
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        SiemensError::MalformedResponse {
            message: message.into(),
        }
    }

    /// Check whether this error belongs to the configuration class.
    ///
    /// Configuration errors are never absorbed by the lossy read/write API
    /// because they cannot happen during a call.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SiemensError::Configuration { .. }
                | SiemensError::InvalidArgument { .. }
                | SiemensError::UnsupportedTransport { .. }
        )
    }
}
