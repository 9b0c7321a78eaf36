//! Error types for the hearth domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Tool failures are deliberately absent: tools catch internally and
//! return a descriptive string, never an error across the registry
//! boundary.

use thiserror::Error;

/// The top-level error type for all hearth operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Upstream model errors ---
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Console / transcript I/O ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the remote chat-completion endpoint.
///
/// A single failed call surfaces to the dispatch loop as a value; the
/// loop degrades to showing the error text and the session continues.
/// No variant is ever retried.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    #[error("Endpoint unreachable: {0}")]
    Network(String),

    #[error("Endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed completion payload: {0}")]
    MalformedResponse(String),

    #[error("Streaming chat is not implemented for provider '{0}'")]
    StreamingUnsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_displays_status() {
        let err = Error::Upstream(UpstreamError::Api {
            status: 503,
            message: "server warming up".into(),
        });
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("warming up"));
    }

    #[test]
    fn streaming_unsupported_names_provider() {
        let err = UpstreamError::StreamingUnsupported("nexa".into());
        assert!(err.to_string().contains("nexa"));
        assert!(err.to_string().contains("not implemented"));
    }
}
