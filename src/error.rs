//! Error types for the ArangoDB client
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Two classes of failure exist: transport errors (network, serialization)
//! wrap the source error unchanged, while protocol-level outcomes (HTTP
//! status codes, server-embedded error flags) are interpreted into values
//! by the calling module and only become errors where the contract says so.

use thiserror::Error;

/// The main error type for the ArangoDB client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid or incomplete connection configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong with the configuration
        message: String,
    },

    /// The configured endpoint is not a valid URL
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    // ============================================================================
    // Local Validation Errors
    // ============================================================================
    /// A document id did not split into two non-empty segments
    #[error("Invalid document id '{id}': expected \"<collection>/<key>\"")]
    InvalidDocumentId {
        /// The offending id
        id: String,
    },

    /// Required local state was missing; no request was made
    #[error("Precondition failed: {message}")]
    Precondition {
        /// Which precondition failed
        message: String,
    },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    /// The transport failed; propagated unchanged from `reqwest`
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // ============================================================================
    // Protocol Errors
    // ============================================================================
    /// A cursor batch refill was answered with a status other than 200
    #[error("Cursor batch request returned status code {status}")]
    BatchFetch {
        /// The HTTP status the server answered with
        status: u16,
    },

    /// The server reported an error in its response body
    #[error("Server error {error_num} (HTTP {code}): {message}")]
    Server {
        /// HTTP status echoed in the body
        code: u16,
        /// Server-specific error number
        error_num: i64,
        /// Server-provided error message
        message: String,
    },

    // ============================================================================
    // Data Errors
    // ============================================================================
    /// A value did not decode into the caller's target type
    #[error("Failed to decode row: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Create an invalid document id error
    pub fn invalid_document_id(id: impl Into<String>) -> Self {
        Self::InvalidDocumentId { id: id.into() }
    }

    /// Create a server error from the inline error echo in a response body
    pub fn server(code: u16, error_num: i64, message: impl Into<String>) -> Self {
        Self::Server {
            code,
            error_num,
            message: message.into(),
        }
    }

    /// Check if this error originated in the transport rather than locally
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}

/// Result type alias for the ArangoDB client
pub type Result<T> = std::result::Result<T, Error>;
