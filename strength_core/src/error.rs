//! Error types for the strength_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for strength_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Workout input document could not be used
    #[error("Input error: {0}")]
    Input(String),

    /// The remote service answered with a non-success status
    #[error("Service rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the service refused the payload itself (HTTP 400 / 422).
    ///
    /// This is the only failure class that triggers the robust fallback.
    pub fn is_validation_rejection(&self) -> bool {
        matches!(self, Error::Rejected { status: 400 | 422, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_is_validation_rejection() {
        let err = Error::Rejected {
            status: 400,
            body: "Invalid category".into(),
        };
        assert!(err.is_validation_rejection());

        let err = Error::Rejected {
            status: 422,
            body: String::new(),
        };
        assert!(err.is_validation_rejection());
    }

    #[test]
    fn test_other_failures_are_not_validation_rejections() {
        let unauthorized = Error::Rejected {
            status: 401,
            body: "token expired".into(),
        };
        assert!(!unauthorized.is_validation_rejection());

        let server = Error::Rejected {
            status: 500,
            body: String::new(),
        };
        assert!(!server.is_validation_rejection());

        assert!(!Error::Transport("connection reset".into()).is_validation_rejection());
    }
}
