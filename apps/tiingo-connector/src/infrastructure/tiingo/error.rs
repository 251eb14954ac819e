//! Tiingo-specific error types.

use thiserror::Error;

/// Errors from the Tiingo adapter.
#[derive(Debug, Error)]
pub enum TiingoError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// The URL that was requested.
        url: String,
    },

    /// The catalog archive was empty or unreadable.
    #[error("catalog archive error: {0}")]
    Archive(String),

    /// The catalog table inside the archive could not be decoded.
    #[error("catalog table error: {0}")]
    Table(#[from] csv::Error),
}

impl TiingoError {
    /// Whether this error concerns a single request rather than the
    /// transport as a whole. Per-instrument callers skip these and keep
    /// going; everything else aborts the run.
    #[must_use]
    pub const fn is_per_request(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_status_errors_are_per_request() {
        let status = TiingoError::Status {
            status: 404,
            url: "http://example.invalid".to_string(),
        };
        assert!(status.is_per_request());

        let archive = TiingoError::Archive("no entries".to_string());
        assert!(!archive.is_per_request());
    }
}
