//! Error taxonomy for the refresh pipeline
//!
//! Two layers: [`FetchError`] describes why one fetch attempt failed and is
//! produced by the API/fetch layer without further classification.
//! [`RefreshError`] is the classification the orchestrator attaches to a
//! whole refresh cycle and is consumed exhaustively by the schedule policy,
//! so an unhandled error kind cannot silently fall through.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Why a single fetch attempt failed
///
/// A 401-style status after the credential gate has already passed stays a
/// `Status` failure here - it is never re-classified as unauthorized within
/// one refresh cycle, which would otherwise invite credential-refresh loops.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Network-level failure (connect, DNS, broken transfer)
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Remote returned a non-success HTTP status
    #[error("server returned status {0}")]
    Status(u16),

    /// Response body could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Attempt exceeded its time budget
    #[error("fetch attempt timed out after {0:?}")]
    Timeout(Duration),
}

impl FetchError {
    /// Wrap an arbitrary transport-level cause
    pub fn transport<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(source))
    }

    /// Wrap a decode failure
    pub fn decode<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode(Box::new(source))
    }
}

/// Classification of a whole refresh cycle's failure
///
/// The two variants are mutually exclusive and drive distinct scheduling:
/// an unauthorized state waits for external re-authentication, a service
/// failure retries on a short backoff.
#[derive(Debug)]
#[non_exhaustive]
pub enum RefreshError {
    /// No usable credential was available; no network attempt was made
    Unauthorized,

    /// Network or remote failure after the retry budget was exhausted
    Service(FetchError),
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "no valid credential available"),
            Self::Service(cause) => write!(f, "service failure after retries: {}", cause),
        }
    }
}

impl std::error::Error for RefreshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unauthorized => None,
            Self::Service(cause) => Some(cause),
        }
    }
}

impl RefreshError {
    /// Check if this is the unauthorized terminal state
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if this is a service failure (degradable via cache)
    #[must_use]
    pub const fn is_service(&self) -> bool {
        matches!(self, Self::Service(_))
    }

    /// Get the appropriate log level for this error
    ///
    /// Unauthorized needs operator attention (re-authenticate); service
    /// failures are usually transient.
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        match self {
            Self::Unauthorized => tracing::Level::ERROR,
            Self::Service(_) => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Status(503);
        assert!(err.to_string().contains("503"));

        let err = FetchError::Timeout(Duration::from_secs(5));
        assert!(err.to_string().contains("timed out"));

        let err = FetchError::transport(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_refresh_error_display() {
        let err = RefreshError::Unauthorized;
        assert!(err.to_string().contains("credential"));

        let err = RefreshError::Service(FetchError::Status(500));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_classification_helpers() {
        assert!(RefreshError::Unauthorized.is_unauthorized());
        assert!(!RefreshError::Unauthorized.is_service());

        let service = RefreshError::Service(FetchError::Status(500));
        assert!(service.is_service());
        assert!(!service.is_unauthorized());
    }

    #[test]
    fn test_error_source_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout");
        let fetch = FetchError::transport(io_err);
        assert!(fetch.source().is_some());

        let refresh = RefreshError::Service(fetch);
        assert!(refresh.source().is_some());
        assert!(RefreshError::Unauthorized.source().is_none());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(RefreshError::Unauthorized.log_level(), tracing::Level::ERROR);
        assert_eq!(
            RefreshError::Service(FetchError::Status(500)).log_level(),
            tracing::Level::WARN
        );
        assert_eq!(
            RefreshError::Service(FetchError::Timeout(Duration::from_secs(5))).log_level(),
            tracing::Level::WARN
        );
    }
}
