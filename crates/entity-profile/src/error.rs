//! Error types for profile composition and the data-fetch contract.
//!
//! Missing data is never an error here. These types only cover a failed
//! fetch or mutation and misuse of a profile session.

use thiserror::Error;

/// Failure reported by a data-fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The service answered but has no entity under this identifier.
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// The request never produced an answer.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The query executed and returned errors.
    #[error("Query failed: {}", .0.join("; "))]
    Query(Vec<String>),

    /// A mutation was refused.
    #[error("Update rejected for {urn}: {message}")]
    UpdateRejected {
        /// Entity the update targeted.
        urn: String,
        /// Reason given by the service.
        message: String,
    },
}

impl FetchError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Transport(_) => "TRANSPORT",
            Self::Query(_) => "QUERY_FAILED",
            Self::UpdateRejected { .. } => "UPDATE_REJECTED",
        }
    }

    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Errors raised by a profile session.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Fetch failed for {urn}: {source}")]
    Fetch {
        urn: String,
        #[source]
        source: FetchError,
    },

    #[error("No record loaded for {0}")]
    NotLoaded(String),

    #[error("Unknown tab '{0}'")]
    UnknownTab(String),
}

impl ProfileError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fetch { source, .. } => source.code(),
            Self::NotLoaded(_) => "NOT_LOADED",
            Self::UnknownTab(_) => "UNKNOWN_TAB",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_message_joins_all_errors() {
        let err = FetchError::Query(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Query failed: a; b");
        assert_eq!(err.code(), "QUERY_FAILED");
    }

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(FetchError::Transport("timeout".into()).is_retryable());
        assert!(!FetchError::NotFound("urn".into()).is_retryable());
    }

    #[test]
    fn test_profile_error_code_delegates_to_source() {
        let err = ProfileError::Fetch {
            urn: "urn:li:dataset:x".into(),
            source: FetchError::NotFound("urn:li:dataset:x".into()),
        };
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(
            ProfileError::UnknownTab("Nope".into()).code(),
            "UNKNOWN_TAB"
        );
    }
}
