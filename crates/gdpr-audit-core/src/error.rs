//! Error taxonomy for a single audit request.
//!
//! Only two classes of failure reach the user: a missing scan
//! (`NotFound`) and a failure talking to the backing API (`Transport`).
//! Malformed upstream JSON and partially populated payloads are recovered
//! inside normalization and never appear here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// No scan exists for the requested domain.
    #[error("No scan results found for \"{domain}\".")]
    NotFound { domain: String },

    /// Network or HTTP failure talking to the scan API. Safe to retry.
    #[error("{0}")]
    Transport(String),

    /// The request could not be formed from the user's input.
    #[error("{0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    /// Only transport failures are worth retrying unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AuditError::Transport(_))
    }

    /// Actionable follow-up text for the user, if this error has one.
    pub fn remediation(&self) -> Option<String> {
        match self {
            AuditError::NotFound { .. } => Some(
                "To scan this website:\n\
                 1. Add the domain to app/domains.txt\n\
                 2. Run: ./gradlew :app:run\n\
                 3. Wait for scan to complete\n\
                 4. Refresh this page and search again"
                    .to_string(),
            ),
            AuditError::Transport(_) => {
                Some("Check that the scan API is running and try again.".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_domain_and_has_remediation() {
        let err = AuditError::NotFound {
            domain: "example.com".into(),
        };

        assert_eq!(
            err.to_string(),
            "No scan results found for \"example.com\"."
        );
        assert!(err.remediation().unwrap().contains("domains.txt"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn only_transport_is_retryable() {
        assert!(AuditError::Transport("connection refused".into()).is_retryable());
        assert!(!AuditError::InvalidInput("empty".into()).is_retryable());
    }

    #[test]
    fn transport_message_is_verbatim() {
        let err = AuditError::Transport("Internal Server Error".into());
        assert_eq!(err.to_string(), "Internal Server Error");
    }
}
