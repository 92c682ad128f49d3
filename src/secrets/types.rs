//! Core types for secret resolution.

use async_trait::async_trait;
use thiserror::Error;

use super::canonical::CanonicalAddress;
use super::encoding::OutputEncoding;

// ============================================================================
// Resolver Trait
// ============================================================================

/// Why a backend could not return a secret.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The secret or version does not exist.
    #[error("secret version '{address}' not found")]
    NotFound { address: String },

    /// The caller may not access the secret.
    #[error("permission denied for '{address}': {detail}")]
    PermissionDenied { address: String, detail: String },

    /// No credentials were configured for the backend.
    #[error("no access token configured (set GOOGLE_OAUTH_ACCESS_TOKEN or --access-token)")]
    MissingCredentials,

    /// The request never produced a response.
    #[error("request failed")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with an unexpected status.
    #[error("backend returned {status}: {body}")]
    Backend { status: u16, body: String },

    /// The backend answered but the payload could not be decoded.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Turns a canonical address into raw secret bytes.
///
/// Implementations own any retry policy; callers treat every error as fatal.
#[async_trait]
pub trait SecretResolver: Send + Sync {
    /// Display name for logging.
    fn name(&self) -> &str;

    /// Fetch the payload of one secret version.
    async fn access(&self, address: &CanonicalAddress) -> Result<Vec<u8>, ResolveError>;
}

// ============================================================================
// Options
// ============================================================================

/// Settings applied uniformly to every reference in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecryptOptions {
    pub encoding: OutputEncoding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_error_messages() {
        let err = ResolveError::NotFound {
            address: "projects/p/secrets/s/versions/1".into(),
        };
        assert_eq!(
            err.to_string(),
            "secret version 'projects/p/secrets/s/versions/1' not found"
        );

        let err = ResolveError::Backend {
            status: 503,
            body: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "backend returned 503: unavailable");
    }

    #[test]
    fn options_default_to_text() {
        assert_eq!(DecryptOptions::default().encoding, OutputEncoding::Text);
    }
}
