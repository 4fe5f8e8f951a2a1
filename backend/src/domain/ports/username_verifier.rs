//! Port for the external platform-username verification predicate.

use async_trait::async_trait;

/// Errors raised when the predicate cannot deliver a verdict.
///
/// A reachable predicate that answers `false` is a rejection, not an
/// error; these variants cover the cases where no verdict exists and
/// must never be folded into either "valid" or "invalid".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameVerifierError {
    /// The verification service could not be reached.
    #[error("username verifier unreachable: {message}")]
    Unreachable {
        /// Transport-level failure description.
        message: String,
    },
    /// The service answered with something other than a verdict.
    #[error("username verifier returned an invalid response: {message}")]
    InvalidResponse {
        /// Decoding failure description.
        message: String,
    },
}

impl UsernameVerifierError {
    /// Build an [`UsernameVerifierError::Unreachable`].
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Build an [`UsernameVerifierError::InvalidResponse`].
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

/// External boolean predicate approving a platform username beyond the
/// local format rules.
///
/// Invoked only after the username passed local validation; callers must
/// not assume synchronous completion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformUsernameVerifier: Send + Sync {
    /// Ask the external service whether `username` is acceptable.
    async fn verify(&self, username: &str) -> Result<bool, UsernameVerifierError>;
}

/// Fixture verifier approving every username.
///
/// Wired in when no verifier endpoint is configured, and by tests where
/// verification behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlatformUsernameVerifier;

#[async_trait]
impl PlatformUsernameVerifier for FixturePlatformUsernameVerifier {
    async fn verify(&self, _username: &str) -> Result<bool, UsernameVerifierError> {
        Ok(true)
    }
}
