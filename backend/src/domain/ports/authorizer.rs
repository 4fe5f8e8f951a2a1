//! Port for the external admin-authorization collaborator.
//!
//! Token issuance and verification live outside this service; the core
//! only consumes an opaque "caller is authorized" verdict. Authorization
//! state is carried per request, never in process-wide mutable state.

use async_trait::async_trait;

/// Errors raised when no authorization verdict could be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizerError {
    /// The authorization collaborator could not be reached.
    #[error("authorizer unreachable: {message}")]
    Unreachable {
        /// Transport-level failure description.
        message: String,
    },
}

impl AuthorizerError {
    /// Build an [`AuthorizerError::Unreachable`].
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }
}

/// Opaque boolean verdict on a presented admin credential.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminAuthorizer: Send + Sync {
    /// Return whether `token` authorizes administrative operations.
    ///
    /// `None` means the request carried no credential; implementations
    /// answer `false` rather than erroring.
    async fn authorize<'a>(&self, token: Option<&'a str>) -> Result<bool, AuthorizerError>;
}

/// Fixture authorizer approving every request.
///
/// For tests where authorization behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAdminAuthorizer;

#[async_trait]
impl AdminAuthorizer for FixtureAdminAuthorizer {
    async fn authorize<'a>(&self, _token: Option<&'a str>) -> Result<bool, AuthorizerError> {
        Ok(true)
    }
}
