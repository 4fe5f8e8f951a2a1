//! Shared-secret admin authorizer adapter.
//!
//! Stands in for the external identity collaborator in deployments that
//! provision a single admin credential out of band. The domain only sees
//! the [`AdminAuthorizer`] verdict, so swapping in a real token service
//! touches nothing else.

use async_trait::async_trait;

use crate::domain::ports::{AdminAuthorizer, AuthorizerError};

/// Authorizer comparing the presented token against a configured secret.
pub struct StaticTokenAuthorizer {
    token: String,
}

impl StaticTokenAuthorizer {
    /// Build an authorizer around the expected credential.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AdminAuthorizer for StaticTokenAuthorizer {
    async fn authorize<'a>(&self, token: Option<&'a str>) -> Result<bool, AuthorizerError> {
        Ok(token == Some(self.token.as_str()))
    }
}
