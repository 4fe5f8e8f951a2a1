//! Admin authorization helpers for HTTP handlers.
//!
//! The bearer credential is extracted per request and checked through the
//! [`AdminAuthorizer`] port; no session state lives in the process.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::error;

use crate::domain::Error;
use crate::domain::ports::{AdminAuthorizer, AuthorizerError};

/// Bearer credential presented on an admin request, if any.
///
/// Extraction never fails: a missing or malformed `Authorization` header
/// yields an empty token, and the authorization check downstream turns
/// that into a 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminToken(Option<String>);

impl AdminToken {
    /// Wrap an already-extracted credential.
    pub const fn new(token: Option<String>) -> Self {
        Self(token)
    }

    /// Borrow the raw credential.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let raw = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = raw.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

impl FromRequest for AdminToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(bearer_token(req))))
    }
}

/// Require an authorized admin credential or fail the request.
///
/// A rejected or missing credential is 401; an unreachable authorizer is
/// surfaced as 503, never silently treated as authorized or rejected.
pub async fn require_admin(
    authorizer: &dyn AdminAuthorizer,
    token: &AdminToken,
) -> Result<(), Error> {
    let authorized = authorizer
        .authorize(token.as_deref())
        .await
        .map_err(|err| match err {
            AuthorizerError::Unreachable { .. } => {
                error!(error = %err, "authorizer failed to produce a verdict");
                Error::service_unavailable("authorization service unavailable")
            }
        })?;
    if authorized {
        Ok(())
    } else {
        Err(Error::unauthorized("admin authorization required"))
    }
}
