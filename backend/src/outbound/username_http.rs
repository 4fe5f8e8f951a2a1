//! Reqwest-backed platform-username verifier adapter.
//!
//! Owns transport details only: request construction, timeout and HTTP
//! error mapping, and JSON decoding of the verdict. Anything short of a
//! well-formed verdict surfaces as a verifier error so the caller can
//! distinguish "no verdict" from "rejected".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::ports::{PlatformUsernameVerifier, UsernameVerifierError};

/// HTTP adapter calling the external verification predicate.
///
/// Issues `GET <endpoint>?username=<candidate>` and expects a JSON body
/// shaped `{"valid": bool}`.
pub struct HttpUsernameVerifier {
    client: Client,
    endpoint: Url,
}

impl HttpUsernameVerifier {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[derive(Debug, Deserialize)]
struct VerdictDto {
    valid: bool,
}

fn parse_verdict(body: &[u8]) -> Result<bool, UsernameVerifierError> {
    let decoded: VerdictDto = serde_json::from_slice(body).map_err(|error| {
        UsernameVerifierError::invalid_response(format!("invalid verdict payload: {error}"))
    })?;
    Ok(decoded.valid)
}

fn map_transport_error(error: &reqwest::Error) -> UsernameVerifierError {
    UsernameVerifierError::unreachable(error.to_string())
}

fn map_status_error(status: StatusCode) -> UsernameVerifierError {
    UsernameVerifierError::unreachable(format!("status {}", status.as_u16()))
}

#[async_trait]
impl PlatformUsernameVerifier for HttpUsernameVerifier {
    async fn verify(&self, username: &str) -> Result<bool, UsernameVerifierError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("username", username)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| map_transport_error(&error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        let body = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(&error))?;
        parse_verdict(body.as_ref())
    }
}
