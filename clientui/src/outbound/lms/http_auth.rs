//! Reqwest adapter for the remote authentication endpoint.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::domain::auth::{LoginCredentials, LoginSession};
use crate::domain::ports::{AuthGateway, GatewayError};

use super::dto::{LoginRequestDto, LoginResponseDto};
use super::{endpoint, map_rejection, map_transport_error};

const LOGIN_PATH: &str = "api/Auth/login";
const LOGIN_FALLBACK: &str = "Login failed.";
const EMPTY_RESPONSE: &str = "Empty response from server.";
const MALFORMED_RESPONSE: &str = "Malformed response from server.";

/// Auth adapter performing HTTP POST requests against the login endpoint.
pub struct HttpAuthGateway {
    client: Client,
    base: Url,
}

impl HttpAuthGateway {
    /// Build an adapter over a shared client and the configured base URL.
    #[must_use]
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, GatewayError> {
        let url = endpoint(&self.base, LOGIN_PATH)?;
        let response = self
            .client
            .post(url)
            .json(&LoginRequestDto {
                email: credentials.email(),
                password: credentials.password(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_rejection(status, body.as_ref(), LOGIN_FALLBACK));
        }

        parse_login_body(body.as_ref())
    }
}

fn parse_login_body(body: &[u8]) -> Result<LoginSession, GatewayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(GatewayError::contract(EMPTY_RESPONSE));
    }
    let dto: LoginResponseDto = serde_json::from_slice(body).map_err(|error| {
        tracing::warn!(%error, "login response body did not decode");
        GatewayError::contract(MALFORMED_RESPONSE)
    })?;
    dto.into_domain().map_err(|error| {
        tracing::warn!(%error, "login response violated the payload contract");
        GatewayError::contract(MALFORMED_RESPONSE)
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the non-network mapping helpers.
    use super::*;

    #[test]
    fn parses_a_complete_login_body() {
        let body = br#"{
            "AccessToken": "at",
            "RefreshToken": "rt",
            "SessionToken": "st",
            "ExpiresAtUtc": "2026-08-06T12:00:00Z",
            "User": { "Id": 7, "Email": "ada@example.com" }
        }"#;
        let session = parse_login_body(body).expect("valid body");
        assert_eq!(session.user.id.get(), 7);
    }

    #[test]
    fn empty_bodies_are_contract_violations() {
        let error = parse_login_body(b"  \n ").expect_err("empty body");
        assert_eq!(error.message(), EMPTY_RESPONSE);
    }

    #[test]
    fn undecodable_bodies_are_contract_violations() {
        let error = parse_login_body(b"<html>oops</html>").expect_err("bad body");
        assert_eq!(error.message(), MALFORMED_RESPONSE);
    }

    #[test]
    fn invalid_payload_values_are_contract_violations() {
        let body = br#"{
            "AccessToken": "at",
            "RefreshToken": "rt",
            "ExpiresAtUtc": "2026-08-06T12:00:00Z",
            "User": { "Id": -1, "Email": "ada@example.com" }
        }"#;
        let error = parse_login_body(body).expect_err("invalid user id");
        assert_eq!(error.message(), MALFORMED_RESPONSE);
    }
}
