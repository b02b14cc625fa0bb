//! Driven port for the remote authentication endpoint.
//!
//! Inbound adapters call this port to exchange credentials for a login
//! session without knowing the backing transport, which makes handler tests
//! deterministic: they substitute a test double instead of wiring HTTP.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::domain::auth::{LoginCredentials, LoginSession};
use crate::domain::user::{UserId, UserSummary};

use super::GatewayError;

/// Port for exchanging credentials against the remote auth API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Validate credentials remotely and return the login session seed.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, GatewayError>;
}

/// In-memory authenticator used by local development and tests.
///
/// `admin@example.com` / `password` authenticates as user id 1; anything
/// else is rejected the way the backend rejects bad credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthGateway;

#[async_trait]
impl AuthGateway for FixtureAuthGateway {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, GatewayError> {
        if credentials.email() == "admin@example.com" && credentials.password() == "password" {
            let user_id = UserId::new(1)
                .map_err(|err| GatewayError::contract(format!("invalid fixture user id: {err}")))?;
            Ok(LoginSession {
                access_token: "fixture-access-token".to_owned(),
                refresh_token: "fixture-refresh-token".to_owned(),
                session_token: "fixture-session-token".to_owned(),
                expires_at: Utc::now() + Duration::hours(1),
                user: UserSummary {
                    id: user_id,
                    email: credentials.email().to_owned(),
                    first_name: Some("Fixture".to_owned()),
                    last_name: Some("Admin".to_owned()),
                    roles: vec!["Admin".to_owned()],
                },
            })
        } else {
            Err(GatewayError::rejected("Invalid credentials", None))
        }
    }
}
