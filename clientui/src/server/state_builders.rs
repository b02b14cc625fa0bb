//! Builders assembling handler state from configuration.

use std::sync::Arc;

use actix_web::web;

use crate::domain::EnrollmentWorkflow;
use crate::inbound::http::state::HttpState;
use crate::outbound::lms::{HttpAuthGateway, HttpCourseGateway, HttpEnrollmentGateway};

use super::ServerConfig;

/// Build the HTTP handler state with reqwest-backed gateways.
///
/// One client is shared by every adapter so the configured timeout and
/// connection pool apply uniformly.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let client = config
        .api
        .build_client()
        .map_err(|error| std::io::Error::other(format!("failed to build HTTP client: {error}")))?;
    let base = config.api.base_url().clone();

    let auth = Arc::new(HttpAuthGateway::new(client.clone(), base.clone()));
    let courses = Arc::new(HttpCourseGateway::new(client.clone(), base.clone()));
    let enrollments = Arc::new(HttpEnrollmentGateway::new(client, base));
    let workflow = Arc::new(EnrollmentWorkflow::new(courses, enrollments));

    Ok(web::Data::new(HttpState::new(auth, workflow)))
}
