//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::EnrollmentWorkflow;
use crate::domain::ports::AuthGateway;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Remote authentication port used by the login page.
    pub auth: Arc<dyn AuthGateway>,
    /// Workflow behind the course page.
    pub workflow: Arc<EnrollmentWorkflow>,
}

impl HttpState {
    /// Bundle the handler dependencies.
    pub fn new(auth: Arc<dyn AuthGateway>, workflow: Arc<EnrollmentWorkflow>) -> Self {
        Self { auth, workflow }
    }
}
