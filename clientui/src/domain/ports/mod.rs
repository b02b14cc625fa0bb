//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the remote LMS API, here). Each trait exposes strongly typed errors so
//! adapters map their failures into predictable variants instead of leaking
//! transport errors.

mod auth_gateway;
mod course_gateway;
mod enrollment_gateway;

pub use auth_gateway::{AuthGateway, FixtureAuthGateway};
pub use course_gateway::{CourseGateway, FixtureCourseGateway};
pub use enrollment_gateway::{EnrollmentGateway, EnrollmentLookup, FixtureEnrollmentGateway};

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
#[cfg(test)]
pub use course_gateway::MockCourseGateway;
#[cfg(test)]
pub use enrollment_gateway::MockEnrollmentGateway;

use crate::domain::problem::ProblemDocument;

/// Fixed user-facing message for transport-level failures.
///
/// The underlying cause is logged at the adapter and never shown to users.
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the server. Please try again.";

/// Errors surfaced by the remote-API gateway adapters.
///
/// Every failure mode of an outbound call collapses into one of these
/// variants; no transport error type crosses the port boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Rejected {
        /// User-facing reason, derived from the problem payload when present.
        message: String,
        /// Structured diagnostic payload, when the backend sent one.
        problem: Option<ProblemDocument>,
    },
    /// The backend could not be reached (connect, DNS, timeout).
    #[error("{message}")]
    Unreachable {
        /// Fixed user-facing message; see [`UNREACHABLE_MESSAGE`].
        message: String,
    },
    /// The backend reported success but the body violated the contract.
    #[error("{message}")]
    Contract {
        /// User-facing description of the contract violation.
        message: String,
    },
}

impl GatewayError {
    /// Helper for backend rejections.
    pub fn rejected(message: impl Into<String>, problem: Option<ProblemDocument>) -> Self {
        Self::Rejected {
            message: message.into(),
            problem,
        }
    }

    /// Helper for transport failures, using the fixed user-facing message.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::Unreachable {
            message: UNREACHABLE_MESSAGE.to_owned(),
        }
    }

    /// Helper for contract violations (2xx with an unusable body).
    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract {
            message: message.into(),
        }
    }

    /// User-facing message for this failure.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Rejected { message, .. }
            | Self::Unreachable { message }
            | Self::Contract { message } => message.as_str(),
        }
    }

    /// Structured problem payload, when the backend sent one.
    #[must_use]
    pub fn problem(&self) -> Option<&ProblemDocument> {
        match self {
            Self::Rejected { problem, .. } => problem.as_ref(),
            Self::Unreachable { .. } | Self::Contract { .. } => None,
        }
    }
}
