//! Driven port for the remote enrollment API.
//!
//! Lookup is tri-state: [`EnrollmentLookup::Found`], [`EnrollmentLookup::NotFound`],
//! or a [`GatewayError`]. Callers can therefore distinguish "definitely not
//! enrolled" from "could not determine", which the enrollment workflow relies
//! on when deciding whether a pre-enroll check is trustworthy.

use async_trait::async_trait;

use crate::domain::enrollment::{CourseEnrollment, EnrollmentStatus, ProgressPercent};
use crate::domain::user::{CourseId, EnrollmentId, UserId};

use super::GatewayError;

/// Result of looking up one user's enrollment in one course.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrollmentLookup {
    /// The user has an enrollment record for the course.
    Found(CourseEnrollment),
    /// The backend answered authoritatively that no record exists.
    NotFound,
}

impl EnrollmentLookup {
    /// Whether the lookup found a record.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Port for enrollment reads and mutations against the remote API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentGateway: Send + Sync {
    /// Fetch all enrollments of one user.
    async fn list_for_user(&self, user: UserId) -> Result<Vec<CourseEnrollment>, GatewayError>;

    /// Look up one user's enrollment in one course.
    async fn find(&self, user: UserId, course: CourseId)
    -> Result<EnrollmentLookup, GatewayError>;

    /// Create an enrollment. The backend is the authority on duplicates and
    /// may answer with the already-existing record.
    async fn create(&self, user: UserId, course: CourseId)
    -> Result<CourseEnrollment, GatewayError>;

    /// Update the completion percentage of an enrollment.
    async fn update_progress(
        &self,
        enrollment: EnrollmentId,
        progress: ProgressPercent,
    ) -> Result<(), GatewayError>;

    /// Delete an enrollment record.
    async fn delete(&self, enrollment: EnrollmentId) -> Result<(), GatewayError>;
}

/// In-memory gateway used by local development and tests: no enrollments
/// exist, creation echoes a fresh record, mutations succeed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentGateway;

#[async_trait]
impl EnrollmentGateway for FixtureEnrollmentGateway {
    async fn list_for_user(&self, _user: UserId) -> Result<Vec<CourseEnrollment>, GatewayError> {
        Ok(Vec::new())
    }

    async fn find(
        &self,
        _user: UserId,
        _course: CourseId,
    ) -> Result<EnrollmentLookup, GatewayError> {
        Ok(EnrollmentLookup::NotFound)
    }

    async fn create(
        &self,
        user: UserId,
        course: CourseId,
    ) -> Result<CourseEnrollment, GatewayError> {
        let id = EnrollmentId::new(1).map_err(|err| {
            GatewayError::contract(format!("invalid fixture enrollment id: {err}"))
        })?;
        Ok(CourseEnrollment {
            id,
            user_id: user,
            course_id: course,
            progress: ProgressPercent::ZERO,
            status: EnrollmentStatus::Active,
        })
    }

    async fn update_progress(
        &self,
        _enrollment: EnrollmentId,
        _progress: ProgressPercent,
    ) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn delete(&self, _enrollment: EnrollmentId) -> Result<(), GatewayError> {
        Ok(())
    }
}
