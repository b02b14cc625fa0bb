//! Enrollment records and progress values mirrored from the remote API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::{CourseId, EnrollmentId, UserId};

/// Validation error returned by [`ProgressPercent::new`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ProgressValidationError {
    /// Value was NaN or infinite.
    #[error("progress must be a finite number")]
    NotFinite,
    /// Value fell outside the `[0, 100]` range.
    #[error("progress must be between 0 and 100")]
    OutOfRange,
}

/// Completion percentage constrained to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "f64", into = "f64")]
pub struct ProgressPercent(f64);

impl ProgressPercent {
    /// Zero progress, the state of a fresh enrollment.
    pub const ZERO: Self = Self(0.0);

    /// Validate and construct a progress value.
    pub fn new(raw: f64) -> Result<Self, ProgressValidationError> {
        if !raw.is_finite() {
            return Err(ProgressValidationError::NotFinite);
        }
        if !(0.0..=100.0).contains(&raw) {
            return Err(ProgressValidationError::OutOfRange);
        }
        Ok(Self(raw))
    }

    /// Raw percentage value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<ProgressPercent> for f64 {
    fn from(value: ProgressPercent) -> Self {
        value.0
    }
}

impl TryFrom<f64> for ProgressPercent {
    type Error = ProgressValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lifecycle state of an enrollment as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum EnrollmentStatus {
    /// Enrollment is live; the course counts towards the user's list.
    #[serde(alias = "Active")]
    Active,
    /// The user finished the course.
    #[serde(alias = "Completed")]
    Completed,
    /// The user abandoned the course.
    #[serde(alias = "Dropped")]
    Dropped,
    /// A state this client does not recognise; kept so new backend states
    /// do not break list rendering.
    #[serde(other)]
    Unknown,
}

/// A user's enrollment in one course.
///
/// Uniqueness of the `(user_id, course_id)` pair is enforced by the remote
/// API; this client only holds request-scoped copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseEnrollment {
    /// Enrollment record identifier, the key for progress and deletion.
    pub id: EnrollmentId,
    /// Enrolled account.
    pub user_id: UserId,
    /// Course enrolled in.
    pub course_id: CourseId,
    /// Completion percentage.
    pub progress: ProgressPercent,
    /// Lifecycle state.
    pub status: EnrollmentStatus,
}
