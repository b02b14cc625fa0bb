//! Enrollment workflow orchestrating the course page actions.
//!
//! The service takes the viewing user's identity as an explicit parameter
//! instead of reading ambient session state, so tests drive it with a
//! synthetic identity and no cookie machinery. Every gateway failure folds
//! into view-model state: the methods are infallible and the page always
//! re-renders with a fresh list after an action attempt.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::course::{CourseView, CoursesPage};
use crate::domain::ports::{CourseGateway, EnrollmentGateway, EnrollmentLookup};
use crate::domain::user::{CourseId, EnrollmentId, UserId};

/// User-facing messages set by the workflow.
pub mod messages {
    /// The session did not yield a usable user identity.
    pub const UNIDENTIFIED_USER: &str = "Unable to identify user. Please log in again.";
    /// Pre-enroll check found an existing record; the action is a no-op.
    pub const ALREADY_ENROLLED: &str = "You are already enrolled in this course.";
    /// Enrollment was created remotely.
    pub const ENROLL_SUCCESS: &str = "Successfully enrolled in course!";
    /// The remote create call failed.
    pub const ENROLL_FAILED: &str = "Failed to enroll in course. Please try again.";
    /// The submitted course id was not a positive identifier.
    pub const INVALID_COURSE: &str =
        "Invalid course information. Please refresh the page and try again.";
    /// The submitted enrollment id was not a positive identifier.
    pub const INVALID_ENROLLMENT: &str =
        "Invalid enrollment information. Please refresh the page and try again.";
    /// The enrollment record was deleted remotely.
    pub const UNENROLL_SUCCESS: &str = "Successfully unenrolled from course!";
    /// The remote delete call failed.
    pub const UNENROLL_FAILED: &str = "Failed to unenroll from course. Please try again.";
}

/// Orchestrates course listing, enroll, and unenroll actions.
#[derive(Clone)]
pub struct EnrollmentWorkflow {
    courses: Arc<dyn CourseGateway>,
    enrollments: Arc<dyn EnrollmentGateway>,
}

impl EnrollmentWorkflow {
    /// Create a workflow over the given gateways.
    pub fn new(courses: Arc<dyn CourseGateway>, enrollments: Arc<dyn EnrollmentGateway>) -> Self {
        Self {
            courses,
            enrollments,
        }
    }

    /// Render the course listing for an optionally authenticated viewer.
    ///
    /// Catalogue or enrollment-list failures degrade to a plain or empty
    /// list with a structured warning; the page always renders.
    pub async fn view_courses(&self, viewer: Option<UserId>) -> CoursesPage {
        self.page(viewer, None, None).await
    }

    /// Enroll the viewer in a course, idempotently.
    ///
    /// An existing enrollment short-circuits into an "already enrolled"
    /// notice rather than a duplicate create. When the pre-enroll check
    /// cannot be completed the create proceeds anyway: the backend's
    /// uniqueness constraint is the correctness backstop, the local check
    /// only saves a round trip.
    pub async fn enroll(&self, viewer: Option<UserId>, course_id: i64) -> CoursesPage {
        let Some(user) = viewer else {
            warn!(course_id, "enroll attempted without an identified user");
            return self.page(None, Some(messages::UNIDENTIFIED_USER), None).await;
        };
        let Ok(course) = CourseId::new(course_id) else {
            warn!(course_id, "enroll attempted with an invalid course id");
            return self.page(viewer, Some(messages::INVALID_COURSE), None).await;
        };

        match self.enrollments.find(user, course).await {
            Ok(EnrollmentLookup::Found(existing)) => {
                info!(
                    user_id = %user,
                    course_id = %course,
                    enrollment_id = %existing.id,
                    "user is already enrolled; treating enroll as a no-op"
                );
                return self.page(viewer, Some(messages::ALREADY_ENROLLED), None).await;
            }
            Ok(EnrollmentLookup::NotFound) => {}
            Err(error) => {
                warn!(
                    user_id = %user,
                    course_id = %course,
                    %error,
                    "pre-enroll check failed; deferring duplicate detection to the backend"
                );
            }
        }

        match self.enrollments.create(user, course).await {
            Ok(enrollment) => {
                info!(
                    user_id = %user,
                    course_id = %course,
                    enrollment_id = %enrollment.id,
                    "enrollment created"
                );
                self.verify_enrolled(user, course, true).await;
                self.page(viewer, None, Some(messages::ENROLL_SUCCESS)).await
            }
            Err(error) => {
                warn!(user_id = %user, course_id = %course, %error, "enrollment create failed");
                self.page(viewer, Some(messages::ENROLL_FAILED), None).await
            }
        }
    }

    /// Remove an enrollment record, keyed by its identifier.
    ///
    /// A non-positive `enrollment_id` is rejected before any remote call.
    /// The viewer identity is only used for post-condition verification.
    pub async fn unenroll(
        &self,
        viewer: Option<UserId>,
        enrollment_id: i64,
        course_id: i64,
    ) -> CoursesPage {
        let Ok(enrollment) = EnrollmentId::new(enrollment_id) else {
            warn!(enrollment_id, "unenroll attempted with an invalid enrollment id");
            return self
                .page(viewer, Some(messages::INVALID_ENROLLMENT), None)
                .await;
        };

        match self.enrollments.delete(enrollment).await {
            Ok(()) => {
                info!(enrollment_id = %enrollment, "enrollment deleted");
                if let (Some(user), Ok(course)) = (viewer, CourseId::new(course_id)) {
                    self.verify_enrolled(user, course, false).await;
                }
                self.page(viewer, None, Some(messages::UNENROLL_SUCCESS))
                    .await
            }
            Err(error) => {
                warn!(enrollment_id = %enrollment, %error, "enrollment delete failed");
                self.page(viewer, Some(messages::UNENROLL_FAILED), None)
                    .await
            }
        }
    }

    /// Defensive post-condition check after a mutation. The mutation result
    /// stays authoritative; a mismatch is only logged.
    async fn verify_enrolled(&self, user: UserId, course: CourseId, expected: bool) {
        match self.enrollments.find(user, course).await {
            Ok(lookup) if lookup.is_found() == expected => {
                debug!(user_id = %user, course_id = %course, expected, "post-condition verified");
            }
            Ok(_) => {
                warn!(
                    user_id = %user,
                    course_id = %course,
                    expected,
                    "post-condition check disagrees with the mutation result"
                );
            }
            Err(error) => {
                debug!(user_id = %user, course_id = %course, %error, "post-condition check failed");
            }
        }
    }

    async fn page(
        &self,
        viewer: Option<UserId>,
        notice: Option<&str>,
        success: Option<&str>,
    ) -> CoursesPage {
        let catalogue = match self.courses.list().await {
            Ok(courses) => courses,
            Err(error) => {
                warn!(%error, "course catalogue fetch failed; rendering an empty list");
                Vec::new()
            }
        };

        let mut enrollments = HashMap::new();
        if let Some(user) = viewer {
            match self.enrollments.list_for_user(user).await {
                Ok(records) => {
                    enrollments = records
                        .into_iter()
                        .map(|record| (record.course_id, record))
                        .collect();
                }
                Err(error) => {
                    warn!(
                        user_id = %user,
                        %error,
                        "enrollment list fetch failed; rendering the plain catalogue"
                    );
                }
            }
        }

        let courses = catalogue
            .into_iter()
            .map(|course| {
                let enrollment = enrollments.remove(&course.id);
                CourseView { course, enrollment }
            })
            .collect();

        CoursesPage {
            courses,
            notice: notice.map(str::to_owned),
            success: success.map(str::to_owned),
            current_user_id: viewer,
        }
    }
}
