//! Catalogue courses and the course-page view models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enrollment::CourseEnrollment;
use super::user::{CourseId, UserId};

/// A catalogue course as served by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Course identifier.
    pub id: CourseId,
    /// Course title.
    pub title: String,
    /// Course description shown on the listing.
    pub description: String,
    /// Optional catalogue category.
    pub category: Option<String>,
}

/// A course annotated with the viewing user's enrollment, if any.
///
/// Derived per render; never persisted or cached across requests.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseView {
    /// The catalogue course.
    #[serde(flatten)]
    pub course: Course,
    /// The viewer's enrollment in this course, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<CourseEnrollment>,
}

impl CourseView {
    /// Whether the viewing user is enrolled in this course.
    #[must_use]
    pub fn is_enrolled(&self) -> bool {
        self.enrollment.is_some()
    }
}

/// View model backing the course listing page.
///
/// `notice` carries validation and failure messages; `success` carries
/// confirmation messages. Both are `None` on a plain page load.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoursesPage {
    /// Catalogue rows, annotated for the viewer when one is known.
    pub courses: Vec<CourseView>,
    /// Failure or validation message from the last action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// Confirmation message from the last action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    /// Identifier of the viewing user, when authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user_id: Option<UserId>,
}

impl CoursesPage {
    /// Find the rendered view of one course, if present.
    #[must_use]
    pub fn course(&self, id: CourseId) -> Option<&CourseView> {
        self.courses.iter().find(|view| view.course.id == id)
    }
}
