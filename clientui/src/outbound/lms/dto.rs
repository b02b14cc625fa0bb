//! Wire DTOs for the LMS API.
//!
//! Request bodies use PascalCase keys and entity responses use camelCase,
//! matching the backend contract. DTOs convert into validated domain types
//! at the adapter edge; a payload that fails validation is a contract
//! violation, not a domain value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Course, CourseEnrollment, CourseId, EnrollmentId, EnrollmentStatus, LoginSession,
    ProgressPercent, UserId, UserSummary,
};

/// Body of `POST /api/Auth/login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct LoginRequestDto<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /api/Enrollments`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct CreateEnrollmentDto {
    pub user_id: i64,
    pub course_id: i64,
}

/// Body of `PUT /api/Enrollments/{id}/progress`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct UpdateProgressDto {
    pub progress_percentage: f64,
}

/// User payload nested in the login response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct UserSummaryDto {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Response of `POST /api/Auth/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct LoginResponseDto {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub session_token: String,
    pub expires_at_utc: DateTime<Utc>,
    pub user: UserSummaryDto,
}

impl LoginResponseDto {
    pub(super) fn into_domain(self) -> Result<LoginSession, String> {
        let user_id = UserId::new(self.user.id)
            .map_err(|error| format!("login payload has an invalid user id: {error}"))?;
        if self.user.email.trim().is_empty() {
            return Err("login payload has an empty user email".to_owned());
        }
        Ok(LoginSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            session_token: self.session_token,
            expires_at: self.expires_at_utc,
            user: UserSummary {
                id: user_id,
                email: self.user.email,
                first_name: self.user.first_name,
                last_name: self.user.last_name,
                roles: self.user.roles,
            },
        })
    }
}

/// Catalogue entry served by `GET /api/Courses`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CourseDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl CourseDto {
    pub(super) fn into_domain(self) -> Result<Course, String> {
        let id = CourseId::new(self.id)
            .map_err(|error| format!("course payload has an invalid id: {error}"))?;
        Ok(Course {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
        })
    }
}

/// Enrollment record served by the enrollment endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CourseEnrollmentDto {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    #[serde(alias = "progress", default)]
    pub progress_percentage: f64,
    #[serde(default = "default_status")]
    pub status: EnrollmentStatus,
}

fn default_status() -> EnrollmentStatus {
    EnrollmentStatus::Active
}

impl CourseEnrollmentDto {
    pub(super) fn into_domain(self) -> Result<CourseEnrollment, String> {
        let id = EnrollmentId::new(self.id)
            .map_err(|error| format!("enrollment payload has an invalid id: {error}"))?;
        let user_id = UserId::new(self.user_id)
            .map_err(|error| format!("enrollment payload has an invalid user id: {error}"))?;
        let course_id = CourseId::new(self.course_id)
            .map_err(|error| format!("enrollment payload has an invalid course id: {error}"))?;
        let progress = ProgressPercent::new(self.progress_percentage)
            .map_err(|error| format!("enrollment payload has invalid progress: {error}"))?;
        Ok(CourseEnrollment {
            id,
            user_id,
            course_id,
            progress,
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn login_request_serialises_pascal_case() {
        let body = serde_json::to_value(LoginRequestDto {
            email: "ada@example.com",
            password: "secret",
        })
        .expect("serialise request");
        assert_eq!(
            body,
            serde_json::json!({ "Email": "ada@example.com", "Password": "secret" })
        );
    }

    #[test]
    fn create_request_serialises_pascal_case() {
        let body = serde_json::to_value(CreateEnrollmentDto {
            user_id: 7,
            course_id: 42,
        })
        .expect("serialise request");
        assert_eq!(body, serde_json::json!({ "UserId": 7, "CourseId": 42 }));
    }

    #[test]
    fn login_response_decodes_into_a_session() {
        let dto: LoginResponseDto = serde_json::from_str(
            r#"{
                "AccessToken": "at",
                "RefreshToken": "rt",
                "SessionToken": "st",
                "ExpiresAtUtc": "2026-08-06T12:00:00Z",
                "User": {
                    "Id": 7,
                    "Email": "ada@example.com",
                    "FirstName": "Ada",
                    "LastName": "Lovelace",
                    "Roles": ["Student"]
                }
            }"#,
        )
        .expect("decode login response");

        let session = dto.into_domain().expect("valid session");
        assert_eq!(session.user.id.get(), 7);
        assert_eq!(session.user.roles, vec!["Student".to_owned()]);
        assert_eq!(session.access_token, "at");
    }

    #[test]
    fn login_response_rejects_a_non_positive_user_id() {
        let dto: LoginResponseDto = serde_json::from_str(
            r#"{
                "AccessToken": "at",
                "RefreshToken": "rt",
                "ExpiresAtUtc": "2026-08-06T12:00:00Z",
                "User": { "Id": 0, "Email": "ada@example.com" }
            }"#,
        )
        .expect("decode login response");

        let error = dto.into_domain().expect_err("invalid user id");
        assert!(error.contains("invalid user id"));
    }

    #[test]
    fn enrollment_decodes_with_the_progress_alias() {
        let dto: CourseEnrollmentDto = serde_json::from_str(
            r#"{ "id": 101, "userId": 7, "courseId": 42, "progress": 12.5 }"#,
        )
        .expect("decode enrollment");
        let enrollment = dto.into_domain().expect("valid enrollment");
        assert_eq!(enrollment.id.get(), 101);
        assert!((enrollment.progress.value() - 12.5).abs() < f64::EPSILON);
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
    }

    #[test]
    fn enrollment_rejects_out_of_range_progress() {
        let dto: CourseEnrollmentDto = serde_json::from_str(
            r#"{ "id": 101, "userId": 7, "courseId": 42, "progressPercentage": 250.0 }"#,
        )
        .expect("decode enrollment");
        let error = dto.into_domain().expect_err("invalid progress");
        assert!(error.contains("progress"));
    }

    #[test]
    fn course_decodes_camel_case() {
        let dto: CourseDto = serde_json::from_str(
            r#"{ "id": 42, "title": "Rust", "description": "Systems", "category": "Eng" }"#,
        )
        .expect("decode course");
        let course = dto.into_domain().expect("valid course");
        assert_eq!(course.id.get(), 42);
        assert_eq!(course.category.as_deref(), Some("Eng"));
    }
}
