//! Reqwest adapter for the remote enrollment endpoints.
//!
//! ```text
//! GET    api/Enrollments/user/{userId}
//! GET    api/Enrollments/{userId}/course/{courseId}
//! POST   api/Enrollments
//! PUT    api/Enrollments/{enrollmentId}/progress
//! DELETE api/Enrollments/{enrollmentId}
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::domain::enrollment::{CourseEnrollment, ProgressPercent};
use crate::domain::ports::{EnrollmentGateway, EnrollmentLookup, GatewayError};
use crate::domain::user::{CourseId, EnrollmentId, UserId};

use super::dto::{CourseEnrollmentDto, CreateEnrollmentDto, UpdateProgressDto};
use super::{endpoint, map_rejection, map_transport_error};

const REQUEST_FALLBACK: &str = "Request failed.";
const MALFORMED_RESPONSE: &str = "Malformed response from server.";

/// Enrollment adapter performing HTTP requests against the remote API.
pub struct HttpEnrollmentGateway {
    client: Client,
    base: Url,
}

impl HttpEnrollmentGateway {
    /// Build an adapter over a shared client and the configured base URL.
    #[must_use]
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl EnrollmentGateway for HttpEnrollmentGateway {
    async fn list_for_user(&self, user: UserId) -> Result<Vec<CourseEnrollment>, GatewayError> {
        let url = endpoint(&self.base, &format!("api/Enrollments/user/{user}"))?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_rejection(status, body.as_ref(), REQUEST_FALLBACK));
        }
        parse_enrollment_list(body.as_ref())
    }

    async fn find(
        &self,
        user: UserId,
        course: CourseId,
    ) -> Result<EnrollmentLookup, GatewayError> {
        let url = endpoint(
            &self.base,
            &format!("api/Enrollments/{user}/course/{course}"),
        )?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        // 404 is the backend's authoritative "not enrolled" answer; any other
        // failure stays an error so callers can tell the two apart.
        if status == StatusCode::NOT_FOUND {
            return Ok(EnrollmentLookup::NotFound);
        }
        if !status.is_success() {
            return Err(map_rejection(status, body.as_ref(), REQUEST_FALLBACK));
        }
        parse_enrollment(body.as_ref()).map(EnrollmentLookup::Found)
    }

    async fn create(
        &self,
        user: UserId,
        course: CourseId,
    ) -> Result<CourseEnrollment, GatewayError> {
        let url = endpoint(&self.base, "api/Enrollments")?;
        let response = self
            .client
            .post(url)
            .json(&CreateEnrollmentDto {
                user_id: user.get(),
                course_id: course.get(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_rejection(status, body.as_ref(), REQUEST_FALLBACK));
        }
        parse_enrollment(body.as_ref())
    }

    async fn update_progress(
        &self,
        enrollment: EnrollmentId,
        progress: ProgressPercent,
    ) -> Result<(), GatewayError> {
        let url = endpoint(&self.base, &format!("api/Enrollments/{enrollment}/progress"))?;
        let response = self
            .client
            .put(url)
            .json(&UpdateProgressDto {
                progress_percentage: progress.value(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_rejection(status, body.as_ref(), REQUEST_FALLBACK))
    }

    async fn delete(&self, enrollment: EnrollmentId) -> Result<(), GatewayError> {
        let url = endpoint(&self.base, &format!("api/Enrollments/{enrollment}"))?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_rejection(status, body.as_ref(), REQUEST_FALLBACK))
    }
}

fn parse_enrollment(body: &[u8]) -> Result<CourseEnrollment, GatewayError> {
    let dto: CourseEnrollmentDto = serde_json::from_slice(body).map_err(|error| {
        tracing::warn!(%error, "enrollment response body did not decode");
        GatewayError::contract(MALFORMED_RESPONSE)
    })?;
    dto.into_domain().map_err(|error| {
        tracing::warn!(%error, "enrollment response violated the payload contract");
        GatewayError::contract(MALFORMED_RESPONSE)
    })
}

fn parse_enrollment_list(body: &[u8]) -> Result<Vec<CourseEnrollment>, GatewayError> {
    let dtos: Vec<CourseEnrollmentDto> = serde_json::from_slice(body).map_err(|error| {
        tracing::warn!(%error, "enrollment list body did not decode");
        GatewayError::contract(MALFORMED_RESPONSE)
    })?;
    dtos.into_iter()
        .map(|dto| {
            dto.into_domain().map_err(|error| {
                tracing::warn!(%error, "enrollment list entry violated the payload contract");
                GatewayError::contract(MALFORMED_RESPONSE)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the non-network mapping helpers.
    use super::*;
    use crate::domain::enrollment::EnrollmentStatus;

    #[test]
    fn parses_an_enrollment_record() {
        let body = br#"{ "id": 101, "userId": 7, "courseId": 42, "progressPercentage": 0.0, "status": "active" }"#;
        let enrollment = parse_enrollment(body).expect("valid record");
        assert_eq!(enrollment.id.get(), 101);
        assert_eq!(enrollment.user_id.get(), 7);
        assert_eq!(enrollment.course_id.get(), 42);
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
    }

    #[test]
    fn parses_an_enrollment_list() {
        let body = br#"[
            { "id": 101, "userId": 7, "courseId": 42, "progress": 10.0 },
            { "id": 102, "userId": 7, "courseId": 43, "progress": 55.5, "status": "completed" }
        ]"#;
        let list = parse_enrollment_list(body).expect("valid list");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).map(|record| record.status), Some(EnrollmentStatus::Completed));
    }

    #[test]
    fn undecodable_bodies_are_contract_violations() {
        let error = parse_enrollment(b"null").expect_err("null body");
        assert_eq!(error.message(), MALFORMED_RESPONSE);
        let error = parse_enrollment_list(b"{}").expect_err("object body");
        assert_eq!(error.message(), MALFORMED_RESPONSE);
    }

    #[test]
    fn invalid_entries_are_contract_violations() {
        let body = br#"[{ "id": 0, "userId": 7, "courseId": 42 }]"#;
        let error = parse_enrollment_list(body).expect_err("invalid id");
        assert_eq!(error.message(), MALFORMED_RESPONSE);
    }
}
