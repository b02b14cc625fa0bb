//! Driven port for the remote course catalogue.

use async_trait::async_trait;

use crate::domain::course::Course;
use crate::domain::user::CourseId;

use super::GatewayError;

/// Port for reading the course catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseGateway: Send + Sync {
    /// Fetch the full catalogue.
    async fn list(&self) -> Result<Vec<Course>, GatewayError>;
}

/// In-memory catalogue used by local development and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseGateway;

impl FixtureCourseGateway {
    fn course(id: i64, title: &str, description: &str) -> Result<Course, GatewayError> {
        Ok(Course {
            id: CourseId::new(id)
                .map_err(|err| GatewayError::contract(format!("invalid fixture course id: {err}")))?,
            title: title.to_owned(),
            description: description.to_owned(),
            category: Some("Fixtures".to_owned()),
        })
    }
}

#[async_trait]
impl CourseGateway for FixtureCourseGateway {
    async fn list(&self) -> Result<Vec<Course>, GatewayError> {
        Ok(vec![
            Self::course(1, "Intro to Rust", "Ownership, borrowing, and the standard library.")?,
            Self::course(2, "Web Services", "Building HTTP services with actix-web.")?,
        ])
    }
}
