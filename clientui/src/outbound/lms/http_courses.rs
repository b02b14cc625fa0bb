//! Reqwest adapter for the remote course catalogue.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::domain::course::Course;
use crate::domain::ports::{CourseGateway, GatewayError};

use super::dto::CourseDto;
use super::{endpoint, map_rejection, map_transport_error};

const COURSES_PATH: &str = "api/Courses";
const REQUEST_FALLBACK: &str = "Request failed.";
const MALFORMED_RESPONSE: &str = "Malformed response from server.";

/// Catalogue adapter performing HTTP GET requests against the remote API.
pub struct HttpCourseGateway {
    client: Client,
    base: Url,
}

impl HttpCourseGateway {
    /// Build an adapter over a shared client and the configured base URL.
    #[must_use]
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl CourseGateway for HttpCourseGateway {
    async fn list(&self) -> Result<Vec<Course>, GatewayError> {
        let url = endpoint(&self.base, COURSES_PATH)?;
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
        parse_course_list(body.as_ref())
    }
}

fn parse_course_list(body: &[u8]) -> Result<Vec<Course>, GatewayError> {
    let dtos: Vec<CourseDto> = serde_json::from_slice(body).map_err(|error| {
        tracing::warn!(%error, "course list body did not decode");
        GatewayError::contract(MALFORMED_RESPONSE)
    })?;
    dtos.into_iter()
        .map(|dto| {
            dto.into_domain().map_err(|error| {
                tracing::warn!(%error, "course list entry violated the payload contract");
                GatewayError::contract(MALFORMED_RESPONSE)
            })
        })
        .collect()
}
