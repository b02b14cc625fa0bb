//! Reqwest-backed adapters for the remote LMS API.
//!
//! The adapters own transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding into domain types. Every
//! failure collapses into a [`GatewayError`]; no `reqwest::Error` escapes
//! this module.

mod dto;
mod http_auth;
mod http_courses;
mod http_enrollments;

pub use http_auth::HttpAuthGateway;
pub use http_courses::HttpCourseGateway;
pub use http_enrollments::HttpEnrollmentGateway;

use std::time::Duration;

use mockable::Env;
use reqwest::{Client, StatusCode, Url};
use tracing::warn;

use crate::domain::ProblemDocument;
use crate::domain::ports::GatewayError;

const BASE_URL_ENV: &str = "LMS_API_BASE_URL";
const TIMEOUT_ENV: &str = "LMS_API_TIMEOUT_SECS";

const DEFAULT_DEBUG_BASE_URL: &str = "http://localhost:5125/";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Connection settings for the remote LMS API.
#[derive(Debug, Clone)]
pub struct LmsApiConfig {
    base_url: Url,
    timeout: Duration,
}

/// Errors raised while validating the LMS API configuration.
#[derive(thiserror::Error, Debug)]
pub enum ApiConfigError {
    /// The base URL variable is missing in a release build.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}': {reason}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl LmsApiConfig {
    /// Build a configuration from an already-parsed base URL.
    ///
    /// The URL path is normalised to end in `/` so endpoint paths join
    /// underneath it instead of replacing its last segment.
    #[must_use]
    pub fn new(mut base_url: Url, timeout: Duration) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { base_url, timeout }
    }

    /// Read the configuration from the environment.
    ///
    /// `LMS_API_BASE_URL` is required when `require_base_url` is set (release
    /// builds); otherwise a localhost default is used with a warning.
    /// `LMS_API_TIMEOUT_SECS` defaults to 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ApiConfigError`] when a variable is missing or unparseable.
    pub fn from_env<E: Env>(env: &E, require_base_url: bool) -> Result<Self, ApiConfigError> {
        let base_url = match env.string(BASE_URL_ENV) {
            Some(value) => Url::parse(&value).map_err(|error| ApiConfigError::InvalidEnv {
                name: BASE_URL_ENV,
                value,
                reason: error.to_string(),
            })?,
            None if require_base_url => {
                return Err(ApiConfigError::MissingEnv { name: BASE_URL_ENV });
            }
            None => {
                warn!(default = DEFAULT_DEBUG_BASE_URL, "LMS_API_BASE_URL not set");
                Url::parse(DEFAULT_DEBUG_BASE_URL).map_err(|error| {
                    ApiConfigError::InvalidEnv {
                        name: BASE_URL_ENV,
                        value: DEFAULT_DEBUG_BASE_URL.to_owned(),
                        reason: error.to_string(),
                    }
                })?
            }
        };

        let timeout = match env.string(TIMEOUT_ENV) {
            Some(value) => {
                let seconds: u64 =
                    value
                        .parse()
                        .map_err(|_| ApiConfigError::InvalidEnv {
                            name: TIMEOUT_ENV,
                            value: value.clone(),
                            reason: "expected a positive number of seconds".to_owned(),
                        })?;
                if seconds == 0 {
                    return Err(ApiConfigError::InvalidEnv {
                        name: TIMEOUT_ENV,
                        value,
                        reason: "expected a positive number of seconds".to_owned(),
                    });
                }
                Duration::from_secs(seconds)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        };

        Ok(Self::new(base_url, timeout))
    }

    /// Base URL every endpoint path is joined onto.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-request timeout applied to the shared client.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the shared reqwest client for the adapters.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn build_client(&self) -> Result<Client, reqwest::Error> {
        Client::builder().timeout(self.timeout).build()
    }
}

/// Join an endpoint path onto the configured base URL.
fn endpoint(base: &Url, path: &str) -> Result<Url, GatewayError> {
    base.join(path).map_err(|error| {
        warn!(%error, path, "failed to build endpoint URL");
        GatewayError::contract("Malformed request URL.")
    })
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    // The cause is logged here and never shown to end users.
    warn!(%error, timeout = error.is_timeout(), "LMS API request failed in transport");
    GatewayError::unreachable()
}

/// Map a non-success response into a rejection, preferring the structured
/// problem payload: `detail`, then `title`, then the raw body text, then the
/// HTTP reason phrase.
fn map_rejection(status: StatusCode, body: &[u8], fallback: &'static str) -> GatewayError {
    if let Ok(problem) = serde_json::from_slice::<ProblemDocument>(body) {
        let message = problem
            .message()
            .map(str::to_owned)
            .or_else(|| status.canonical_reason().map(str::to_owned))
            .unwrap_or_else(|| fallback.to_owned());
        return GatewayError::rejected(message, Some(problem));
    }

    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .map_or_else(|| fallback.to_owned(), str::to_owned)
    } else {
        preview
    };
    GatewayError::rejected(message, None)
}

/// Collapse a response body into a short single-line preview.
fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
