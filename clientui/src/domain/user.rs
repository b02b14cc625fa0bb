//! User identity and catalogue identifier types.
//!
//! The remote LMS API keys users, courses, and enrollments by positive
//! integers. Each identifier gets its own newtype so handler and gateway
//! signatures cannot mix them up, with serde round-trips that reject
//! non-positive values.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation error returned by the identifier constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// Identifier was zero or negative.
    #[error("identifier must be a positive integer")]
    NonPositive,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            Serialize, Deserialize, ToSchema,
        )]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate and construct an identifier from a raw integer.
            pub fn new(raw: i64) -> Result<Self, IdValidationError> {
                if raw > 0 {
                    Ok(Self(raw))
                } else {
                    Err(IdValidationError::NonPositive)
                }
            }

            /// Access the raw integer value.
            #[must_use]
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_id! {
    /// Stable identifier of a user account.
    UserId
}

define_id! {
    /// Stable identifier of a catalogue course.
    CourseId
}

define_id! {
    /// Stable identifier of a course enrollment record.
    EnrollmentId
}

/// Profile summary returned by the authentication endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Account identifier.
    pub id: UserId,
    /// Account email address.
    pub email: String,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
    /// Role names granted to the account.
    pub roles: Vec<String>,
}

impl UserSummary {
    /// Best human-readable name for the account: full name when present,
    /// otherwise the email address.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_owned(),
            (None, Some(last)) => last.to_owned(),
            (None, None) => self.email.clone(),
        }
    }
}

/// Identity claims persisted in the session cookie.
///
/// Only identity is stored; backend-issued tokens are dropped after login.
/// Keep this struct small: the whole session must fit in a single cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Account identifier used to key every enrollment operation.
    pub id: UserId,
    /// Email shown by the page chrome.
    pub email: String,
    /// Role names granted at login time.
    pub roles: Vec<String>,
}

impl From<&UserSummary> for SessionUser {
    fn from(summary: &UserSummary) -> Self {
        Self {
            id: summary.id,
            email: summary.email.clone(),
            roles: summary.roles.clone(),
        }
    }
}
