//! RFC 7807 problem document surfaced by the remote API on rejection.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Structured diagnostic payload attached to remote rejections.
///
/// All fields are optional; the backend omits whichever it does not set.
/// Unknown members are ignored so backend extensions do not break parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProblemDocument {
    /// Problem type URI.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<String>,
    /// Short human-readable summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// HTTP status the backend associated with the problem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Detailed explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// URI identifying this specific occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDocument {
    /// Preferred user-facing message: `detail` first, then `title`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or_else(|| {
                self.title
                    .as_deref()
                    .filter(|text| !text.trim().is_empty())
            })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn message_prefers_detail_over_title() {
        let problem = ProblemDocument {
            title: Some("Unauthorized".to_owned()),
            detail: Some("Invalid credentials".to_owned()),
            ..ProblemDocument::default()
        };
        assert_eq!(problem.message(), Some("Invalid credentials"));
    }

    #[test]
    fn message_falls_back_to_title() {
        let problem = ProblemDocument {
            title: Some("Unauthorized".to_owned()),
            detail: Some("   ".to_owned()),
            ..ProblemDocument::default()
        };
        assert_eq!(problem.message(), Some("Unauthorized"));
    }

    #[test]
    fn message_is_none_when_blank() {
        assert_eq!(ProblemDocument::default().message(), None);
    }

    #[test]
    fn parses_backend_payload() {
        let problem: ProblemDocument = serde_json::from_str(
            r#"{"type":"https://httpstatuses.io/401","title":"Unauthorized","status":401,"detail":"Invalid credentials","extra":"ignored"}"#,
        )
        .expect("parse problem document");
        assert_eq!(problem.status, Some(401));
        assert_eq!(problem.message(), Some("Invalid credentials"));
    }
}
