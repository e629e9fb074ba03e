//! The printable outcome of one API call.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::types::ApiErrorBody;

/// What the response body turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The body decoded as JSON.
    Json(Value),

    /// The body was not JSON. `error` describes why and is never empty.
    Raw { body: String, error: String },
}

/// Status code plus decoded (or raw) body of a single response.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub status: u16,
    pub outcome: Outcome,
}

impl Report {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Json(value) => Some(value),
            Outcome::Raw { .. } => None,
        }
    }

    /// The Google error envelope, if the body is one.
    pub fn api_error(&self) -> Option<ApiErrorBody> {
        ApiErrorBody::deserialize(self.json()?).ok()
    }

    /// Non-empty `error.message` from the error envelope.
    pub fn api_error_message(&self) -> Option<String> {
        self.api_error()
            .map(|body| body.error.message)
            .filter(|message| !message.is_empty())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Json(value) => match serde_json::to_string_pretty(value) {
                Ok(pretty) => f.write_str(&pretty),
                Err(_) => write!(f, "{value}"),
            },
            Outcome::Raw { body, error } => {
                writeln!(f, "Failed to parse JSON. Raw response:")?;
                writeln!(f, "{body}")?;
                write!(f, "Error: {error}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_display_has_three_sections() {
        let report = Report {
            status: 502,
            outcome: Outcome::Raw {
                body: "Bad Gateway".to_string(),
                error: "expected value at line 1 column 1".to_string(),
            },
        };
        assert_eq!(
            report.to_string(),
            "Failed to parse JSON. Raw response:\nBad Gateway\nError: expected value at line 1 column 1"
        );
        assert!(!report.is_success());
    }

    #[test]
    fn json_display_is_pretty() {
        let report = Report {
            status: 200,
            outcome: Outcome::Json(json!({"models": []})),
        };
        assert_eq!(report.to_string(), "{\n  \"models\": []\n}");
        assert!(report.is_success());
    }

    #[test]
    fn api_error_message_from_envelope() {
        let report = Report {
            status: 400,
            outcome: Outcome::Json(json!({
                "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
            })),
        };
        assert_eq!(report.api_error_message().as_deref(), Some("API key not valid."));
        let body = report.api_error().unwrap();
        assert_eq!(body.error.code, 400);
        assert_eq!(body.error.status, "INVALID_ARGUMENT");
    }

    #[test]
    fn api_error_message_absent_for_plain_json() {
        let report = Report {
            status: 200,
            outcome: Outcome::Json(json!({"error": "just a string"})),
        };
        assert!(report.api_error().is_none());
        assert!(report.api_error_message().is_none());
    }

    #[test]
    fn api_error_message_absent_for_empty_message() {
        let report = Report {
            status: 500,
            outcome: Outcome::Json(json!({"error": {"code": 500}})),
        };
        assert!(report.api_error().is_some());
        assert!(report.api_error_message().is_none());
    }
}
