//! Standardized API response types (RFC 7807 compliant for errors) and the
//! generation envelope.

use serde::{Deserialize, Serialize};

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

/// Envelope returned by both generation routes.
///
/// Success: `{content, success: true, isDemo?}`.
/// Failure: `{error, success: false, hint?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_demo: Option<bool>,
    /// Remediation hint for failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl GenerationResult {
    pub fn generated(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            success: true,
            error: None,
            is_demo: None,
            hint: None,
        }
    }

    pub fn demo(content: impl Into<String>) -> Self {
        Self {
            is_demo: Some(true),
            ..Self::generated(content)
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            content: None,
            success: false,
            error: Some(error.into()),
            is_demo: None,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Unauthorized")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_envelope_shape() {
        let json = serde_json::to_value(GenerationResult::demo("# Post")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"content": "# Post", "success": true, "isDemo": true})
        );
    }

    #[test]
    fn test_failure_envelope_shape() {
        let json = serde_json::to_value(GenerationResult::failed("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "boom"}));
    }
}
