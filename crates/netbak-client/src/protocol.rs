//! Wire types for the device CLI endpoints

use serde::{Deserialize, Serialize};

/// Body of `POST /devices/{id}/cli`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CliRequest<'a> {
    pub command: &'a str,
}

/// Response envelope of `POST /devices/{id}/cli`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CliResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<CliData>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `data` member of [`CliResponse`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CliData {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error body FastAPI-style backends return with non-2xx statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best human-readable description in the body, if any
    pub(crate) fn describe(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(s)) => return Some(s.clone()),
            Some(other) if !other.is_null() => return Some(other.to_string()),
            _ => {}
        }
        self.message.clone()
    }
}

/// A command response, normalized for the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The backend ran the command. `output` is the raw device text;
    /// `error` carries a secondary error reported alongside it.
    Completed {
        output: Option<String>,
        error: Option<String>,
    },
    /// The backend refused or failed the command (`success: false`).
    Rejected { message: String },
}

impl From<CliResponse> for CommandOutcome {
    fn from(response: CliResponse) -> Self {
        if response.success {
            let data = response.data.unwrap_or_default();
            CommandOutcome::Completed {
                output: data.output.filter(|o| !o.is_empty()),
                error: data.error.filter(|e| !e.is_empty()),
            }
        } else {
            CommandOutcome::Rejected {
                message: response
                    .message
                    .or_else(|| response.data.and_then(|d| d.error))
                    .unwrap_or_else(|| "Unknown error".to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_command() {
        let body = serde_json::to_string(&CliRequest {
            command: "display version",
        })
        .unwrap();
        assert_eq!(body, r#"{"command":"display version"}"#);
    }

    #[test]
    fn test_success_response_to_outcome() {
        let resp: CliResponse = serde_json::from_str(
            r#"{"success": true, "message": "ok", "data": {"output": "<sw1>"}}"#,
        )
        .unwrap();
        assert_eq!(
            CommandOutcome::from(resp),
            CommandOutcome::Completed {
                output: Some("<sw1>".to_string()),
                error: None
            }
        );
    }

    #[test]
    fn test_success_without_data() {
        let resp: CliResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(
            CommandOutcome::from(resp),
            CommandOutcome::Completed {
                output: None,
                error: None
            }
        );
    }

    #[test]
    fn test_failure_response_uses_message() {
        let resp: CliResponse =
            serde_json::from_str(r#"{"success": false, "message": "SSH session closed"}"#)
                .unwrap();
        assert_eq!(
            CommandOutcome::from(resp),
            CommandOutcome::Rejected {
                message: "SSH session closed".to_string()
            }
        );
    }

    #[test]
    fn test_failure_response_without_message() {
        let resp: CliResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(matches!(
            CommandOutcome::from(resp),
            CommandOutcome::Rejected { message } if message == "Unknown error"
        ));
    }

    #[test]
    fn test_error_body_describe() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "设备不存在"}"#).unwrap();
        assert_eq!(body.describe().as_deref(), Some("设备不存在"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#)
                .unwrap();
        assert!(body.describe().unwrap().contains("field required"));

        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.describe().is_none());
    }
}
