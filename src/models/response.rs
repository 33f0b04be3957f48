use std::fmt;

use serde::Deserialize;

use super::ContainerRecord;

/// Control actions the status service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerAction {
    Start,
    Stop,
    Restart,
}

impl ContainerAction {
    /// Path segment used in `/api/containers/{id}/{action}`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }
}

impl fmt::Display for ContainerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of an action response: `{status: "success"|other, message?}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Message to surface when the action did not succeed
    pub fn failure_message(&self) -> String {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.status.clone())
    }
}

/// Error object the service sends instead of data
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Prefer `detail` (FastAPI style), then `error`
    pub fn message(&self) -> Option<String> {
        let detail = self.detail.as_ref().and_then(|d| match d {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        });
        detail
            .or_else(|| self.error.clone())
            .filter(|m| !m.trim().is_empty())
    }
}

/// The list endpoint returns either the records or an error object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Records(Vec<ContainerRecord>),
    Failure(ErrorBody),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_response_success() {
        let ok: ActionResponse = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert!(ok.is_success());

        let err: ActionResponse =
            serde_json::from_str(r#"{"status":"error","message":"not found"}"#).unwrap();
        assert!(!err.is_success());
        assert_eq!(err.failure_message(), "not found");
    }

    #[test]
    fn test_failure_message_falls_back_to_status() {
        let err: ActionResponse = serde_json::from_str(r#"{"status":"denied"}"#).unwrap();
        assert_eq!(err.failure_message(), "denied");
    }

    #[test]
    fn test_error_body_prefers_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"generic","detail":"script failed"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("script failed"));

        let body: ErrorBody = serde_json::from_str(r#"{"error":"docker down"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("docker down"));
    }

    #[test]
    fn test_list_response_variants() {
        let list: ListResponse = serde_json::from_str(r#"[{"id":"a"}]"#).unwrap();
        assert!(matches!(list, ListResponse::Records(ref r) if r.len() == 1));

        let failure: ListResponse = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert!(matches!(failure, ListResponse::Failure(_)));
    }
}
