use thiserror::Error;

/// Failures talking to the status service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// Non-2xx response; `detail` is the server's explanation when it sent one.
    #[error("HTTP {status}")]
    Status { status: u16, detail: Option<String> },

    /// 2xx response carrying an error object (e.g. "no such container").
    #[error("service error: {0}")]
    Service(String),

    /// Body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("websocket error: {0}")]
    WebSocket(String),

    #[error("'{0}' is not supported by this API version")]
    Unsupported(&'static str),
}

impl ApiError {
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(timeout_secs)
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// Human-readable text for the rendered error row / notice
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Could not connect to the status service. Is it running?".to_string()
            }
            ApiError::Timeout(secs) => {
                format!("The status service did not answer within {}s.", secs)
            }
            ApiError::Status { status, detail } => match detail {
                Some(detail) => detail.clone(),
                None => format!("HTTP error! status: {}", status),
            },
            ApiError::Service(message) => message.clone(),
            ApiError::InvalidResponse(_) => {
                "The status service sent a response that could not be read.".to_string()
            }
            ApiError::WebSocket(detail) => format!("Log stream failed: {}", detail),
            ApiError::Unsupported(what) => {
                format!("{} is not available on this backend.", what)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_prefers_server_detail() {
        let err = ApiError::Status {
            status: 500,
            detail: Some("Error executing monitor script: boom".to_string()),
        };
        assert_eq!(err.user_message(), "Error executing monitor script: boom");
    }

    #[test]
    fn test_status_falls_back_to_code() {
        let err = ApiError::Status { status: 502, detail: None };
        assert_eq!(err.user_message(), "HTTP error! status: 502");
    }

    #[test]
    fn test_display() {
        assert_eq!(ApiError::Timeout(30).to_string(), "request timed out after 30s");
        assert_eq!(
            ApiError::Unsupported("container actions").to_string(),
            "'container actions' is not supported by this API version"
        );
    }
}
