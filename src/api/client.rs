use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use super::stream::{spawn_log_stream, LogStreamHandle};
use super::StatusService;
use crate::config::{ApiVersion, DashboardConfig};
use crate::error::ApiError;
use crate::event::AppEvent;
use crate::models::{ActionResponse, ContainerAction, ContainerRecord, ErrorBody, ListResponse};

/// Wrapper around a reqwest client pointed at one status service
pub struct StatusClient {
    client: Client,
    base_url: Url,
    api_version: ApiVersion,
    actions_enabled: bool,
    timeout_secs: u64,
}

impl StatusClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidResponse(format!("bad base URL: {}", e)))?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            api_version: config.api_version,
            actions_enabled: config.actions_enabled(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    /// Append path segments to the base URL; ids are percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidResponse("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn containers_url(&self) -> Result<Url, ApiError> {
        let segments: Vec<&str> = self
            .api_version
            .containers_path()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        self.endpoint(&segments)
    }

    /// `ws(s)://host/ws/logs/{id}`, scheme follows the base URL
    pub fn log_stream_url(&self, id: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["ws", "logs", id])?;
        let scheme = if self.base_url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme).map_err(|_| {
            ApiError::WebSocket(format!("cannot derive stream URL from {}", self.base_url))
        })?;
        Ok(url)
    }

    fn map_err(&self, err: reqwest::Error) -> ApiError {
        ApiError::from_reqwest(err, self.timeout_secs)
    }

    /// Turn a non-2xx response into `ApiError::Status`, keeping the server's detail
    async fn status_error(&self, response: Response) -> ApiError {
        let status = response.status().as_u16();
        let detail = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
            .and_then(|body| body.message());
        ApiError::Status { status, detail }
    }
}

#[async_trait]
impl StatusService for StatusClient {
    async fn list_containers(&self) -> Result<Vec<ContainerRecord>, ApiError> {
        let url = self.containers_url()?;
        debug!(%url, "polling containers");

        let response = self.client.get(url).send().await.map_err(|e| self.map_err(e))?;
        if !response.status().is_success() {
            return Err(self.status_error(response).await);
        }

        let body = response.bytes().await.map_err(|e| self.map_err(e))?;
        match serde_json::from_slice::<ListResponse>(&body) {
            Ok(ListResponse::Records(records)) => Ok(records),
            Ok(ListResponse::Failure(failure)) => match failure.message() {
                Some(message) => Err(ApiError::Service(message)),
                None => Err(ApiError::InvalidResponse("object without records".to_string())),
            },
            Err(e) => Err(ApiError::InvalidResponse(e.to_string())),
        }
    }

    async fn run_action(
        &self,
        id: &str,
        action: ContainerAction,
    ) -> Result<ActionResponse, ApiError> {
        if !self.actions_enabled {
            return Err(ApiError::Unsupported("Container actions"));
        }
        let url = self.endpoint(&["api", "containers", id, action.as_str()])?;
        debug!(%url, "dispatching action");

        let response = self.client.post(url).send().await.map_err(|e| self.map_err(e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.map_err(e))?;

        // The body is authoritative, whatever the status code
        match serde_json::from_slice::<ActionResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) if status.is_success() => Err(ApiError::InvalidResponse(e.to_string())),
            Err(_) => Err(ApiError::Status {
                status: status.as_u16(),
                detail: serde_json::from_slice::<ErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.message()),
            }),
        }
    }

    async fn fetch_logs(&self, id: &str) -> Result<String, ApiError> {
        let url = self.endpoint(&["api", "v1", "logs", id])?;
        debug!(%url, "fetching log snapshot");

        let response = self.client.get(url).send().await.map_err(|e| self.map_err(e))?;
        if !response.status().is_success() {
            let err = self.status_error(response).await;
            warn!(error = %err, "log snapshot failed");
            return Err(err);
        }
        response.text().await.map_err(|e| self.map_err(e))
    }

    fn open_log_stream(
        &self,
        id: &str,
        session: u64,
        events: UnboundedSender<AppEvent>,
    ) -> Result<LogStreamHandle, ApiError> {
        let url = self.log_stream_url(id)?;
        Ok(spawn_log_stream(url, session, events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(url: &str, api_version: ApiVersion) -> StatusClient {
        let config = DashboardConfig {
            base_url: url.to_string(),
            api_version,
            ..Default::default()
        };
        StatusClient::new(&config).unwrap()
    }

    #[test]
    fn test_stream_url_follows_scheme() {
        let client = client_for("http://localhost:8000", ApiVersion::V0);
        assert_eq!(
            client.log_stream_url("abc123").unwrap().as_str(),
            "ws://localhost:8000/ws/logs/abc123"
        );

        let client = client_for("https://dash.example.com/", ApiVersion::V0);
        assert_eq!(
            client.log_stream_url("abc123").unwrap().as_str(),
            "wss://dash.example.com/ws/logs/abc123"
        );
    }

    #[test]
    fn test_ids_are_encoded() {
        let client = client_for("http://localhost:8000", ApiVersion::V0);
        let url = client.endpoint(&["api", "containers", "a/b", "start"]).unwrap();
        assert_eq!(url.path(), "/api/containers/a%2Fb/start");
    }

    #[tokio::test]
    async fn test_list_containers_v1() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/monitor")
            .with_status(200)
            .with_body(r#"[{"id":"abc","name":"web","image":"nginx","status":"running"}]"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), ApiVersion::V1);
        let records = client.list_containers().await.unwrap();
        mock.assert_async().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "web");
    }

    #[tokio::test]
    async fn test_list_containers_v0_path_and_empty() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/containers")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = client_for(&server.url(), ApiVersion::V0);
        let records = client.list_containers().await.unwrap();
        mock.assert_async().await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_list_containers_error_field() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/containers")
            .with_status(200)
            .with_body(r#"{"error":"Docker daemon not reachable"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), ApiVersion::V0);
        let err = client.list_containers().await.unwrap_err();
        assert_eq!(err, ApiError::Service("Docker daemon not reachable".to_string()));
    }

    #[tokio::test]
    async fn test_list_containers_server_detail() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/monitor")
            .with_status(500)
            .with_body(r#"{"detail":"Failed to parse JSON output from monitor script."}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), ApiVersion::V1);
        let err = client.list_containers().await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "Failed to parse JSON output from monitor script."
        );
    }

    #[tokio::test]
    async fn test_list_containers_status_without_detail() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/monitor")
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let client = client_for(&server.url(), ApiVersion::V1);
        let err = client.list_containers().await.unwrap_err();
        assert_eq!(err.user_message(), "HTTP error! status: 503");
    }

    #[tokio::test]
    async fn test_list_containers_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/monitor")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = client_for(&server.url(), ApiVersion::V1);
        let err = client.list_containers().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_list_containers_unreachable() {
        // Port 9 (discard) is essentially never listening
        let client = client_for("http://127.0.0.1:9", ApiVersion::V1);
        let err = client.list_containers().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_run_action_posts_to_action_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/containers/abc123/restart")
            .with_status(200)
            .with_body(r#"{"status":"success"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), ApiVersion::V0);
        let response = client
            .run_action("abc123", ContainerAction::Restart)
            .await
            .unwrap();
        mock.assert_async().await;
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_run_action_failure_body_on_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/containers/nope/stop")
            .with_status(404)
            .with_body(r#"{"status":"error","message":"not found"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), ApiVersion::V0);
        let response = client.run_action("nope", ContainerAction::Stop).await.unwrap();
        assert!(!response.is_success());
        assert_eq!(response.failure_message(), "not found");
    }

    #[tokio::test]
    async fn test_run_action_disabled_on_v1() {
        let client = client_for("http://127.0.0.1:9", ApiVersion::V1);
        let err = client
            .run_action("abc", ContainerAction::Start)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Unsupported("Container actions"));
    }

    #[tokio::test]
    async fn test_fetch_logs_preserves_text() {
        let mut server = mockito::Server::new_async().await;
        let body = "line one\n    indented <b>two</b>\n\nfour\n";
        let _mock = server
            .mock("GET", "/api/v1/logs/abc")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body(body)
            .create_async()
            .await;

        let client = client_for(&server.url(), ApiVersion::V1);
        assert_eq!(client.fetch_logs("abc").await.unwrap(), body);
    }

    #[tokio::test]
    async fn test_fetch_logs_error_detail() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/logs/abc")
            .with_status(500)
            .with_body(r#"{"detail":"docker: command not found"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), ApiVersion::V1);
        let err = client.fetch_logs("abc").await.unwrap_err();
        assert_eq!(err.user_message(), "docker: command not found");
    }
}
