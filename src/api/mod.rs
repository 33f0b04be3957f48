//! Status Service access: HTTP endpoints plus the WebSocket log stream.

pub mod client;
pub mod stream;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::ApiError;
use crate::event::AppEvent;
use crate::models::{ActionResponse, ContainerAction, ContainerRecord};

pub use client::StatusClient;
pub use stream::LogStreamHandle;

/// Everything the dashboard needs from the backend.
///
/// `StatusClient` is the real implementation; tests swap in fakes.
#[async_trait]
pub trait StatusService: Send + Sync {
    /// Current container set
    async fn list_containers(&self) -> Result<Vec<ContainerRecord>, ApiError>;

    /// Issue start/stop/restart. A decoded body is returned even when it
    /// reports failure; only transport/decoding problems are errors.
    async fn run_action(
        &self,
        id: &str,
        action: ContainerAction,
    ) -> Result<ActionResponse, ApiError>;

    /// Recent log text for one container
    async fn fetch_logs(&self, id: &str) -> Result<String, ApiError>;

    /// Start streaming logs. Events are tagged with `session` and sent to
    /// `events` until the returned handle is closed or the server hangs up.
    fn open_log_stream(
        &self,
        id: &str,
        session: u64,
        events: UnboundedSender<AppEvent>,
    ) -> Result<LogStreamHandle, ApiError>;
}
