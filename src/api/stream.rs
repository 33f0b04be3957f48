use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use reqwest::Url;
use tokio::sync::{mpsc::UnboundedSender, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::event::{AppEvent, LogEvent};

/// Owner's handle on a running log stream. Closing (or dropping) it tells
/// the transport task to send a close frame and exit.
#[derive(Debug)]
pub struct LogStreamHandle {
    session: u64,
    shutdown: Option<oneshot::Sender<()>>,
    closed: Arc<AtomicBool>,
}

impl LogStreamHandle {
    pub fn new(session: u64, shutdown: oneshot::Sender<()>) -> Self {
        Self {
            session,
            shutdown: Some(shutdown),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn close(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
            debug!(session = self.session, "log stream closed by client");
        }
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Shared flag that flips once this handle is closed
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        self.closed.clone()
    }
}

impl Drop for LogStreamHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Connect to `url` and forward text frames as `LogEvent::Line`.
///
/// Mirrors the browser WebSocket lifecycle: `Opened` once connected, a
/// failure yields `Error` followed by `Closed`, and a server hang-up yields
/// `Closed`. Nothing is sent after the handle has been closed.
pub fn spawn_log_stream(
    url: Url,
    session: u64,
    events: UnboundedSender<AppEvent>,
) -> LogStreamHandle {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
    let emit = move |event: LogEvent| {
        let _ = events.send(AppEvent::LogStream { session, event });
    };

    tokio::spawn(async move {
        let connect = tokio_tungstenite::connect_async(url.as_str());
        let ws = tokio::select! {
            _ = &mut shutdown_rx => return,
            result = connect => match result {
                Ok((ws, _)) => ws,
                Err(err) => {
                    warn!(session, %url, error = %err, "log stream connect failed");
                    emit(LogEvent::Error(err.to_string()));
                    emit(LogEvent::Closed);
                    return;
                }
            },
        };

        info!(session, %url, "log stream open");
        emit(LogEvent::Opened);
        let (mut sink, mut stream) = ws.split();

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
                frame = stream.next() => match frame {
                    Some(Ok(Message::Text(text))) => emit(LogEvent::Line(text)),
                    Some(Ok(Message::Binary(bytes))) => {
                        emit(LogEvent::Line(String::from_utf8_lossy(&bytes).into_owned()))
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!(session, "log stream closed by server");
                        emit(LogEvent::Closed);
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        warn!(session, error = %err, "log stream error");
                        emit(LogEvent::Error(err.to_string()));
                        emit(LogEvent::Closed);
                        break;
                    }
                },
            }
        }
    });

    LogStreamHandle::new(session, shutdown_tx)
}
