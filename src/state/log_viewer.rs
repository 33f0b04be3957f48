use tracing::debug;

use crate::api::LogStreamHandle;
use crate::config::LogMode;
use crate::error::ApiError;
use crate::event::LogEvent;

pub const STREAM_PLACEHOLDER: &str = "Connecting to log stream...";
pub const SNAPSHOT_PLACEHOLDER: &str = "Fetching logs...";
pub const STREAM_ERROR_NOTICE: &str = "Error connecting to log stream.";
pub const STREAM_CLOSED_NOTICE: &str = "Log stream closed.";

/// Lifecycle of the log modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogPhase {
    Closed,
    Opening,
    Streaming,
    Fetched,
}

/// One rendered line in the modal
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    /// Container output, already sanitised
    Text(String),
    Placeholder(String),
    Error(String),
    Closed(String),
}

/// The single log view. Owns the transport handle; opening a new view
/// always tears down the previous one first.
#[derive(Debug)]
pub struct LogViewer {
    phase: LogPhase,
    mode: LogMode,
    container_id: String,
    container_name: String,
    entries: Vec<LogEntry>,
    session: u64,
    transport: Option<LogStreamHandle>,
    pub scroll: usize,
    pub follow: bool,
}

impl Default for LogViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogViewer {
    pub fn new() -> Self {
        Self {
            phase: LogPhase::Closed,
            mode: LogMode::default(),
            container_id: String::new(),
            container_name: String::new(),
            entries: Vec::new(),
            session: 0,
            transport: None,
            scroll: 0,
            follow: true,
        }
    }

    pub fn phase(&self) -> LogPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != LogPhase::Closed
    }

    pub fn mode(&self) -> LogMode {
        self.mode
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    /// Enter `Opening` for a container and return the new session number.
    /// Any previous view and its transport are closed first.
    pub fn open(&mut self, id: &str, name: &str, mode: LogMode) -> u64 {
        self.close();
        self.session += 1;
        self.phase = LogPhase::Opening;
        self.mode = mode;
        self.container_id = id.to_string();
        self.container_name = name.to_string();
        self.scroll = 0;
        self.follow = true;
        let placeholder = match mode {
            LogMode::Stream => STREAM_PLACEHOLDER,
            LogMode::Snapshot => SNAPSHOT_PLACEHOLDER,
        };
        self.entries = vec![LogEntry::Placeholder(placeholder.to_string())];
        debug!(session = self.session, id, "log view opening");
        self.session
    }

    /// Take ownership of a transport. Handles for a stale session, or
    /// arriving after the view closed, are shut down immediately.
    pub fn attach(&mut self, mut handle: LogStreamHandle) {
        if !self.is_open() || handle.session() != self.session {
            handle.close();
            return;
        }
        if let Some(mut previous) = self.transport.replace(handle) {
            previous.close();
        }
    }

    /// Apply one transport event; events from other sessions are ignored
    pub fn handle_stream_event(&mut self, session: u64, event: LogEvent) {
        if session != self.session || !self.is_open() {
            return;
        }
        match event {
            LogEvent::Opened => {
                self.clear_placeholder();
                self.phase = LogPhase::Streaming;
            }
            LogEvent::Line(text) => {
                if self.phase == LogPhase::Opening {
                    self.clear_placeholder();
                    self.phase = LogPhase::Streaming;
                }
                self.entries.push(LogEntry::Text(sanitize_line(&text)));
            }
            LogEvent::Error(detail) => {
                debug!(session, %detail, "log stream error");
                self.entries.push(LogEntry::Error(STREAM_ERROR_NOTICE.to_string()));
            }
            LogEvent::Closed => {
                self.entries.push(LogEntry::Closed(STREAM_CLOSED_NOTICE.to_string()));
                if let Some(mut handle) = self.transport.take() {
                    handle.close();
                }
            }
        }
    }

    /// Replace the placeholder with the fetched text, line structure intact
    pub fn apply_snapshot(&mut self, session: u64, result: Result<String, ApiError>) {
        if session != self.session || self.phase != LogPhase::Opening {
            return;
        }
        self.entries = match result {
            Ok(text) => {
                // A final newline ends the last line rather than starting an empty one
                let body = text.strip_suffix('\n').unwrap_or(&text);
                body.split('\n')
                    .map(|line| LogEntry::Text(sanitize_line(line)))
                    .collect()
            }
            Err(err) => vec![LogEntry::Error(format!(
                "Failed to fetch logs: {}",
                err.user_message()
            ))],
        };
        self.phase = LogPhase::Fetched;
    }

    /// A stream that could not even be created
    pub fn fail_to_open(&mut self, session: u64, err: &ApiError) {
        if session != self.session || !self.is_open() {
            return;
        }
        self.clear_placeholder();
        self.entries.push(LogEntry::Error(format!(
            "{} {}",
            STREAM_ERROR_NOTICE,
            err.user_message()
        )));
    }

    /// Close the view and its transport. Returns false if it was already closed.
    pub fn close(&mut self) -> bool {
        if let Some(mut handle) = self.transport.take() {
            handle.close();
        }
        if self.phase == LogPhase::Closed {
            return false;
        }
        debug!(session = self.session, "log view closed");
        self.phase = LogPhase::Closed;
        self.entries.clear();
        self.container_id.clear();
        self.container_name.clear();
        true
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll = self.scroll.saturating_sub(amount);
        self.follow = false;
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll = (self.scroll + amount).min(self.entries.len());
    }

    pub fn top(&mut self) {
        self.scroll = 0;
        self.follow = false;
    }

    pub fn bottom(&mut self) {
        self.scroll = self.entries.len();
        self.follow = true;
    }

    pub fn toggle_follow(&mut self) {
        self.follow = !self.follow;
    }

    /// Keep the newest line visible while following
    pub fn update_scroll(&mut self, visible_lines: usize) {
        let max = self.entries.len().saturating_sub(visible_lines);
        if self.follow {
            self.scroll = max;
        } else {
            self.scroll = self.scroll.min(max);
        }
    }

    fn clear_placeholder(&mut self) {
        self.entries.retain(|e| !matches!(e, LogEntry::Placeholder(_)));
    }
}

/// Strip a trailing line ending and every control character except tab,
/// so escape sequences in container output can't drive the terminal.
pub fn sanitize_line(raw: &str) -> String {
    raw.trim_end_matches(['\r', '\n'])
        .chars()
        .filter(|c| !c.is_control() || *c == '\t')
        .collect()
}
