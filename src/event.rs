use crate::error::ApiError;
use crate::models::{ActionResponse, ContainerAction, ContainerRecord};

/// What a log stream transport reports back to the UI loop
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    Opened,
    Line(String),
    Error(String),
    Closed,
}

/// Messages from background tasks. Only the UI loop mutates state;
/// tasks talk to it through this enum.
#[derive(Debug)]
pub enum AppEvent {
    /// Interval timer fired
    PollTick,
    ContainersLoaded {
        seq: u64,
        result: Result<Vec<ContainerRecord>, ApiError>,
    },
    ActionFinished {
        id: String,
        action: ContainerAction,
        result: Result<ActionResponse, ApiError>,
    },
    /// Delayed re-poll after an action
    RefreshRequested,
    LogStream {
        session: u64,
        event: LogEvent,
    },
    SnapshotLoaded {
        session: u64,
        result: Result<String, ApiError>,
    },
}
