pub mod containers;
pub mod log_viewer;

pub use containers::{ContainerSet, TableContent};
pub use log_viewer::{LogEntry, LogPhase, LogViewer};

/// Blocking message shown over everything until dismissed
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: " Error ".to_string(),
            message: message.into(),
        }
    }
}
