use std::collections::HashMap;

use chrono::{DateTime, Local};

use crate::error::ApiError;
use crate::models::{ContainerAction, ContainerRecord};

/// What the container table shows. Exactly one of these at any time:
/// the rows, the "no containers" placeholder, or a single error row.
#[derive(Debug, Clone, PartialEq)]
pub enum TableContent {
    /// Before the first poll resolves
    Loading,
    Rows(Vec<ContainerRecord>),
    Empty,
    Error(String),
}

/// Latest poll result plus per-row action state
#[derive(Debug)]
pub struct ContainerSet {
    content: TableContent,
    /// Rows with an action in flight, shown with a busy label until the next re-render
    busy: HashMap<String, ContainerAction>,
    last_updated: Option<DateTime<Local>>,
    in_flight: usize,
}

impl Default for ContainerSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerSet {
    pub fn new() -> Self {
        Self {
            content: TableContent::Loading,
            busy: HashMap::new(),
            last_updated: None,
            in_flight: 0,
        }
    }

    pub fn content(&self) -> &TableContent {
        &self.content
    }

    /// Replace everything with the outcome of one poll. No merging with the
    /// previous set; busy labels go away because the rows are rebuilt.
    pub fn apply(&mut self, result: Result<Vec<ContainerRecord>, ApiError>) {
        self.busy.clear();
        self.content = match result {
            Ok(records) if records.is_empty() => TableContent::Empty,
            Ok(records) => TableContent::Rows(records),
            Err(err) => TableContent::Error(err.user_message()),
        };
        if !matches!(self.content, TableContent::Error(_)) {
            self.last_updated = Some(Local::now());
        }
    }

    /// Number of rendered rows (placeholder and error rows count as one)
    pub fn row_count(&self) -> usize {
        match &self.content {
            TableContent::Rows(records) => records.len(),
            _ => 1,
        }
    }

    pub fn records(&self) -> &[ContainerRecord] {
        match &self.content {
            TableContent::Rows(records) => records,
            _ => &[],
        }
    }

    pub fn record(&self, index: usize) -> Option<&ContainerRecord> {
        self.records().get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.records().iter().position(|r| r.id == id)
    }

    /// Flag a row busy; false when it is unknown or already busy
    pub fn mark_busy(&mut self, id: &str, action: ContainerAction) -> bool {
        if self.position(id).is_none() || self.busy.contains_key(id) {
            return false;
        }
        self.busy.insert(id.to_string(), action);
        true
    }

    pub fn busy_action(&self, id: &str) -> Option<ContainerAction> {
        self.busy.get(id).copied()
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn poll_started(&mut self) {
        self.in_flight += 1;
    }

    pub fn poll_finished(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<ContainerRecord> {
        (0..n)
            .map(|i| ContainerRecord::new(&format!("id{}", i), &format!("c{}", i), "running"))
            .collect()
    }

    #[test]
    fn test_rows_placeholder_or_error_never_mixed() {
        let mut set = ContainerSet::new();

        set.apply(Ok(records(3)));
        assert_eq!(set.row_count(), 3);
        assert_eq!(set.records().len(), 3);

        set.apply(Ok(Vec::new()));
        assert_eq!(set.content(), &TableContent::Empty);
        assert_eq!(set.row_count(), 1);
        assert!(set.records().is_empty());

        set.apply(Err(ApiError::Status { status: 500, detail: None }));
        assert_eq!(
            set.content(),
            &TableContent::Error("HTTP error! status: 500".to_string())
        );
        assert_eq!(set.row_count(), 1);
        assert!(set.records().is_empty());
    }

    #[test]
    fn test_apply_replaces_and_clears_busy() {
        let mut set = ContainerSet::new();
        set.apply(Ok(records(2)));
        assert!(set.mark_busy("id1", ContainerAction::Stop));
        assert_eq!(set.busy_action("id1"), Some(ContainerAction::Stop));

        set.apply(Ok(records(2)));
        assert_eq!(set.busy_action("id1"), None);
    }

    #[test]
    fn test_mark_busy_rejects_unknown_and_duplicate() {
        let mut set = ContainerSet::new();
        set.apply(Ok(records(1)));
        assert!(!set.mark_busy("missing", ContainerAction::Start));
        assert!(set.mark_busy("id0", ContainerAction::Start));
        assert!(!set.mark_busy("id0", ContainerAction::Restart));
    }

    #[test]
    fn test_error_keeps_last_updated() {
        let mut set = ContainerSet::new();
        assert!(set.last_updated().is_none());
        set.apply(Ok(records(1)));
        let stamp = set.last_updated();
        assert!(stamp.is_some());
        set.apply(Err(ApiError::Network("refused".to_string())));
        assert_eq!(set.last_updated(), stamp);
    }

    #[test]
    fn test_in_flight_counter() {
        let mut set = ContainerSet::new();
        set.poll_started();
        set.poll_started();
        set.poll_finished();
        assert!(set.is_loading());
        set.poll_finished();
        set.poll_finished();
        assert!(!set.is_loading());
    }
}
