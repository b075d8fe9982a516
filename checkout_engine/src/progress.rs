//! UI-facing projection of checkout progress.

use serde::{Deserialize, Serialize};

use crate::events::ProgressEvent;

/// A stateless snapshot of how far the settlement loop has progressed.
///
/// Purely observational: reports are derived from orchestrator state (or from a
/// [`ProgressEvent`]) and never feed anything back into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    completed: usize,
    total: usize,
    current: Option<String>,
}

impl ProgressReport {
    pub fn new(completed: usize, total: usize, current: Option<String>) -> Self {
        Self { completed, total, current }
    }

    /// Percent complete, 0..=100. A session with no groups reports 0.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation)]
        {
            (self.completed.min(self.total) * 100 / self.total) as u8
        }
    }

    /// Display name of the seller group currently being processed.
    pub fn current_group(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}

impl From<ProgressEvent> for ProgressReport {
    fn from(event: ProgressEvent) -> Self {
        Self { completed: event.completed, total: event.total, current: event.current }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn percent_follows_completed_over_total() {
        assert_eq!(ProgressReport::new(0, 4, None).percent(), 0);
        assert_eq!(ProgressReport::new(1, 4, None).percent(), 25);
        assert_eq!(ProgressReport::new(3, 4, None).percent(), 75);
        assert_eq!(ProgressReport::new(4, 4, None).percent(), 100);
        assert_eq!(ProgressReport::new(1, 3, None).percent(), 33);
    }

    #[test]
    fn empty_session_reports_zero() {
        let report = ProgressReport::new(0, 0, None);
        assert_eq!(report.percent(), 0);
        assert!(!report.is_finished());
    }

    #[test]
    fn current_group_name_is_exposed() {
        let report = ProgressReport::new(1, 2, Some("Glass & Brass".to_string()));
        assert_eq!(report.current_group(), Some("Glass & Brass"));
        assert!(!report.is_finished());
        let done = ProgressReport::new(2, 2, None);
        assert!(done.is_finished());
        assert!(done.current_group().is_none());
    }

    #[test]
    fn report_builds_from_a_progress_event() {
        let event = ProgressEvent { completed: 1, total: 2, current: Some("Atelier North".to_string()) };
        let report = ProgressReport::from(event);
        assert_eq!(report.percent(), 50);
        assert_eq!(report.current_group(), Some("Atelier North"));
    }
}
