//! Appointments and tasks as they arrive from the operations feed.

use crate::{
    error::{SatResult, SaturationError},
    types::{Hours, WorkItemId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkKind {
    Appointment,
    Task,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkState {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Overdue,
    Cancelled,
}

impl WorkState {
    /// Open work that still consumes forward-looking capacity.
    pub fn is_active(self) -> bool {
        matches!(self, WorkState::Scheduled | WorkState::Confirmed | WorkState::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id:              WorkItemId,
    pub kind:            WorkKind,
    pub state:           WorkState,
    pub estimated_hours: Hours,
}

impl WorkItem {
    pub fn new(id: impl Into<WorkItemId>, kind: WorkKind, state: WorkState, estimated_hours: Hours) -> Self {
        Self {
            id: id.into(),
            kind,
            state,
            estimated_hours,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn is_overdue(&self) -> bool {
        self.state == WorkState::Overdue
    }

    pub fn is_completed(&self) -> bool {
        self.state == WorkState::Completed
    }

    /// Reject negative, NaN or infinite hour estimates.
    pub fn validate(&self) -> SatResult<()> {
        if !self.estimated_hours.is_finite() || self.estimated_hours < 0.0 {
            return Err(SaturationError::InvalidHours {
                item_id: self.id.clone(),
                hours:   self.estimated_hours,
            });
        }
        Ok(())
    }
}

/// Validate every item, failing on the first bad one.
pub fn validate_items(items: &[WorkItem]) -> SatResult<()> {
    items.iter().try_for_each(WorkItem::validate)
}

/// Number of items currently overdue.
pub fn overdue_count(items: &[WorkItem]) -> u32 {
    let count = items.iter().filter(|i| i.is_overdue()).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_open_states_are_active() {
        assert!(WorkState::Scheduled.is_active());
        assert!(WorkState::Confirmed.is_active());
        assert!(WorkState::InProgress.is_active());
        assert!(!WorkState::Completed.is_active());
        assert!(!WorkState::Overdue.is_active());
        assert!(!WorkState::Cancelled.is_active());
    }

    #[test]
    fn negative_and_nan_hours_rejected() {
        let bad = WorkItem::new("t-1", WorkKind::Task, WorkState::Scheduled, -0.5);
        assert!(matches!(bad.validate(), Err(SaturationError::InvalidHours { .. })));

        let nan = WorkItem::new("t-2", WorkKind::Task, WorkState::Scheduled, f64::NAN);
        assert!(nan.validate().is_err());

        let zero = WorkItem::new("t-3", WorkKind::Task, WorkState::Scheduled, 0.0);
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn state_names_are_snake_case_on_the_wire() {
        let item: WorkItem = serde_json::from_str(
            r#"{"id":"a-1","kind":"appointment","state":"in_progress","estimated_hours":2.5}"#,
        )
        .unwrap();
        assert_eq!(item.kind, WorkKind::Appointment);
        assert_eq!(item.state, WorkState::InProgress);
    }
}
