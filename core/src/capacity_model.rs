//! Capacity-relative saturation: active load over usable weekly hours.
//!
//! | saturation index        | status     |
//! |-------------------------|------------|
//! | index <= 0.8            | Healthy    |
//! | 0.8 < index <= 1.0      | Attention  |
//! | index > 1.0             | Bottleneck |
//!
//! Bounds come from `CapacityThresholds` and are inclusive on the upper side.

use crate::{
    capacity::ConsultantCapacity,
    config::CapacityThresholds,
    error::{SatResult, SaturationError},
    ranking::{Ranked, StatusTier},
    types::{ConsultantId, Hours},
    work_item::{overdue_count, validate_items, WorkItem},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityStatus {
    Healthy,
    Attention,
    Bottleneck,
}

impl CapacityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CapacityStatus::Healthy    => "healthy",
            CapacityStatus::Attention  => "attention",
            CapacityStatus::Bottleneck => "bottleneck",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "healthy"    => Some(CapacityStatus::Healthy),
            "attention"  => Some(CapacityStatus::Attention),
            "bottleneck" => Some(CapacityStatus::Bottleneck),
            _ => None,
        }
    }
}

impl StatusTier for CapacityStatus {
    const ALL: &'static [Self] = &[
        CapacityStatus::Healthy,
        CapacityStatus::Attention,
        CapacityStatus::Bottleneck,
    ];
}

impl CapacityThresholds {
    pub fn classify(&self, saturation_index: f64) -> CapacityStatus {
        if saturation_index <= self.healthy_max {
            CapacityStatus::Healthy
        } else if saturation_index <= self.attention_max {
            CapacityStatus::Attention
        } else {
            CapacityStatus::Bottleneck
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityRecord {
    pub consultant_id:         ConsultantId,
    pub weekly_capacity_hours: Hours,
    pub active_load_hours:     Hours,
    pub saturation_index:      f64,
    pub status:                CapacityStatus,
    /// Informational only. Overdue items do not add to this model's load.
    pub overdue_count:         u32,
}

impl Ranked for CapacityRecord {
    type Status = CapacityStatus;

    fn consultant_id(&self) -> &str {
        &self.consultant_id
    }

    fn saturation_metric(&self) -> f64 {
        self.saturation_index
    }

    fn status(&self) -> CapacityStatus {
        self.status
    }
}

/// Sum of estimated hours over scheduled, confirmed and in-progress items.
pub fn active_load_hours(items: &[WorkItem]) -> Hours {
    items
        .iter()
        .filter(|i| i.is_active())
        .map(|i| i.estimated_hours)
        .fold(0.0, |acc, h| acc + h)
}

/// Compute the capacity-model record for one consultant.
///
/// Fails with `InvalidCapacity` rather than producing an infinite or NaN
/// index when the capacity works out to zero hours.
pub fn compute_capacity_model(
    consultant_id: &str,
    capacity:      &ConsultantCapacity,
    items:         &[WorkItem],
    thresholds:    &CapacityThresholds,
) -> SatResult<CapacityRecord> {
    validate_items(items)?;

    let weekly_capacity_hours = capacity.weekly_capacity_hours();
    if !(weekly_capacity_hours > 0.0) {
        return Err(SaturationError::InvalidCapacity {
            available_hours:     capacity.weekly_available_hours(),
            productivity_factor: capacity.productivity_factor(),
        });
    }

    let active_load_hours = active_load_hours(items);
    let saturation_index = active_load_hours / weekly_capacity_hours;
    let status = thresholds.classify(saturation_index);

    log::debug!(
        "capacity model: {consultant_id} load={active_load_hours:.2}h cap={weekly_capacity_hours:.2}h index={saturation_index:.3} -> {}",
        status.as_str()
    );

    Ok(CapacityRecord {
        consultant_id: consultant_id.to_string(),
        weekly_capacity_hours,
        active_load_hours,
        saturation_index,
        status,
        overdue_count: overdue_count(items),
    })
}
