//! Real saturation: forecast hours over a fixed week, plus an overdue surcharge.
//!
//! ```text
//! base    = total_forecast_hours / fixed_weekly_hours * 100
//! penalty = overdue_penalty_pct * overdue_count      (optionally capped)
//! percent = base + penalty
//! ```
//!
//! | saturation percent      | status   |
//! |-------------------------|----------|
//! | percent <= 70           | Low      |
//! | 70 < percent <= 100     | Medium   |
//! | 100 < percent <= 150    | High     |
//! | percent > 150           | Critical |
//!
//! Values far above 100 are valid output: they signal severe overload.

use crate::{
    config::{PercentThresholds, RealModelConfig},
    error::{SatResult, SaturationError},
    ranking::{Ranked, StatusTier},
    types::{ConsultantId, Hours},
    work_item::{validate_items, WorkItem, WorkKind, WorkState},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Low,
    Medium,
    High,
    Critical,
}

impl LoadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadStatus::Low      => "low",
            LoadStatus::Medium   => "medium",
            LoadStatus::High     => "high",
            LoadStatus::Critical => "critical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low"      => Some(LoadStatus::Low),
            "medium"   => Some(LoadStatus::Medium),
            "high"     => Some(LoadStatus::High),
            "critical" => Some(LoadStatus::Critical),
            _ => None,
        }
    }
}

impl StatusTier for LoadStatus {
    const ALL: &'static [Self] = &[
        LoadStatus::Low,
        LoadStatus::Medium,
        LoadStatus::High,
        LoadStatus::Critical,
    ];
}

impl PercentThresholds {
    pub fn classify(&self, saturation_percent: f64) -> LoadStatus {
        if saturation_percent <= self.low_max {
            LoadStatus::Low
        } else if saturation_percent <= self.medium_max {
            LoadStatus::Medium
        } else if saturation_percent <= self.high_max {
            LoadStatus::High
        } else {
            LoadStatus::Critical
        }
    }
}

/// Hours of one kind of work, split by where they sit in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HourBuckets {
    /// Already delivered ("realizado"). Historical only.
    pub realized: Hours,
    /// Still ahead ("previsto"). Drives the base percentage.
    pub forecast: Hours,
    pub overdue:  Hours,
}

impl HourBuckets {
    fn validate(&self, label: &str) -> SatResult<()> {
        for (bucket, hours) in [("realized", self.realized), ("forecast", self.forecast), ("overdue", self.overdue)] {
            if !hours.is_finite() || hours < 0.0 {
                return Err(SaturationError::InvalidHours {
                    item_id: format!("{label}.{bucket}"),
                    hours,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KindBreakdown {
    pub appointments: HourBuckets,
    pub tasks:        HourBuckets,
}

impl KindBreakdown {
    pub fn total_forecast_hours(&self) -> Hours {
        self.appointments.forecast + self.tasks.forecast
    }

    pub fn total_realized_hours(&self) -> Hours {
        self.appointments.realized + self.tasks.realized
    }

    pub fn total_overdue_hours(&self) -> Hours {
        self.appointments.overdue + self.tasks.overdue
    }

    fn bucket_mut(&mut self, kind: WorkKind) -> &mut HourBuckets {
        match kind {
            WorkKind::Appointment => &mut self.appointments,
            WorkKind::Task        => &mut self.tasks,
        }
    }
}

/// Pre-bucketed input for the real model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RealSaturationInput {
    pub breakdown:     KindBreakdown,
    pub overdue_count: u32,
}

impl RealSaturationInput {
    /// Bucket raw items: completed -> realized, active -> forecast,
    /// overdue -> overdue. Cancelled items are dropped.
    pub fn from_work_items(items: &[WorkItem]) -> SatResult<Self> {
        validate_items(items)?;

        let mut input = Self::default();
        for item in items {
            let bucket = input.breakdown.bucket_mut(item.kind);
            match item.state {
                WorkState::Completed => bucket.realized += item.estimated_hours,
                WorkState::Overdue => {
                    bucket.overdue += item.estimated_hours;
                    input.overdue_count = input.overdue_count.saturating_add(1);
                }
                WorkState::Cancelled => {}
                WorkState::Scheduled | WorkState::Confirmed | WorkState::InProgress => {
                    bucket.forecast += item.estimated_hours
                }
            }
        }
        Ok(input)
    }

    fn validate(&self) -> SatResult<()> {
        self.breakdown.appointments.validate("appointments")?;
        self.breakdown.tasks.validate("tasks")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealSaturationRecord {
    pub consultant_id:           ConsultantId,
    pub base_saturation_percent: f64,
    pub overdue_penalty_percent: f64,
    pub saturation_percent:      f64,
    pub status:                  LoadStatus,
    pub overdue_count:           u32,
    pub breakdown:               KindBreakdown,
}

impl Ranked for RealSaturationRecord {
    type Status = LoadStatus;

    fn consultant_id(&self) -> &str {
        &self.consultant_id
    }

    fn saturation_metric(&self) -> f64 {
        self.saturation_percent
    }

    fn status(&self) -> LoadStatus {
        self.status
    }
}

/// Compute the real-model record for one consultant.
pub fn compute_real_saturation_model(
    consultant_id: &str,
    input:         &RealSaturationInput,
    model:         &RealModelConfig,
    thresholds:    &PercentThresholds,
) -> SatResult<RealSaturationRecord> {
    input.validate()?;

    let total_forecast_hours = input.breakdown.total_forecast_hours();
    let base_saturation_percent = total_forecast_hours / model.fixed_weekly_hours * 100.0;

    let raw_penalty = model.overdue_penalty_pct * f64::from(input.overdue_count);
    let overdue_penalty_percent = match model.overdue_penalty_cap_pct {
        Some(cap) => raw_penalty.min(cap),
        None => raw_penalty,
    };

    let saturation_percent = base_saturation_percent + overdue_penalty_percent;
    let status = thresholds.classify(saturation_percent);

    log::debug!(
        "real model: {consultant_id} forecast={total_forecast_hours:.2}h overdue={} -> {saturation_percent:.1}% {}",
        input.overdue_count,
        status.as_str()
    );

    Ok(RealSaturationRecord {
        consultant_id: consultant_id.to_string(),
        base_saturation_percent,
        overdue_penalty_percent,
        saturation_percent,
        status,
        overdue_count: input.overdue_count,
        breakdown: input.breakdown,
    })
}
