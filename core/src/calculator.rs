//! Calculator front door: both models bound to one validated config.

use crate::{
    capacity::ConsultantCapacity,
    capacity_model::{compute_capacity_model, CapacityRecord, CapacityStatus},
    config::SaturationConfig,
    error::SatResult,
    real_model::{compute_real_saturation_model, LoadStatus, RealSaturationInput, RealSaturationRecord},
    work_item::WorkItem,
};

#[derive(Debug, Clone)]
pub struct SaturationCalculator {
    config: SaturationConfig,
}

impl SaturationCalculator {
    pub fn new(config: SaturationConfig) -> SatResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SaturationConfig {
        &self.config
    }

    /// Capacity with the configured defaults filling whatever is missing.
    pub fn capacity_or_default(
        &self,
        weekly_available_hours: Option<f64>,
        productivity_factor:    Option<f64>,
    ) -> SatResult<ConsultantCapacity> {
        let d = &self.config.defaults;
        ConsultantCapacity::new(
            weekly_available_hours.unwrap_or(d.weekly_available_hours),
            productivity_factor.unwrap_or(d.productivity_factor),
        )
    }

    pub fn compute_capacity_model(
        &self,
        consultant_id: &str,
        capacity:      &ConsultantCapacity,
        items:         &[WorkItem],
    ) -> SatResult<CapacityRecord> {
        compute_capacity_model(consultant_id, capacity, items, &self.config.capacity_thresholds)
    }

    pub fn compute_real_saturation_model(
        &self,
        consultant_id: &str,
        input:         &RealSaturationInput,
    ) -> SatResult<RealSaturationRecord> {
        compute_real_saturation_model(
            consultant_id,
            input,
            &self.config.real_model,
            &self.config.percent_thresholds,
        )
    }

    pub fn capacity_label(&self, status: CapacityStatus) -> &str {
        let l = &self.config.labels;
        match status {
            CapacityStatus::Healthy    => &l.healthy,
            CapacityStatus::Attention  => &l.attention,
            CapacityStatus::Bottleneck => &l.bottleneck,
        }
    }

    pub fn load_label(&self, status: LoadStatus) -> &str {
        let l = &self.config.labels;
        match status {
            LoadStatus::Low      => &l.low,
            LoadStatus::Medium   => &l.medium,
            LoadStatus::High     => &l.high,
            LoadStatus::Critical => &l.critical,
        }
    }
}
