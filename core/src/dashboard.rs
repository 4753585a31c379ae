//! Bottleneck dashboard: every consultant through both models, ranked and tallied.
//!
//! One invalid consultant row is reported in `rejected` and left out of
//! the rankings; it never hides the rest of the dashboard. A consultant id
//! is evaluated once per batch: later rows with the same id are rejected.

use crate::{
    calculator::SaturationCalculator,
    capacity_model::{CapacityRecord, CapacityStatus},
    error::{SatResult, SaturationError},
    ranking::{aggregate_status_counts, rank_by_descending_saturation},
    real_model::{LoadStatus, RealSaturationInput, RealSaturationRecord},
    types::{ConsultantId, EvaluationId},
    work_item::WorkItem,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use uuid::Uuid;

/// One row of the operations feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultantWorkload {
    pub consultant_id: ConsultantId,
    pub name:          String,
    #[serde(default)]
    pub weekly_available_hours: Option<f64>,
    #[serde(default)]
    pub productivity_factor:    Option<f64>,
    #[serde(default)]
    pub items: Vec<WorkItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedConsultant {
    pub consultant_id: ConsultantId,
    pub name:          String,
    pub reason:        String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub evaluation_id:    EvaluationId,
    pub evaluated_at:     DateTime<Utc>,
    pub names:            BTreeMap<ConsultantId, String>,
    pub capacity_ranking: Vec<CapacityRecord>,
    pub real_ranking:     Vec<RealSaturationRecord>,
    pub capacity_counts:  BTreeMap<CapacityStatus, usize>,
    pub load_counts:      BTreeMap<LoadStatus, usize>,
    pub rejected:         Vec<RejectedConsultant>,
}

impl DashboardReport {
    pub fn consultant_count(&self) -> usize {
        self.capacity_ranking.len()
    }

    pub fn name_of<'a>(&'a self, consultant_id: &'a str) -> &'a str {
        self.names.get(consultant_id).map(String::as_str).unwrap_or(consultant_id)
    }

    /// Both records of every consultant, in capacity-ranking order.
    pub fn paired_records(&self) -> Vec<(&CapacityRecord, &RealSaturationRecord)> {
        let real_by_id: HashMap<&str, &RealSaturationRecord> = self
            .real_ranking
            .iter()
            .map(|r| (r.consultant_id.as_str(), r))
            .collect();
        self.capacity_ranking
            .iter()
            .filter_map(|cap| real_by_id.get(cap.consultant_id.as_str()).map(|real| (cap, *real)))
            .collect()
    }

    /// Consultants over capacity in the capacity model, worst first.
    pub fn bottlenecks(&self) -> impl Iterator<Item = &CapacityRecord> {
        self.capacity_ranking
            .iter()
            .filter(|r| r.status == CapacityStatus::Bottleneck)
    }
}

impl SaturationCalculator {
    /// Both models for one consultant, computed from the same item snapshot.
    pub fn evaluate_consultant(
        &self,
        workload: &ConsultantWorkload,
    ) -> SatResult<(CapacityRecord, RealSaturationRecord)> {
        let capacity = self.capacity_or_default(
            workload.weekly_available_hours,
            workload.productivity_factor,
        )?;
        let capacity_record =
            self.compute_capacity_model(&workload.consultant_id, &capacity, &workload.items)?;
        let input = RealSaturationInput::from_work_items(&workload.items)?;
        let real_record = self.compute_real_saturation_model(&workload.consultant_id, &input)?;
        Ok((capacity_record, real_record))
    }

    pub fn evaluate_dashboard(
        &self,
        workloads: &[ConsultantWorkload],
        now:       DateTime<Utc>,
    ) -> DashboardReport {
        let mut names = BTreeMap::new();
        let mut capacity_records = Vec::with_capacity(workloads.len());
        let mut real_records = Vec::with_capacity(workloads.len());
        let mut rejected = Vec::new();
        let mut seen: HashSet<&str> = HashSet::with_capacity(workloads.len());

        for workload in workloads {
            let outcome = if seen.insert(workload.consultant_id.as_str()) {
                self.evaluate_consultant(workload)
            } else {
                Err(SaturationError::DuplicateConsultant {
                    consultant_id: workload.consultant_id.clone(),
                })
            };
            match outcome {
                Ok((capacity, real)) => {
                    names.insert(workload.consultant_id.clone(), workload.name.clone());
                    capacity_records.push(capacity);
                    real_records.push(real);
                }
                Err(e) => {
                    log::warn!(
                        "dashboard: rejected consultant {} ({}): {e}",
                        workload.consultant_id, workload.name
                    );
                    rejected.push(RejectedConsultant {
                        consultant_id: workload.consultant_id.clone(),
                        name:          workload.name.clone(),
                        reason:        e.to_string(),
                    });
                }
            }
        }

        let capacity_ranking = rank_by_descending_saturation(capacity_records);
        let real_ranking = rank_by_descending_saturation(real_records);
        let capacity_counts = aggregate_status_counts(&capacity_ranking);
        let load_counts = aggregate_status_counts(&real_ranking);

        let report = DashboardReport {
            evaluation_id: Uuid::new_v4().to_string(),
            evaluated_at: now,
            names,
            capacity_ranking,
            real_ranking,
            capacity_counts,
            load_counts,
            rejected,
        };

        log::info!(
            "dashboard: evaluated {} consultants ({} rejected), {} bottlenecks",
            report.consultant_count(),
            report.rejected.len(),
            report.bottlenecks().count()
        );
        report
    }
}
