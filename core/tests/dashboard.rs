//! Dashboard evaluation over a whole team.

use chrono::{TimeZone, Utc};
use saturation_core::{
    calculator::SaturationCalculator,
    capacity_model::CapacityStatus,
    config::SaturationConfig,
    dashboard::ConsultantWorkload,
    real_model::LoadStatus,
    work_item::{WorkItem, WorkKind, WorkState},
};

fn calculator() -> SaturationCalculator {
    let _ = env_logger::builder().is_test(true).try_init();
    SaturationCalculator::new(SaturationConfig::default()).expect("default config is valid")
}

fn workload(id: &str, name: &str, hours: Option<f64>, items: Vec<WorkItem>) -> ConsultantWorkload {
    ConsultantWorkload {
        consultant_id: id.into(),
        name: name.into(),
        weekly_available_hours: hours,
        productivity_factor: None,
        items,
    }
}

fn team() -> Vec<ConsultantWorkload> {
    vec![
        workload("c-1", "Ana Souza", Some(40.0), vec![
            WorkItem::new("a", WorkKind::Appointment, WorkState::Confirmed, 8.0),
            WorkItem::new("b", WorkKind::Task, WorkState::Completed, 12.0),
        ]),
        workload("c-2", "Pedro Costa", None, vec![
            WorkItem::new("c", WorkKind::Appointment, WorkState::Confirmed, 20.8),
            WorkItem::new("d", WorkKind::Task, WorkState::InProgress, 10.0),
            WorkItem::new("e", WorkKind::Task, WorkState::Overdue, 2.0),
        ]),
        workload("c-3", "Marcos Lima", Some(0.0), vec![]),
        workload("c-4", "Rita Alves", None, vec![
            WorkItem::new("f", WorkKind::Task, WorkState::Scheduled, -1.0),
        ]),
    ]
}

#[test]
fn invalid_consultants_are_reported_not_ranked() {
    let calc = calculator();
    let now = Utc.with_ymd_and_hms(2026, 5, 4, 8, 30, 0).unwrap();
    let report = calc.evaluate_dashboard(&team(), now);

    assert_eq!(report.consultant_count(), 2);
    assert_eq!(report.real_ranking.len(), 2);
    assert_eq!(report.evaluated_at, now);

    let rejected: Vec<_> = report.rejected.iter().map(|r| r.consultant_id.as_str()).collect();
    assert_eq!(rejected, vec!["c-3", "c-4"]);
    assert!(report.rejected[0].reason.contains("Invalid capacity"));
    assert!(report.rejected[1].reason.contains("Invalid estimated hours"));
}

#[test]
fn both_rankings_put_the_overloaded_consultant_first() {
    let calc = calculator();
    let report = calc.evaluate_dashboard(&team(), Utc::now());

    let top = &report.capacity_ranking[0];
    assert_eq!(top.consultant_id, "c-2");
    assert_eq!(top.status, CapacityStatus::Bottleneck);
    assert_eq!(report.name_of("c-2"), "Pedro Costa");

    let top_real = &report.real_ranking[0];
    assert_eq!(top_real.consultant_id, "c-2");
    // 30.8h / 40h = 77% plus one overdue item
    assert!((top_real.saturation_percent - 97.0).abs() < 1e-9);
    assert_eq!(top_real.status, LoadStatus::Medium);

    assert_eq!(report.bottlenecks().count(), 1);
}

#[test]
fn summary_counts_cover_every_accepted_consultant() {
    let calc = calculator();
    let report = calc.evaluate_dashboard(&team(), Utc::now());

    assert_eq!(report.load_counts.values().sum::<usize>(), 2);
    assert_eq!(report.load_counts[&LoadStatus::Low], 1);
    assert_eq!(report.load_counts[&LoadStatus::Medium], 1);
    assert_eq!(report.capacity_counts[&CapacityStatus::Healthy], 1);
    assert_eq!(report.capacity_counts[&CapacityStatus::Bottleneck], 1);
}

#[test]
fn configured_labels_are_used_for_presentation() {
    let mut config = SaturationConfig::default();
    config.labels.bottleneck = "Bottleneck".into();
    let calc = SaturationCalculator::new(config).unwrap();

    assert_eq!(calc.capacity_label(CapacityStatus::Bottleneck), "Bottleneck");
    assert_eq!(calc.load_label(LoadStatus::Critical), "Crítica");
}

#[test]
fn missing_capacity_figures_fall_back_to_config_defaults() {
    let calc = calculator();
    let (capacity, _) = calc
        .evaluate_consultant(&workload("c-9", "Default", None, vec![]))
        .unwrap();
    assert!((capacity.weekly_capacity_hours - 28.0).abs() < 1e-9);
}

#[test]
fn report_serializes_for_the_presentation_layer() {
    let calc = calculator();
    let report = calc.evaluate_dashboard(&team(), Utc::now());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["capacity_ranking"][0]["status"], "bottleneck");
    assert_eq!(json["load_counts"]["medium"], 1);
}

#[test]
fn repeated_consultant_id_keeps_the_first_row_only() {
    let calc = calculator();
    let report = calc.evaluate_dashboard(
        &[
            workload("c-1", "Ana Souza", Some(40.0), vec![
                WorkItem::new("a", WorkKind::Task, WorkState::InProgress, 7.0),
            ]),
            workload("c-1", "Ana S.", Some(40.0), vec![
                WorkItem::new("b", WorkKind::Task, WorkState::InProgress, 35.0),
            ]),
        ],
        Utc::now(),
    );

    assert_eq!(report.consultant_count(), 1);
    assert_eq!(report.capacity_ranking[0].active_load_hours, 7.0);
    assert_eq!(report.real_ranking[0].saturation_percent, 17.5);
    assert_eq!(report.name_of("c-1"), "Ana Souza");

    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].consultant_id, "c-1");
    assert_eq!(report.rejected[0].name, "Ana S.");
    assert!(report.rejected[0].reason.contains("Duplicate consultant"));
}

#[test]
fn paired_records_follow_the_capacity_ranking() {
    let calc = calculator();
    let report = calc.evaluate_dashboard(&team(), Utc::now());

    let pairs = report.paired_records();
    assert_eq!(pairs.len(), report.consultant_count());
    for ((cap, real), ranked) in pairs.iter().zip(&report.capacity_ranking) {
        assert_eq!(cap.consultant_id, ranked.consultant_id);
        assert_eq!(real.consultant_id, cap.consultant_id);
    }
}

#[test]
fn idle_and_zero_hour_consultants_tie_in_id_order() {
    let calc = calculator();
    let report = calc.evaluate_dashboard(
        &[
            workload("b-zero", "Bruno", Some(40.0), vec![
                WorkItem::new("z", WorkKind::Task, WorkState::Scheduled, 0.0),
            ]),
            workload("a-idle", "Ana", Some(40.0), vec![]),
        ],
        Utc::now(),
    );

    let ids: Vec<_> = report.capacity_ranking.iter().map(|r| r.consultant_id.as_str()).collect();
    assert_eq!(ids, vec!["a-idle", "b-zero"]);
    for r in &report.capacity_ranking {
        assert!(r.active_load_hours.is_sign_positive());
        assert!(r.saturation_index.is_sign_positive());
    }

    let json = serde_json::to_string(&report).unwrap();
    assert!(!json.contains("-0.0"));
}
