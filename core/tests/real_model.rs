//! Real model: forecast over a fixed 40h week plus 20 points per overdue item.

use saturation_core::{
    config::{PercentThresholds, RealModelConfig},
    error::SaturationError,
    real_model::{
        compute_real_saturation_model, HourBuckets, KindBreakdown, LoadStatus, RealSaturationInput,
    },
    work_item::{WorkItem, WorkKind, WorkState},
};

fn input(appointment_forecast: f64, task_forecast: f64, overdue_count: u32) -> RealSaturationInput {
    RealSaturationInput {
        breakdown: KindBreakdown {
            appointments: HourBuckets { forecast: appointment_forecast, ..Default::default() },
            tasks:        HourBuckets { forecast: task_forecast, ..Default::default() },
        },
        overdue_count,
    }
}

fn compute(input: &RealSaturationInput) -> saturation_core::real_model::RealSaturationRecord {
    compute_real_saturation_model(
        "c-1",
        input,
        &RealModelConfig::default(),
        &PercentThresholds::default(),
    )
    .unwrap()
}

#[test]
fn fifty_forecast_hours_and_one_overdue_is_high() {
    let record = compute(&input(30.0, 20.0, 1));

    assert_eq!(record.base_saturation_percent, 125.0);
    assert_eq!(record.overdue_penalty_percent, 20.0);
    assert_eq!(record.saturation_percent, 145.0);
    assert_eq!(record.status, LoadStatus::High);
}

#[test]
fn threshold_boundaries_are_inclusive_on_the_upper_side() {
    let t = PercentThresholds::default();
    assert_eq!(t.classify(70.0), LoadStatus::Low);
    assert_eq!(t.classify(70.0001), LoadStatus::Medium);
    assert_eq!(t.classify(100.0), LoadStatus::Medium);
    assert_eq!(t.classify(100.0001), LoadStatus::High);
    assert_eq!(t.classify(150.0), LoadStatus::High);
    assert_eq!(t.classify(150.0001), LoadStatus::Critical);
}

#[test]
fn two_overdue_items_add_exactly_forty_points() {
    let clean = compute(&input(12.0, 8.0, 0));
    let late = compute(&input(12.0, 8.0, 2));

    assert_eq!(late.saturation_percent - clean.saturation_percent, 40.0);
    assert_eq!(late.base_saturation_percent, clean.base_saturation_percent);
}

#[test]
fn penalty_is_unbounded_by_default() {
    let record = compute(&input(0.0, 0.0, 12));
    assert_eq!(record.saturation_percent, 240.0);
    assert_eq!(record.status, LoadStatus::Critical);
}

#[test]
fn configured_cap_limits_the_penalty_only() {
    let model = RealModelConfig {
        overdue_penalty_cap_pct: Some(100.0),
        ..Default::default()
    };
    let record = compute_real_saturation_model(
        "c-1",
        &input(20.0, 0.0, 12),
        &model,
        &PercentThresholds::default(),
    )
    .unwrap();

    assert_eq!(record.base_saturation_percent, 50.0);
    assert_eq!(record.overdue_penalty_percent, 100.0);
    assert_eq!(record.saturation_percent, 150.0);
}

#[test]
fn realized_and_overdue_hours_do_not_drive_the_base() {
    let mut i = input(10.0, 10.0, 0);
    i.breakdown.tasks.realized = 80.0;
    i.breakdown.appointments.overdue = 30.0;

    let record = compute(&i);
    assert_eq!(record.base_saturation_percent, 50.0);
    assert_eq!(record.breakdown.total_realized_hours(), 80.0);
    assert_eq!(record.breakdown.total_overdue_hours(), 30.0);
}

#[test]
fn negative_bucket_rejected() {
    let mut i = input(10.0, 10.0, 0);
    i.breakdown.appointments.forecast = -1.0;

    let err = compute_real_saturation_model(
        "c-1",
        &i,
        &RealModelConfig::default(),
        &PercentThresholds::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SaturationError::InvalidHours { .. }));
}

#[test]
fn items_are_bucketed_by_kind_and_state() {
    let items = vec![
        WorkItem::new("a1", WorkKind::Appointment, WorkState::Scheduled, 3.0),
        WorkItem::new("a2", WorkKind::Appointment, WorkState::Completed, 2.0),
        WorkItem::new("a3", WorkKind::Appointment, WorkState::Overdue, 1.5),
        WorkItem::new("t1", WorkKind::Task, WorkState::InProgress, 5.0),
        WorkItem::new("t2", WorkKind::Task, WorkState::Confirmed, 4.0),
        WorkItem::new("t3", WorkKind::Task, WorkState::Overdue, 2.0),
        WorkItem::new("t4", WorkKind::Task, WorkState::Cancelled, 9.0),
    ];

    let i = RealSaturationInput::from_work_items(&items).unwrap();

    assert_eq!(
        i.breakdown.appointments,
        HourBuckets { realized: 2.0, forecast: 3.0, overdue: 1.5 }
    );
    assert_eq!(
        i.breakdown.tasks,
        HourBuckets { realized: 0.0, forecast: 9.0, overdue: 2.0 }
    );
    assert_eq!(i.overdue_count, 2);
    assert_eq!(i.breakdown.total_forecast_hours(), 12.0);
}

#[test]
fn more_forecast_or_more_overdue_never_lowers_the_percent() {
    let mut previous = compute(&input(0.0, 0.0, 0)).saturation_percent;
    for step in 1..=40u32 {
        let hours = f64::from(step) * 1.5;
        let current = compute(&input(hours, hours / 2.0, step / 5)).saturation_percent;
        assert!(current >= previous, "percent dropped at step {step}");
        previous = current;
    }
}
