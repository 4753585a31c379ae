//! sat-runner: headless consultant saturation report.
//!
//! Usage:
//!   sat-runner --input consultants.json
//!   sat-runner --sample --data-dir ./data --db cache.db --json
//!   sat-runner --input consultants.json --db cache.db --force
//!
//! With `--db`, the cache is only rewritten once the refresh interval has
//! passed since the last evaluation. `--force` rewrites it regardless.

use anyhow::{bail, Context, Result};
use saturation_core::{
    calculator::SaturationCalculator,
    config::SaturationConfig,
    dashboard::{ConsultantWorkload, DashboardReport},
    refresh::RefreshPolicy,
    store::SaturationStore,
};
use std::env;
use std::path::Path;

#[derive(serde::Deserialize)]
struct WorkloadFile {
    consultants: Vec<ConsultantWorkload>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json_mode = args.iter().any(|a| a == "--json");
    let use_sample = args.iter().any(|a| a == "--sample");
    let force = args.iter().any(|a| a == "--force");
    let data_dir = arg_value(&args, "--data-dir").unwrap_or("./data");
    let db = arg_value(&args, "--db");

    let input = match (arg_value(&args, "--input"), use_sample) {
        (Some(_), true) => bail!("--input and --sample are mutually exclusive"),
        (Some(path), false) => path.to_string(),
        (None, true) => format!("{data_dir}/sample_consultants.json"),
        (None, false) => bail!("missing --input <file> (or pass --sample for the bundled team)"),
    };

    let config = load_config(data_dir)?;
    let calculator = SaturationCalculator::new(config)?;

    let content = std::fs::read_to_string(&input).with_context(|| format!("Cannot read {input}"))?;
    let file: WorkloadFile =
        serde_json::from_str(&content).with_context(|| format!("Cannot parse {input}"))?;

    let now = chrono::Utc::now();
    let report = calculator.evaluate_dashboard(&file.consultants, now);

    if let Some(db) = db {
        let store = SaturationStore::open(db)?;
        store.migrate()?;
        let policy = RefreshPolicy::from_config(&calculator.config().refresh)?;
        let last = store.last_evaluated_at()?;
        if force || policy.is_due(last, now) {
            let rows = store.replace_snapshots(&report)?;
            log::info!("cache in {db} refreshed with {rows} consultants");
        } else if let Some(last) = last {
            let next = policy
                .next_due(last)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "never".into());
            log::info!("cache in {db} is fresh until {next}, not rewritten (use --force)");
        }
    }

    emit(&calculator, &report, json_mode)?;
    Ok(())
}

fn load_config(data_dir: &str) -> Result<SaturationConfig> {
    let path = format!("{data_dir}/saturation_config.json");
    if Path::new(&path).exists() {
        SaturationConfig::load(data_dir)
    } else {
        log::warn!("{path} not found, using built-in defaults");
        Ok(SaturationConfig::default())
    }
}

fn emit(calculator: &SaturationCalculator, report: &DashboardReport, json_mode: bool) -> Result<()> {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_report(calculator, report);
    }
    Ok(())
}

fn print_report(calculator: &SaturationCalculator, report: &DashboardReport) {
    println!("=== SATURATION REPORT ===");
    println!("  evaluation:  {}", report.evaluation_id);
    println!("  at:          {}", report.evaluated_at.to_rfc3339());
    println!("  consultants: {}", report.consultant_count());
    println!();

    println!("=== CAPACITY MODEL (load / capacity) ===");
    for (pos, r) in report.capacity_ranking.iter().enumerate() {
        println!(
            "  {:>2}. {:<20} {:>6.1}h / {:>5.1}h  index {:>5.2}  {}",
            pos + 1,
            report.name_of(&r.consultant_id),
            r.active_load_hours,
            r.weekly_capacity_hours,
            r.saturation_index,
            calculator.capacity_label(r.status)
        );
    }
    println!();

    println!("=== REAL MODEL (forecast / fixed week + overdue) ===");
    for (pos, r) in report.real_ranking.iter().enumerate() {
        println!(
            "  {:>2}. {:<20} {:>6.1}%  (base {:>5.1}% + overdue {:>4.0}%)  {}",
            pos + 1,
            report.name_of(&r.consultant_id),
            r.saturation_percent,
            r.base_saturation_percent,
            r.overdue_penalty_percent,
            calculator.load_label(r.status)
        );
    }
    println!();

    println!("=== SUMMARY ===");
    for (status, count) in &report.load_counts {
        println!("  {:<10} {count}", calculator.load_label(*status));
    }
    for (status, count) in &report.capacity_counts {
        println!("  {:<10} {count}", calculator.capacity_label(*status));
    }

    if !report.rejected.is_empty() {
        println!();
        println!("=== REJECTED ===");
        for r in &report.rejected {
            println!("  {} ({}): {}", r.name, r.consultant_id, r.reason);
        }
    }
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
