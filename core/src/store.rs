//! SQLite cache of the latest dashboard.
//!
//! RULE: Only store.rs talks to the database.
//! Snapshots are never a source of truth: they are replaced as a whole,
//! inside one transaction, so a reader never sees capacity, load and
//! index from different evaluations.

use crate::{
    capacity_model::CapacityStatus,
    dashboard::DashboardReport,
    error::SatResult,
    real_model::{KindBreakdown, LoadStatus},
    types::{ConsultantId, EvaluationId},
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};

/// Which model's metric orders `all_snapshots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrder {
    CapacityIndex,
    RealPercent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow {
    pub consultant_id:         ConsultantId,
    pub evaluation_id:         EvaluationId,
    pub name:                  String,
    pub weekly_capacity_hours: f64,
    pub active_load_hours:     f64,
    pub saturation_index:      f64,
    pub capacity_status:       CapacityStatus,
    pub saturation_percent:    f64,
    pub load_status:           LoadStatus,
    pub overdue_count:         u32,
    pub breakdown:             KindBreakdown,
    pub evaluated_at:          DateTime<Utc>,
}

const SNAPSHOT_COLUMNS: &str = "consultant_id, evaluation_id, name, weekly_capacity_hours,
     active_load_hours, saturation_index, capacity_status, saturation_percent,
     load_status, overdue_count, breakdown_json, evaluated_at";

pub struct SaturationStore {
    conn: Connection,
}

impl SaturationStore {
    /// Open (or create) the cache database at `path`.
    pub fn open(path: &str) -> SatResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: readers keep going while a refresh writes.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SatResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> SatResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_saturation.sql"))?;
        Ok(())
    }

    // ── Writes ─────────────────────────────────────────────────

    /// Replace the cached dashboard with `report`. Returns rows written.
    pub fn replace_snapshots(&self, report: &DashboardReport) -> SatResult<usize> {
        let evaluated_at = format_ts(report.evaluated_at);
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO evaluation (evaluation_id, evaluated_at, consultant_count, rejected_count)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                report.evaluation_id,
                evaluated_at,
                report.consultant_count() as i64,
                report.rejected.len() as i64,
            ],
        )?;
        tx.execute("DELETE FROM saturation_snapshot", [])?;

        let mut written = 0usize;
        for (cap, real) in report.paired_records() {
            tx.execute(
                "INSERT OR REPLACE INTO saturation_snapshot (
                     consultant_id, evaluation_id, name, weekly_capacity_hours,
                     active_load_hours, saturation_index, capacity_status, saturation_percent,
                     load_status, overdue_count, breakdown_json, evaluated_at
                 ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12)",
                params![
                    cap.consultant_id,
                    report.evaluation_id,
                    report.name_of(&cap.consultant_id),
                    cap.weekly_capacity_hours,
                    cap.active_load_hours,
                    cap.saturation_index,
                    cap.status.as_str(),
                    real.saturation_percent,
                    real.status.as_str(),
                    real.overdue_count,
                    serde_json::to_string(&real.breakdown)?,
                    evaluated_at,
                ],
            )?;
            written += 1;
        }

        tx.commit()?;
        log::info!(
            "store: cached {written} snapshots for evaluation {}",
            report.evaluation_id
        );
        Ok(written)
    }

    // ── Reads ──────────────────────────────────────────────────

    pub fn latest_snapshot(&self, consultant_id: &str) -> SatResult<Option<SnapshotRow>> {
        let sql = format!("SELECT {SNAPSHOT_COLUMNS} FROM saturation_snapshot WHERE consultant_id = ?1");
        let row = self
            .conn
            .query_row(&sql, params![consultant_id], snapshot_from_row)
            .optional()?;
        Ok(row)
    }

    /// Every cached row, worst first by the chosen model, id on ties.
    pub fn all_snapshots(&self, order: SnapshotOrder) -> SatResult<Vec<SnapshotRow>> {
        let order_by = match order {
            SnapshotOrder::CapacityIndex => "saturation_index DESC, consultant_id ASC",
            SnapshotOrder::RealPercent   => "saturation_percent DESC, consultant_id ASC",
        };
        let sql = format!("SELECT {SNAPSHOT_COLUMNS} FROM saturation_snapshot ORDER BY {order_by}");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], snapshot_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn snapshot_count(&self) -> SatResult<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM saturation_snapshot",
            [],
            |r| r.get(0),
        )?)
    }

    pub fn evaluation_count(&self) -> SatResult<i64> {
        Ok(self.conn.query_row("SELECT COUNT(*) FROM evaluation", [], |r| r.get(0))?)
    }

    /// When the cache was last refreshed. Feed this to `RefreshPolicy::is_due`.
    pub fn last_evaluated_at(&self) -> SatResult<Option<DateTime<Utc>>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT evaluated_at FROM evaluation ORDER BY evaluated_at DESC LIMIT 1",
                [],
                |r| r.get(0),
            )
            .optional()?;
        match raw {
            Some(s) => Ok(Some(parse_ts(&s, 0)?)),
            None => Ok(None),
        }
    }
}

fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_ts(s: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn conversion_error(column: usize, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        Type::Text,
        format!("unknown status '{value}'").into(),
    )
}

fn snapshot_from_row(r: &Row<'_>) -> rusqlite::Result<SnapshotRow> {
    let capacity_status: String = r.get(6)?;
    let load_status: String = r.get(8)?;
    let breakdown_json: String = r.get(10)?;
    let evaluated_at: String = r.get(11)?;

    Ok(SnapshotRow {
        consultant_id:         r.get(0)?,
        evaluation_id:         r.get(1)?,
        name:                  r.get(2)?,
        weekly_capacity_hours: r.get(3)?,
        active_load_hours:     r.get(4)?,
        saturation_index:      r.get(5)?,
        capacity_status:       CapacityStatus::parse(&capacity_status)
            .ok_or_else(|| conversion_error(6, &capacity_status))?,
        saturation_percent:    r.get(7)?,
        load_status:           LoadStatus::parse(&load_status)
            .ok_or_else(|| conversion_error(8, &load_status))?,
        overdue_count:         r.get(9)?,
        breakdown:             serde_json::from_str(&breakdown_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e)))?,
        evaluated_at:          parse_ts(&evaluated_at, 11)?,
    })
}
