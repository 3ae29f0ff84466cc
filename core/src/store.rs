//! SQLite persistence for generated datasets.
//!
//! RULE: Only store.rs talks to the database.
//! The assembler and the runner call store methods; they never execute SQL.

use crate::{
    error::FloodResult,
    record::FloodRecord,
    scorer::RiskLevel,
    ward::Zone,
};
use rusqlite::{params, types::Type, Connection};
use std::path::Path;

pub struct DatasetStore {
    conn: Connection,
}

impl DatasetStore {
    /// Open (or create) the dataset database at `path`.
    pub fn open(path: impl AsRef<Path>) -> FloodResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> FloodResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> FloodResult<()> {
        self.conn.execute_batch(include_str!("../../migrations/001_dataset.sql"))?;
        Ok(())
    }

    // ── Run ────────────────────────────────────────────────────

    pub fn insert_run(
        &self,
        run_id: &str,
        seed: u64,
        mode: &str,
        version: &str,
        started_at: &str,
    ) -> FloodResult<()> {
        self.conn.execute(
            "INSERT INTO run (run_id, seed, mode, version, started_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![run_id, seed as i64, mode, version, started_at],
        )?;
        Ok(())
    }

    // ── Records ────────────────────────────────────────────────

    /// Insert every record of a run in a single transaction.
    pub fn insert_records(&mut self, run_id: &str, records: &[FloodRecord]) -> FloodResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO flood_record (
                    run_id, cell_id, latitude, longitude, ward_name, zone,
                    distance_to_yamuna_m, rain_1h_mm, rain_3h_mm, rain_24h_mm,
                    rain_forecast_3h_mm, elevation_m, slope_percent, impervious_ratio,
                    drain_density, drain_capacity_score, drain_blockage_risk,
                    yamuna_level_m, flooded_before, flood_frequency,
                    citizen_reports_count, avg_reported_depth_cm, max_flood_depth_cm,
                    flood_risk_level
                ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?19,?20,?21,?22,?23,?24)",
            )?;
            for r in records {
                stmt.execute(params![
                    run_id,
                    r.cell_id as i64,
                    r.latitude,
                    r.longitude,
                    r.ward_name,
                    r.zone.as_str(),
                    r.distance_to_river_m,
                    r.rain_1h_mm,
                    r.rain_3h_mm,
                    r.rain_24h_mm,
                    r.rain_forecast_3h_mm,
                    r.elevation_m,
                    r.slope_percent,
                    r.impervious_ratio,
                    r.drain_density,
                    r.drain_capacity_score,
                    r.drain_blockage_risk,
                    r.river_level_m,
                    r.flooded_before as i64,
                    r.flood_frequency as i64,
                    r.citizen_reports_count as i64,
                    r.avg_reported_depth_cm,
                    r.max_flood_depth_cm,
                    r.flood_risk_level.index() as i64,
                ])?;
            }
        }
        tx.commit()?;
        log::debug!("stored {} records for run {run_id}", records.len());
        Ok(())
    }

    /// All records of a run, ordered by cell id.
    pub fn load_records(&self, run_id: &str) -> FloodResult<Vec<FloodRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT cell_id, latitude, longitude, ward_name, zone,
                    distance_to_yamuna_m, rain_1h_mm, rain_3h_mm, rain_24h_mm,
                    rain_forecast_3h_mm, elevation_m, slope_percent, impervious_ratio,
                    drain_density, drain_capacity_score, drain_blockage_risk,
                    yamuna_level_m, flooded_before, flood_frequency,
                    citizen_reports_count, avg_reported_depth_cm, max_flood_depth_cm,
                    flood_risk_level
             FROM flood_record WHERE run_id = ?1
             ORDER BY cell_id ASC",
        )?;
        let records = stmt
            .query_map(params![run_id], |row| {
                let zone: String = row.get(4)?;
                let zone = Zone::from_name(&zone).ok_or_else(|| {
                    conversion_failure(4, Type::Text, format!("unknown zone '{zone}'").into())
                })?;
                let level = RiskLevel::try_from(row.get::<_, i64>(22)?)
                    .map_err(|e| conversion_failure(22, Type::Integer, Box::new(e)))?;
                Ok(FloodRecord {
                    cell_id:               row.get::<_, i64>(0)? as u64,
                    latitude:              row.get(1)?,
                    longitude:             row.get(2)?,
                    ward_name:             row.get(3)?,
                    zone,
                    distance_to_river_m:   row.get(5)?,
                    rain_1h_mm:            row.get(6)?,
                    rain_3h_mm:            row.get(7)?,
                    rain_24h_mm:           row.get(8)?,
                    rain_forecast_3h_mm:   row.get(9)?,
                    elevation_m:           row.get(10)?,
                    slope_percent:         row.get(11)?,
                    impervious_ratio:      row.get(12)?,
                    drain_density:         row.get(13)?,
                    drain_capacity_score:  row.get(14)?,
                    drain_blockage_risk:   row.get(15)?,
                    river_level_m:         row.get(16)?,
                    flooded_before:        row.get::<_, i64>(17)? as u8,
                    flood_frequency:       row.get::<_, i64>(18)? as u32,
                    citizen_reports_count: row.get::<_, i64>(19)? as u32,
                    avg_reported_depth_cm: row.get(20)?,
                    max_flood_depth_cm:    row.get(21)?,
                    flood_risk_level:      level,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Record count per risk level, indexed by level.
    pub fn label_counts(&self, run_id: &str) -> FloodResult<[usize; 3]> {
        let mut stmt = self.conn.prepare(
            "SELECT flood_risk_level, COUNT(*) FROM flood_record
             WHERE run_id = ?1 GROUP BY flood_risk_level",
        )?;
        let mut counts = [0usize; 3];
        let rows = stmt.query_map(params![run_id], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?;
        for row in rows {
            let (level, count) = row?;
            counts[RiskLevel::try_from(level)?.index()] = count as usize;
        }
        Ok(counts)
    }

    pub fn record_count(&self, run_id: &str) -> FloodResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM flood_record WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

fn conversion_failure(
    column: usize,
    sql_type: Type,
    source: Box<dyn std::error::Error + Send + Sync>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, sql_type, source)
}
