//! SQLite-backed live store.
//!
//! Every trait method runs a parameterized query; chart bundles and factor
//! maps live in JSON text columns. Backend failures are logged with full
//! detail here and surface to callers only as [`StorageError`] messages.

use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};

use super::{StorageError, TriangleOption, TriangleRepository};
use crate::logging::{log, obj, v_str, Domain, Level};
use crate::model::{
    ChartDataBundle, LanePosition, Triangle, TriangleKind, TriangleStatus,
};

pub struct SqliteTriangleStore {
    conn: Mutex<Connection>,
}

const SELECT_COLS: &str = "id, valuation_id, name, kind, position, status, \
     data_json, dev_factors_json, ultimate_json, created_at, updated_at";

impl SqliteTriangleStore {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).with_context(|| format!("open store at {}", path))?;
        let store = Self { conn: Mutex::new(conn) };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "BEGIN;
            CREATE TABLE IF NOT EXISTS triangles (
                id TEXT PRIMARY KEY,
                valuation_id TEXT NOT NULL,
                name TEXT NOT NULL,
                kind TEXT NOT NULL,
                position TEXT NOT NULL,
                status TEXT NOT NULL,
                data_json TEXT,
                dev_factors_json TEXT NOT NULL,
                ultimate_json TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_triangles_valuation
                ON triangles(valuation_id);
            CREATE INDEX IF NOT EXISTS idx_triangles_name
                ON triangles(name);
            COMMIT;",
        )?;
        Ok(())
    }

    /// Ingestion-side helper; not part of the read-only repository
    /// contract. Upserts by id and bumps nothing besides the row itself.
    pub fn insert(&self, t: &Triangle) -> Result<()> {
        let data_json = match &t.chart_data {
            Some(bundle) => Some(serde_json::to_string(bundle)?),
            None => None,
        };
        let ultimate_json = match &t.ultimate_values {
            Some(map) => Some(serde_json::to_string(map)?),
            None => None,
        };
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO triangles
                (id, valuation_id, name, kind, position, status,
                 data_json, dev_factors_json, ultimate_json, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                t.id,
                t.valuation_id,
                t.name,
                t.kind.as_str(),
                t.position.as_str(),
                t.status.as_str(),
                data_json,
                serde_json::to_string(&t.development_factors)?,
                ultimate_json,
                rfc3339(&t.created_at),
                rfc3339(&t.updated_at),
            ],
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| anyhow!("connection lock poisoned"))
    }

    fn query_triangles(&self, sql: &str, bind: &[&dyn rusqlite::ToSql]) -> Result<Vec<Triangle>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(bind, raw_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(decode_row(row?)?);
        }
        Ok(out)
    }
}

fn rfc3339(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// Raw column values; decoding to domain types happens outside the
// rusqlite row callback so all errors flow through one path.
struct RawRow {
    id: String,
    valuation_id: String,
    name: String,
    kind: String,
    position: String,
    status: String,
    data_json: Option<String>,
    dev_factors_json: String,
    ultimate_json: Option<String>,
    created_at: String,
    updated_at: String,
}

fn raw_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: row.get(0)?,
        valuation_id: row.get(1)?,
        name: row.get(2)?,
        kind: row.get(3)?,
        position: row.get(4)?,
        status: row.get(5)?,
        data_json: row.get(6)?,
        dev_factors_json: row.get(7)?,
        ultimate_json: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn decode_row(raw: RawRow) -> Result<Triangle> {
    let kind = TriangleKind::parse(&raw.kind)
        .ok_or_else(|| anyhow!("unknown triangle kind '{}'", raw.kind))?;
    let position = LanePosition::parse(&raw.position)
        .ok_or_else(|| anyhow!("unknown lane position '{}'", raw.position))?;
    let status = TriangleStatus::parse(&raw.status)
        .ok_or_else(|| anyhow!("unknown triangle status '{}'", raw.status))?;
    let chart_data: Option<ChartDataBundle> = match raw.data_json {
        Some(json) => Some(serde_json::from_str(&json).context("decode data_json")?),
        None => None,
    };
    let development_factors: BTreeMap<String, f64> =
        serde_json::from_str(&raw.dev_factors_json).context("decode dev_factors_json")?;
    let ultimate_values: Option<BTreeMap<String, f64>> = match raw.ultimate_json {
        Some(json) => Some(serde_json::from_str(&json).context("decode ultimate_json")?),
        None => None,
    };
    Ok(Triangle {
        id: raw.id,
        valuation_id: raw.valuation_id,
        name: raw.name,
        kind,
        position,
        status,
        chart_data,
        development_factors,
        ultimate_values,
        created_at: parse_ts(&raw.created_at)?,
        updated_at: parse_ts(&raw.updated_at)?,
    })
}

fn parse_ts(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("bad timestamp '{}'", s))?
        .with_timezone(&Utc))
}

fn fail(op: &str, err: anyhow::Error) -> StorageError {
    log(
        Level::Error,
        Domain::Repo,
        "storage_failure",
        obj(&[("op", v_str(op)), ("detail", v_str(&err.to_string()))]),
    );
    StorageError::new(op)
}

#[async_trait]
impl TriangleRepository for SqliteTriangleStore {
    async fn find_all(&self) -> Result<Vec<Triangle>, StorageError> {
        let sql =
            format!("SELECT {} FROM triangles ORDER BY created_at DESC", SELECT_COLS);
        self.query_triangles(&sql, &[])
            .map_err(|e| fail("failed to fetch all triangles", e))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Triangle>, StorageError> {
        let sql = format!("SELECT {} FROM triangles WHERE id = ?1", SELECT_COLS);
        self.query_triangles(&sql, &[&id])
            .map(|mut hits| if hits.is_empty() { None } else { Some(hits.remove(0)) })
            .map_err(|e| fail(&format!("failed to fetch triangle with id {}", id), e))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Triangle>, StorageError> {
        let sql = format!("SELECT {} FROM triangles WHERE name = ?1", SELECT_COLS);
        self.query_triangles(&sql, &[&name])
            .map(|mut hits| if hits.is_empty() { None } else { Some(hits.remove(0)) })
            .map_err(|e| fail(&format!("failed to fetch triangle with name {}", name), e))
    }

    async fn find_by_valuation_id(
        &self,
        valuation_id: &str,
    ) -> Result<Vec<Triangle>, StorageError> {
        let sql = format!(
            "SELECT {} FROM triangles WHERE valuation_id = ?1
             ORDER BY CASE position
                 WHEN 'left' THEN 0 WHEN 'center' THEN 1 ELSE 2 END",
            SELECT_COLS
        );
        self.query_triangles(&sql, &[&valuation_id]).map_err(|e| {
            fail(&format!("failed to fetch triangles for valuation {}", valuation_id), e)
        })
    }

    async fn find_all_completed(&self) -> Result<Vec<TriangleOption>, StorageError> {
        let run = || -> Result<Vec<TriangleOption>> {
            let conn = self.lock()?;
            let mut stmt = conn.prepare(
                "SELECT name FROM triangles WHERE status = 'completed'
                 ORDER BY created_at DESC",
            )?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut out = Vec::new();
            for name in rows {
                let name = name?;
                out.push(TriangleOption { value: name.clone(), label: name });
            }
            Ok(out)
        };
        run().map_err(|e| fail("failed to fetch completed triangles", e))
    }
}
