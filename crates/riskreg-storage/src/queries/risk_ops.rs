//! Risk rows.

use rusqlite::{params, Connection, OptionalExtension, Row};

use riskreg_core::errors::RiskRegResult;
use riskreg_core::models::{EntityType, Risk, RiskAssessment};

use super::row::{decode_enum, decode_int, decode_ts, encode_ts, insert_err, stale_or_missing};
use crate::to_storage_err;

const TABLE: &str = "risks";

const COLUMNS: &str = "id, title_en, title_ar, description_en, description_ar, department_id,
    owner_id, inherent_likelihood, inherent_impact, inherent_score, inherent_rating,
    residual_likelihood, residual_impact, residual_score, residual_rating,
    created_at, updated_at, version";

/// Raw column values, decoded into a `Risk` outside the rusqlite closure.
struct RiskRow {
    id: String,
    title_en: String,
    title_ar: String,
    description_en: String,
    description_ar: String,
    department_id: String,
    owner_id: Option<String>,
    inherent: [i64; 3],
    inherent_rating: String,
    residual: [i64; 3],
    residual_rating: String,
    created_at: String,
    updated_at: String,
    version: i64,
}

impl RiskRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title_en: row.get(1)?,
            title_ar: row.get(2)?,
            description_en: row.get(3)?,
            description_ar: row.get(4)?,
            department_id: row.get(5)?,
            owner_id: row.get(6)?,
            inherent: [row.get(7)?, row.get(8)?, row.get(9)?],
            inherent_rating: row.get(10)?,
            residual: [row.get(11)?, row.get(12)?, row.get(13)?],
            residual_rating: row.get(14)?,
            created_at: row.get(15)?,
            updated_at: row.get(16)?,
            version: row.get(17)?,
        })
    }

    fn into_risk(self) -> RiskRegResult<Risk> {
        Ok(Risk {
            inherent: assessment(self.inherent, &self.inherent_rating)?,
            residual: assessment(self.residual, &self.residual_rating)?,
            created_at: decode_ts(TABLE, &self.created_at)?,
            updated_at: decode_ts(TABLE, &self.updated_at)?,
            id: self.id,
            title_en: self.title_en,
            title_ar: self.title_ar,
            description_en: self.description_en,
            description_ar: self.description_ar,
            department_id: self.department_id,
            owner_id: self.owner_id,
            version: self.version,
        })
    }
}

fn assessment([likelihood, impact, score]: [i64; 3], rating: &str) -> RiskRegResult<RiskAssessment> {
    Ok(RiskAssessment {
        likelihood: decode_int(TABLE, "likelihood", likelihood)?,
        impact: decode_int(TABLE, "impact", impact)?,
        score: decode_int(TABLE, "score", score)?,
        rating: decode_enum(TABLE, rating)?,
    })
}

pub fn insert_risk(conn: &Connection, risk: &Risk) -> RiskRegResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO risks ({COLUMNS}) VALUES
             (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)"
        ),
        params![
            risk.id,
            risk.title_en,
            risk.title_ar,
            risk.description_en,
            risk.description_ar,
            risk.department_id,
            risk.owner_id,
            risk.inherent.likelihood,
            risk.inherent.impact,
            risk.inherent.score,
            risk.inherent.rating.as_str(),
            risk.residual.likelihood,
            risk.residual.impact,
            risk.residual.score,
            risk.residual.rating.as_str(),
            encode_ts(&risk.created_at),
            encode_ts(&risk.updated_at),
            risk.version,
        ],
    )
    .map_err(|e| insert_err(e, EntityType::Risk, &risk.id))?;
    Ok(())
}

pub fn get_risk(conn: &Connection, id: &str) -> RiskRegResult<Option<Risk>> {
    let row = conn
        .prepare_cached(&format!("SELECT {COLUMNS} FROM risks WHERE id = ?1"))
        .and_then(|mut stmt| stmt.query_row([id], RiskRow::from_row).optional())
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(RiskRow::into_risk).transpose()
}

/// Optimistic update: only succeeds against the version the caller read.
pub fn update_risk(conn: &Connection, risk: &Risk) -> RiskRegResult<()> {
    let rows = conn
        .execute(
            "UPDATE risks SET
                title_en = ?2, title_ar = ?3, description_en = ?4, description_ar = ?5,
                department_id = ?6, owner_id = ?7,
                inherent_likelihood = ?8, inherent_impact = ?9, inherent_score = ?10,
                inherent_rating = ?11,
                residual_likelihood = ?12, residual_impact = ?13, residual_score = ?14,
                residual_rating = ?15,
                updated_at = ?16, version = version + 1
             WHERE id = ?1 AND version = ?17",
            params![
                risk.id,
                risk.title_en,
                risk.title_ar,
                risk.description_en,
                risk.description_ar,
                risk.department_id,
                risk.owner_id,
                risk.inherent.likelihood,
                risk.inherent.impact,
                risk.inherent.score,
                risk.inherent.rating.as_str(),
                risk.residual.likelihood,
                risk.residual.impact,
                risk.residual.score,
                risk.residual.rating.as_str(),
                encode_ts(&risk.updated_at),
                risk.version,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 0 {
        return Err(stale_or_missing(conn, TABLE, EntityType::Risk, &risk.id));
    }
    Ok(())
}
