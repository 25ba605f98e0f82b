//! Residual-risk change request rows.

use rusqlite::{params, Connection, OptionalExtension, Row};

use riskreg_core::errors::{ConflictReason, RiskRegError, RiskRegResult};
use riskreg_core::models::{EntityType, RequestStatus, ResidualRiskChangeRequest, Resolution};

use super::row::{decode_enum, decode_int, decode_opt_ts, decode_ts, encode_ts, insert_err};
use crate::to_storage_err;

const TABLE: &str = "change_requests";
const COLUMNS: &str = "id, risk_id, requester_id,
    current_likelihood, current_impact, current_score, current_rating,
    proposed_likelihood, proposed_impact, proposed_score, proposed_rating,
    justification, status, reviewer_id, review_note, created_at, reviewed_at";

struct ChangeRequestRow {
    id: String,
    risk_id: String,
    requester_id: String,
    current: [i64; 3],
    current_rating: String,
    proposed: [i64; 3],
    proposed_rating: String,
    justification: String,
    status: String,
    reviewer_id: Option<String>,
    review_note: Option<String>,
    created_at: String,
    reviewed_at: Option<String>,
}

impl ChangeRequestRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            risk_id: row.get(1)?,
            requester_id: row.get(2)?,
            current: [row.get(3)?, row.get(4)?, row.get(5)?],
            current_rating: row.get(6)?,
            proposed: [row.get(7)?, row.get(8)?, row.get(9)?],
            proposed_rating: row.get(10)?,
            justification: row.get(11)?,
            status: row.get(12)?,
            reviewer_id: row.get(13)?,
            review_note: row.get(14)?,
            created_at: row.get(15)?,
            reviewed_at: row.get(16)?,
        })
    }

    fn into_request(self) -> RiskRegResult<ResidualRiskChangeRequest> {
        let [cl, ci, cs] = self.current;
        let [pl, pi, ps] = self.proposed;
        Ok(ResidualRiskChangeRequest {
            current_likelihood: decode_int(TABLE, "current_likelihood", cl)?,
            current_impact: decode_int(TABLE, "current_impact", ci)?,
            current_score: decode_int(TABLE, "current_score", cs)?,
            current_rating: decode_enum(TABLE, &self.current_rating)?,
            proposed_likelihood: decode_int(TABLE, "proposed_likelihood", pl)?,
            proposed_impact: decode_int(TABLE, "proposed_impact", pi)?,
            proposed_score: decode_int(TABLE, "proposed_score", ps)?,
            proposed_rating: decode_enum(TABLE, &self.proposed_rating)?,
            status: decode_enum(TABLE, &self.status)?,
            created_at: decode_ts(TABLE, &self.created_at)?,
            reviewed_at: decode_opt_ts(TABLE, self.reviewed_at)?,
            id: self.id,
            risk_id: self.risk_id,
            requester_id: self.requester_id,
            justification: self.justification,
            reviewer_id: self.reviewer_id,
            review_note: self.review_note,
        })
    }
}

pub fn insert_request(conn: &Connection, request: &ResidualRiskChangeRequest) -> RiskRegResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO change_requests ({COLUMNS}) VALUES
             (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"
        ),
        params![
            request.id,
            request.risk_id,
            request.requester_id,
            request.current_likelihood,
            request.current_impact,
            request.current_score,
            request.current_rating.as_str(),
            request.proposed_likelihood,
            request.proposed_impact,
            request.proposed_score,
            request.proposed_rating.as_str(),
            request.justification,
            request.status.as_str(),
            request.reviewer_id,
            request.review_note,
            encode_ts(&request.created_at),
            request.reviewed_at.as_ref().map(encode_ts),
        ],
    )
    .map_err(|e| insert_err(e, EntityType::ChangeRequest, &request.id))?;
    Ok(())
}

pub fn get_request(conn: &Connection, id: &str) -> RiskRegResult<Option<ResidualRiskChangeRequest>> {
    let row = conn
        .prepare_cached(&format!("SELECT {COLUMNS} FROM change_requests WHERE id = ?1"))
        .and_then(|mut stmt| stmt.query_row([id], ChangeRequestRow::from_row).optional())
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(ChangeRequestRow::into_request).transpose()
}

/// Requests for a risk in submission order, optionally filtered by status.
pub fn list_requests(
    conn: &Connection,
    risk_id: &str,
    status: Option<RequestStatus>,
) -> RiskRegResult<Vec<ResidualRiskChangeRequest>> {
    let rows = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM change_requests
             WHERE risk_id = ?1 AND (?2 IS NULL OR status = ?2)
             ORDER BY created_at, rowid"
        ))
        .and_then(|mut stmt| {
            let rows = stmt
                .query_map(params![risk_id, status.map(RequestStatus::as_str)], ChangeRequestRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>();
            rows
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.into_iter().map(ChangeRequestRow::into_request).collect()
}

/// The single `pending → terminal` transition.
///
/// The `status = 'pending'` predicate is the guard: when another resolver
/// got there first, zero rows match and the caller gets `AlreadyResolved`.
pub fn resolve_request(conn: &Connection, resolution: &Resolution) -> RiskRegResult<()> {
    let rows = conn
        .execute(
            "UPDATE change_requests
             SET status = ?2, reviewer_id = ?3, review_note = ?4, reviewed_at = ?5
             WHERE id = ?1 AND status = 'pending'",
            params![
                resolution.request_id,
                resolution.status.as_str(),
                resolution.reviewer_id,
                resolution.note,
                encode_ts(&resolution.reviewed_at),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 1 {
        return Ok(());
    }
    match get_request(conn, &resolution.request_id)? {
        Some(_) => Err(RiskRegError::conflict(ConflictReason::AlreadyResolved {
            request_id: resolution.request_id.clone(),
        })),
        None => Err(RiskRegError::not_found(
            EntityType::ChangeRequest,
            &resolution.request_id,
        )),
    }
}
