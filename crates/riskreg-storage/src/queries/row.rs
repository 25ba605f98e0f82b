//! Column encoding shared by the query modules.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, ErrorCode};

use riskreg_core::errors::{ConflictReason, RiskRegError, RiskRegResult, StorageError};
use riskreg_core::models::EntityType;

use crate::to_storage_err;

/// Fixed-width RFC 3339 so text order is time order.
pub fn encode_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_ts(table: &str, raw: &str) -> RiskRegResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| corrupt(table, format!("bad timestamp {raw:?}: {e}")))
}

pub fn decode_opt_ts(table: &str, raw: Option<String>) -> RiskRegResult<Option<DateTime<Utc>>> {
    raw.map(|s| decode_ts(table, &s)).transpose()
}

/// Parse a wire-name column back into its enum.
pub fn decode_enum<T: FromStr<Err = String>>(table: &str, raw: &str) -> RiskRegResult<T> {
    raw.parse().map_err(|e: String| corrupt(table, e))
}

/// Narrow an INTEGER column into a smaller unsigned type.
pub fn decode_int<T: TryFrom<i64>>(table: &str, column: &str, raw: i64) -> RiskRegResult<T> {
    T::try_from(raw).map_err(|_| corrupt(table, format!("{column} out of range: {raw}")))
}

pub fn corrupt(table: &str, reason: impl Into<String>) -> RiskRegError {
    RiskRegError::Persistence(StorageError::CorruptRow {
        table: table.to_string(),
        reason: reason.into(),
    })
}

/// Map an INSERT failure: primary key clashes are conflicts, broken parent
/// references are validation failures, everything else is persistence.
pub fn insert_err(e: rusqlite::Error, entity: EntityType, id: &str) -> RiskRegError {
    if let rusqlite::Error::SqliteFailure(err, _) = &e {
        if err.code == ErrorCode::ConstraintViolation {
            match err.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return RiskRegError::conflict(ConflictReason::Duplicate {
                        entity,
                        id: id.to_string(),
                    })
                }
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return RiskRegError::validation(
                        entity.as_str(),
                        format!("{id} references a parent that does not exist"),
                    )
                }
                _ => {}
            }
        }
    }
    to_storage_err(e.to_string())
}

/// Resolve a zero-row optimistic UPDATE into NotFound or StaleWrite.
pub fn stale_or_missing(
    conn: &Connection,
    table: &str,
    entity: EntityType,
    id: &str,
) -> RiskRegError {
    let exists = conn
        .query_row(&format!("SELECT 1 FROM {table} WHERE id = ?1"), [id], |_| Ok(()))
        .is_ok();
    if exists {
        RiskRegError::conflict(ConflictReason::StaleWrite {
            entity,
            id: id.to_string(),
        })
    } else {
        RiskRegError::not_found(entity, id)
    }
}
