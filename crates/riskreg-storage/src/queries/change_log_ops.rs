//! Append-only change log rows.

use rusqlite::{params, Connection, Row};

use riskreg_core::errors::RiskRegResult;
use riskreg_core::models::{ChangeLogEntry, EntityRef};

use super::row::{decode_enum, decode_ts, encode_ts};
use crate::to_storage_err;

const TABLE: &str = "change_log";
const COLUMNS: &str = "id, batch_id, entity_type, entity_id, actor_id, field_name,
    label_en, label_ar, old_value, new_value, category, kind,
    description_en, description_ar, created_at";

struct ChangeLogRow {
    id: String,
    batch_id: String,
    entity_type: String,
    entity_id: String,
    actor_id: String,
    field_name: String,
    label_en: String,
    label_ar: String,
    old_value: String,
    new_value: String,
    category: String,
    kind: String,
    description_en: String,
    description_ar: String,
    created_at: String,
}

impl ChangeLogRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            batch_id: row.get(1)?,
            entity_type: row.get(2)?,
            entity_id: row.get(3)?,
            actor_id: row.get(4)?,
            field_name: row.get(5)?,
            label_en: row.get(6)?,
            label_ar: row.get(7)?,
            old_value: row.get(8)?,
            new_value: row.get(9)?,
            category: row.get(10)?,
            kind: row.get(11)?,
            description_en: row.get(12)?,
            description_ar: row.get(13)?,
            created_at: row.get(14)?,
        })
    }

    fn into_entry(self) -> RiskRegResult<ChangeLogEntry> {
        Ok(ChangeLogEntry {
            entity_type: decode_enum(TABLE, &self.entity_type)?,
            category: decode_enum(TABLE, &self.category)?,
            kind: decode_enum(TABLE, &self.kind)?,
            created_at: decode_ts(TABLE, &self.created_at)?,
            id: self.id,
            batch_id: self.batch_id,
            entity_id: self.entity_id,
            actor_id: self.actor_id,
            field_name: self.field_name,
            label_en: self.label_en,
            label_ar: self.label_ar,
            old_value: self.old_value,
            new_value: self.new_value,
            description_en: self.description_en,
            description_ar: self.description_ar,
        })
    }
}

/// Insert a batch of entries. Returns the number inserted.
pub fn append_entries(conn: &Connection, entries: &[ChangeLogEntry]) -> RiskRegResult<usize> {
    if entries.is_empty() {
        return Ok(0);
    }
    let mut stmt = conn
        .prepare_cached(&format!(
            "INSERT INTO change_log ({COLUMNS}) VALUES
             (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    for entry in entries {
        stmt.execute(params![
            entry.id,
            entry.batch_id,
            entry.entity_type.as_str(),
            entry.entity_id,
            entry.actor_id,
            entry.field_name,
            entry.label_en,
            entry.label_ar,
            entry.old_value,
            entry.new_value,
            entry.category.as_str(),
            entry.kind.as_str(),
            entry.description_en,
            entry.description_ar,
            encode_ts(&entry.created_at),
        ])
        .map_err(|e| to_storage_err(format!("append change log {}: {e}", entry.id)))?;
    }
    Ok(entries.len())
}

/// History of one subject in insertion order.
pub fn entries_for(conn: &Connection, subject: &EntityRef) -> RiskRegResult<Vec<ChangeLogEntry>> {
    let rows = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM change_log
             WHERE entity_type = ?1 AND entity_id = ?2
             ORDER BY rowid"
        ))
        .and_then(|mut stmt| {
            let rows = stmt
                .query_map(
                    params![subject.entity_type.as_str(), subject.id],
                    ChangeLogRow::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>();
            rows
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.into_iter().map(ChangeLogRow::into_entry).collect()
}

/// Remove the history of the given subjects. Only called by cascade deletes.
pub fn delete_for(conn: &Connection, entity_type: &str, ids: &[String]) -> RiskRegResult<usize> {
    let mut stmt = conn
        .prepare_cached("DELETE FROM change_log WHERE entity_type = ?1 AND entity_id = ?2")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut removed = 0;
    for id in ids {
        removed += stmt
            .execute(params![entity_type, id])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(removed)
}
