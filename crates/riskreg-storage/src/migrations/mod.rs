//! Versioned schema migrations, tracked in `schema_version`.

pub mod v001_risks;
pub mod v002_treatment;
pub mod v003_change_requests;
pub mod v004_change_log;

use rusqlite::{params, Connection, OptionalExtension};

use riskreg_core::errors::{RiskRegResult, StorageError};

use crate::pool::with_immediate_transaction;
use crate::to_storage_err;

/// Ordered (version, sql) pairs.
const MIGRATIONS: &[(u32, &str)] = &[
    (1, v001_risks::MIGRATION_SQL),
    (2, v002_treatment::MIGRATION_SQL),
    (3, v003_change_requests::MIGRATION_SQL),
    (4, v004_change_log::MIGRATION_SQL),
];

/// Highest schema version this build knows about.
pub const LATEST_VERSION: u32 = 4;

/// Current schema version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> RiskRegResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        ) STRICT;",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let version: Option<u32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .flatten();
    Ok(version.unwrap_or(0))
}

/// Apply every pending migration, each in its own transaction.
/// Returns the number of migrations applied.
pub fn run_migrations(conn: &Connection) -> RiskRegResult<usize> {
    let current = current_version(conn)?;
    let mut applied = 0;

    for &(version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        with_immediate_transaction(conn, |tx| {
            tx.execute_batch(sql).map_err(|e| StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
            tx.execute(
                "INSERT INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
                params![version],
            )
            .map_err(|e| StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
            Ok(())
        })?;
        tracing::debug!(version, "applied migration");
        applied += 1;
    }

    Ok(applied)
}
