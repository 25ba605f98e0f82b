//! BEGIN IMMEDIATE transactions on the writer connection.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use riskreg_core::errors::RiskRegResult;

use crate::to_storage_err;

/// Run `f` inside a `BEGIN IMMEDIATE` transaction.
///
/// The write lock is taken at transaction start, so a concurrent writer on
/// another connection waits on busy_timeout instead of failing mid-way.
/// Any error from `f` drops the transaction, which rolls it back.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> RiskRegResult<T>
where
    F: FnOnce(&Transaction<'_>) -> RiskRegResult<T>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| to_storage_err(format!("failed to begin immediate transaction: {e}")))?;

    let result = f(&tx)?;

    tx.commit()
        .map_err(|e| to_storage_err(format!("failed to commit: {e}")))?;
    Ok(result)
}
