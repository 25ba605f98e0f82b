//! Connection management: write-serialized + read-pooled.

pub mod pragmas;
pub mod read_pool;
pub mod transaction;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;

use riskreg_core::config::StorageConfig;
use riskreg_core::errors::RiskRegResult;

pub use read_pool::ReadPool;
pub use transaction::with_immediate_transaction;

use self::pragmas::apply_pragmas;
use crate::to_storage_err;

/// Manages the single write connection and the read connection pool.
///
/// In-memory databases have no read pool: separate in-memory connections
/// would be separate databases, so reads go through the writer.
pub struct ConnectionPool {
    writer: Mutex<Connection>,
    readers: Option<ReadPool>,
    db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open the writer for a database file. The read pool is attached by
    /// `attach_readers` once migrations have created the schema.
    pub fn open(path: &Path, config: &StorageConfig) -> RiskRegResult<Self> {
        let writer = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&writer, config.busy_timeout_ms)?;
        Ok(Self {
            writer: Mutex::new(writer),
            readers: None,
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> RiskRegResult<Self> {
        let writer = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&writer, 0)?;
        Ok(Self {
            writer: Mutex::new(writer),
            readers: None,
            db_path: None,
        })
    }

    /// Open the read pool for a file-backed database. No-op in memory.
    pub fn attach_readers(&mut self, config: &StorageConfig) -> RiskRegResult<()> {
        if let Some(path) = &self.db_path {
            self.readers = Some(ReadPool::open(
                path,
                config.read_pool_size,
                config.busy_timeout_ms,
            )?);
        }
        Ok(())
    }

    /// Execute an operation on the serialized writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> RiskRegResult<T>
    where
        F: FnOnce(&Connection) -> RiskRegResult<T>,
    {
        let guard = self
            .writer
            .lock()
            .map_err(|e| to_storage_err(format!("write lock poisoned: {e}")))?;
        f(&guard)
    }

    /// Execute a read on the pool when present, otherwise on the writer.
    pub fn with_reader<F, T>(&self, f: F) -> RiskRegResult<T>
    where
        F: FnOnce(&Connection) -> RiskRegResult<T>,
    {
        match &self.readers {
            Some(readers) => readers.with_conn(f),
            None => self.with_writer(f),
        }
    }

    pub fn read_pool_size(&self) -> usize {
        self.readers.as_ref().map_or(0, ReadPool::size)
    }

    /// Database file path (None for in-memory).
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }
}
