//! # riskreg-storage
//!
//! SQLite implementation of `IRegisterStorage`. One serialized writer
//! connection plus a round-robin read pool, WAL mode, versioned migrations,
//! and `BEGIN IMMEDIATE` transactions around every multi-row write.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use riskreg_core::errors::{RiskRegError, StorageError};

/// Helper to convert a message into a persistence error.
pub(crate) fn to_storage_err(msg: impl Into<String>) -> RiskRegError {
    RiskRegError::Persistence(StorageError::SqliteError {
        message: msg.into(),
    })
}
