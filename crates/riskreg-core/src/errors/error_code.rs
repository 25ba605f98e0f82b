//! Stable, machine-readable error classification.

use serde::{Deserialize, Serialize};

pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const VALIDATION_OUT_OF_RANGE: &str = "VALIDATION_OUT_OF_RANGE";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const CONFLICT_ALREADY_RESOLVED: &str = "CONFLICT_ALREADY_RESOLVED";
pub const CONFLICT_STALE_WRITE: &str = "CONFLICT_STALE_WRITE";
pub const CONFLICT_DERIVED_STATUS: &str = "CONFLICT_DERIVED_STATUS";
pub const CONFLICT_TERMINAL_STATE: &str = "CONFLICT_TERMINAL_STATE";
pub const CONFLICT_DUPLICATE: &str = "CONFLICT_DUPLICATE";
pub const AUTHORIZATION_DENIED: &str = "AUTHORIZATION_DENIED";
pub const PERSISTENCE_FAILED: &str = "PERSISTENCE_FAILED";
pub const CONFIG_INVALID: &str = "CONFIG_INVALID";
pub const RATING_TABLE_INVALID: &str = "RATING_TABLE_INVALID";
pub const SERIALIZATION_FAILED: &str = "SERIALIZATION_FAILED";

/// Coarse error kind handed to callers for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Authorization,
    Persistence,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Authorization => "authorization",
            Self::Persistence => "persistence",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
