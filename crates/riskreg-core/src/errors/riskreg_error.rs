use std::fmt;

use super::error_code::{self, ErrorKind};
use super::{ConfigError, RatingError, StorageError};
use crate::models::{EntityType, Role};

/// Convenience alias used across the workspace.
pub type RiskRegResult<T> = Result<T, RiskRegError>;

/// Top-level error for every core operation.
#[derive(Debug, thiserror::Error)]
pub enum RiskRegError {
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityType, id: String },

    #[error("conflict: {reason}")]
    Conflict { reason: ConflictReason },

    #[error("actor {actor_id} ({role}) is not authorized: {reason}")]
    Authorization {
        actor_id: String,
        role: Role,
        reason: String,
    },

    #[error("persistence error: {0}")]
    Persistence(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("rating error: {0}")]
    Rating(#[from] RatingError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a state transition or write was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictReason {
    /// The change request already left `pending`.
    AlreadyResolved { request_id: String },
    /// Optimistic concurrency check failed; the row changed since it was read.
    StaleWrite { entity: EntityType, id: String },
    /// A task with steps has its status derived and cannot be set by hand.
    DerivedStatus { task_id: String },
    /// The entity is in a terminal state that forbids the requested change.
    TerminalState { entity: EntityType, id: String, state: String },
    /// An entity with this id already exists.
    Duplicate { entity: EntityType, id: String },
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyResolved { request_id } => {
                write!(f, "change request {request_id} already resolved")
            }
            Self::StaleWrite { entity, id } => write!(f, "stale write to {entity} {id}"),
            Self::DerivedStatus { task_id } => {
                write!(f, "task {task_id} status is derived from its steps")
            }
            Self::TerminalState { entity, id, state } => {
                write!(f, "{entity} {id} is {state}")
            }
            Self::Duplicate { entity, id } => write!(f, "{entity} {id} already exists"),
        }
    }
}

impl RiskRegError {
    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: EntityType, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn conflict(reason: ConflictReason) -> Self {
        Self::Conflict { reason }
    }

    pub fn unauthorized(actor_id: impl Into<String>, role: Role, reason: impl Into<String>) -> Self {
        Self::Authorization {
            actor_id: actor_id.into(),
            role,
            reason: reason.into(),
        }
    }

    /// The caller-facing error kind. Config, rating-table, and serialization
    /// failures surface as persistence-class failures since they are not
    /// caused by the request.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::OutOfRange { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Authorization { .. } => ErrorKind::Authorization,
            Self::Persistence(_) | Self::Config(_) | Self::Rating(_) | Self::Serialization(_) => {
                ErrorKind::Persistence
            }
        }
    }

    /// Stable machine-readable reason code.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => error_code::VALIDATION_FAILED,
            Self::OutOfRange { .. } => error_code::VALIDATION_OUT_OF_RANGE,
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::Conflict { reason } => match reason {
                ConflictReason::AlreadyResolved { .. } => error_code::CONFLICT_ALREADY_RESOLVED,
                ConflictReason::StaleWrite { .. } => error_code::CONFLICT_STALE_WRITE,
                ConflictReason::DerivedStatus { .. } => error_code::CONFLICT_DERIVED_STATUS,
                ConflictReason::TerminalState { .. } => error_code::CONFLICT_TERMINAL_STATE,
                ConflictReason::Duplicate { .. } => error_code::CONFLICT_DUPLICATE,
            },
            Self::Authorization { .. } => error_code::AUTHORIZATION_DENIED,
            Self::Persistence(_) => error_code::PERSISTENCE_FAILED,
            Self::Config(_) => error_code::CONFIG_INVALID,
            Self::Rating(_) => error_code::RATING_TABLE_INVALID,
            Self::Serialization(_) => error_code::SERIALIZATION_FAILED,
        }
    }

    /// True when the request lost a race against another writer.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

