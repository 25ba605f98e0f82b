use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityRef, EntityType};

/// Static grouping of fields for filtering history views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCategory {
    Info,
    Assessment,
    Status,
    Ownership,
    Treatment,
}

impl ChangeCategory {
    pub const ALL: [ChangeCategory; 5] = [
        ChangeCategory::Info,
        ChangeCategory::Assessment,
        ChangeCategory::Status,
        ChangeCategory::Ownership,
        ChangeCategory::Treatment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Assessment => "assessment",
            Self::Status => "status",
            Self::Ownership => "ownership",
            Self::Treatment => "treatment",
        }
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown change category: {s}"))
    }
}

/// Shape of a single field change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Old value was empty.
    Added,
    /// New value is empty.
    Removed,
    /// Both values present and different.
    Changed,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 3] = [ChangeKind::Added, ChangeKind::Removed, ChangeKind::Changed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
        }
    }
}

impl FromStr for ChangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown change kind: {s}"))
    }
}

/// Immutable, field-level audit record. Never updated; only removed when
/// its subject entity is deleted with its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub id: String,
    /// Groups all entries written by one operation.
    pub batch_id: String,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub actor_id: String,
    pub field_name: String,
    pub label_en: String,
    pub label_ar: String,
    pub old_value: String,
    pub new_value: String,
    pub category: ChangeCategory,
    pub kind: ChangeKind,
    pub description_en: String,
    pub description_ar: String,
    pub created_at: DateTime<Utc>,
}

impl ChangeLogEntry {
    pub fn subject(&self) -> EntityRef {
        EntityRef::new(self.entity_type, &self.entity_id)
    }
}
