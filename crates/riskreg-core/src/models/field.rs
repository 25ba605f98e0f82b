//! Field-level snapshots consumed by the change audit recorder.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::EntityRef;

/// Every field the audit recorder knows how to label and categorize.
/// The wire name (`as_str`) is what lands in `ChangeLogEntry::field_name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackedField {
    TitleEn,
    TitleAr,
    DescriptionEn,
    DescriptionAr,
    DepartmentId,
    OwnerId,
    AssigneeId,
    InherentLikelihood,
    InherentImpact,
    InherentScore,
    InherentRating,
    ResidualLikelihood,
    ResidualImpact,
    ResidualScore,
    ResidualRating,
    Status,
    Progress,
    Strategy,
    DueDate,
    Position,
    ReviewerId,
    ReviewNote,
}

impl TrackedField {
    pub const ALL: [TrackedField; 22] = [
        TrackedField::TitleEn,
        TrackedField::TitleAr,
        TrackedField::DescriptionEn,
        TrackedField::DescriptionAr,
        TrackedField::DepartmentId,
        TrackedField::OwnerId,
        TrackedField::AssigneeId,
        TrackedField::InherentLikelihood,
        TrackedField::InherentImpact,
        TrackedField::InherentScore,
        TrackedField::InherentRating,
        TrackedField::ResidualLikelihood,
        TrackedField::ResidualImpact,
        TrackedField::ResidualScore,
        TrackedField::ResidualRating,
        TrackedField::Status,
        TrackedField::Progress,
        TrackedField::Strategy,
        TrackedField::DueDate,
        TrackedField::Position,
        TrackedField::ReviewerId,
        TrackedField::ReviewNote,
    ];

    /// The residual assessment fields, which only change through a change request.
    pub const RESIDUAL: [TrackedField; 4] = [
        TrackedField::ResidualLikelihood,
        TrackedField::ResidualImpact,
        TrackedField::ResidualScore,
        TrackedField::ResidualRating,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TitleEn => "titleEn",
            Self::TitleAr => "titleAr",
            Self::DescriptionEn => "descriptionEn",
            Self::DescriptionAr => "descriptionAr",
            Self::DepartmentId => "departmentId",
            Self::OwnerId => "ownerId",
            Self::AssigneeId => "assigneeId",
            Self::InherentLikelihood => "inherentLikelihood",
            Self::InherentImpact => "inherentImpact",
            Self::InherentScore => "inherentScore",
            Self::InherentRating => "inherentRating",
            Self::ResidualLikelihood => "residualLikelihood",
            Self::ResidualImpact => "residualImpact",
            Self::ResidualScore => "residualScore",
            Self::ResidualRating => "residualRating",
            Self::Status => "status",
            Self::Progress => "progress",
            Self::Strategy => "strategy",
            Self::DueDate => "dueDate",
            Self::Position => "position",
            Self::ReviewerId => "reviewerId",
            Self::ReviewNote => "reviewNote",
        }
    }

    pub fn is_residual(self) -> bool {
        Self::RESIDUAL.contains(&self)
    }
}

impl fmt::Display for TrackedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackedField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown tracked field: {s}"))
    }
}

/// A single field value in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Stringified form stored in the change log. Null renders as the
    /// empty string, which the recorder treats as "no value".
    pub fn render(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Timestamp(t) => t.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.render().is_empty()
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<Option<String>> for FieldValue {
    fn from(s: Option<String>) -> Self {
        s.map_or(Self::Null, Self::Text)
    }
}

impl From<&Option<String>> for FieldValue {
    fn from(s: &Option<String>) -> Self {
        s.as_ref().map_or(Self::Null, |v| Self::Text(v.clone()))
    }
}

impl From<u8> for FieldValue {
    fn from(n: u8) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Timestamp(t)
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue {
    fn from(t: Option<DateTime<Utc>>) -> Self {
        t.map_or(Self::Null, Self::Timestamp)
    }
}

/// Field name → value map for one entity at one point in time.
pub type FieldMap = BTreeMap<TrackedField, FieldValue>;

/// Entities that can be diffed by the audit recorder.
pub trait Snapshot {
    /// The entity this snapshot describes.
    fn entity_ref(&self) -> EntityRef;

    /// All tracked fields of the entity with their current values.
    fn snapshot(&self) -> FieldMap;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn null_and_empty_text_render_identically() {
        assert_eq!(FieldValue::Null.render(), "");
        assert_eq!(FieldValue::from("").render(), "");
        assert!(FieldValue::from(None::<String>).is_empty());
    }

    #[test]
    fn timestamps_render_as_rfc3339_seconds() {
        let t = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();
        assert_eq!(FieldValue::from(t).render(), "2025-03-01T08:30:00Z");
    }

    #[test]
    fn sub_second_timestamps_keep_their_fraction() {
        let t = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();
        let later = t + chrono::Duration::milliseconds(250);
        assert_eq!(FieldValue::from(later).render(), "2025-03-01T08:30:00.250Z");
        assert_ne!(FieldValue::from(t).render(), FieldValue::from(later).render());
    }

    #[test]
    fn wire_names_round_trip() {
        for field in TrackedField::ALL {
            assert_eq!(field.as_str().parse::<TrackedField>().unwrap(), field);
        }
    }
}
