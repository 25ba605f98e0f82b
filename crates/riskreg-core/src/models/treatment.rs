use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::{FieldMap, FieldValue, Snapshot, TrackedField};
use super::{EntityRef, PlanStatus, StepStatus, TaskStatus};

/// How a plan treats its risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentStrategy {
    Avoid,
    Mitigate,
    Transfer,
    Accept,
}

impl TreatmentStrategy {
    pub const ALL: [TreatmentStrategy; 4] = [
        TreatmentStrategy::Avoid,
        TreatmentStrategy::Mitigate,
        TreatmentStrategy::Transfer,
        TreatmentStrategy::Accept,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Avoid => "avoid",
            Self::Mitigate => "mitigate",
            Self::Transfer => "transfer",
            Self::Accept => "accept",
        }
    }
}

impl fmt::Display for TreatmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TreatmentStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown treatment strategy: {s}"))
    }
}

/// Mitigation plan attached to exactly one risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentPlan {
    pub id: String,
    pub risk_id: String,
    pub title_en: String,
    pub title_ar: String,
    pub strategy: TreatmentStrategy,
    /// Derived from tasks, except for the sticky `Cancelled`.
    pub status: PlanStatus,
    /// Percentage of completed tasks, 0..=100.
    pub progress: u8,
    /// A plan without a due date never becomes overdue.
    pub due_date: Option<DateTime<Utc>>,
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

impl Snapshot for TreatmentPlan {
    fn entity_ref(&self) -> EntityRef {
        EntityRef::plan(&self.id)
    }

    fn snapshot(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert(TrackedField::TitleEn, FieldValue::from(&self.title_en));
        map.insert(TrackedField::TitleAr, FieldValue::from(&self.title_ar));
        map.insert(TrackedField::Strategy, self.strategy.as_str().into());
        map.insert(TrackedField::Status, self.status.as_str().into());
        map.insert(TrackedField::Progress, self.progress.into());
        map.insert(TrackedField::DueDate, self.due_date.into());
        map.insert(TrackedField::OwnerId, FieldValue::from(&self.owner_id));
        map
    }
}

/// Unit of work under a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentTask {
    pub id: String,
    pub plan_id: String,
    pub title_en: String,
    pub title_ar: String,
    /// Ordering within the plan.
    pub position: u32,
    /// Derived from steps when the task has any; manual otherwise.
    pub status: TaskStatus,
    pub assignee_id: Option<String>,
    pub version: i64,
}

impl Snapshot for TreatmentTask {
    fn entity_ref(&self) -> EntityRef {
        EntityRef::task(&self.id)
    }

    fn snapshot(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert(TrackedField::TitleEn, FieldValue::from(&self.title_en));
        map.insert(TrackedField::TitleAr, FieldValue::from(&self.title_ar));
        map.insert(TrackedField::Position, self.position.into());
        map.insert(TrackedField::Status, self.status.as_str().into());
        map.insert(TrackedField::AssigneeId, FieldValue::from(&self.assignee_id));
        map
    }
}

/// Finest-grained progress unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStep {
    pub id: String,
    pub task_id: String,
    pub title_en: String,
    pub title_ar: String,
    pub position: u32,
    pub status: StepStatus,
    pub version: i64,
}

impl Snapshot for TaskStep {
    fn entity_ref(&self) -> EntityRef {
        EntityRef::step(&self.id)
    }

    fn snapshot(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert(TrackedField::TitleEn, FieldValue::from(&self.title_en));
        map.insert(TrackedField::TitleAr, FieldValue::from(&self.title_ar));
        map.insert(TrackedField::Position, self.position.into());
        map.insert(TrackedField::Status, self.status.as_str().into());
        map
    }
}
