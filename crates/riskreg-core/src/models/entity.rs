use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kinds of entities the core mutates and audits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Risk,
    TreatmentPlan,
    TreatmentTask,
    TaskStep,
    ChangeRequest,
}

impl EntityType {
    pub const ALL: [EntityType; 5] = [
        EntityType::Risk,
        EntityType::TreatmentPlan,
        EntityType::TreatmentTask,
        EntityType::TaskStep,
        EntityType::ChangeRequest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Risk => "risk",
            Self::TreatmentPlan => "treatment_plan",
            Self::TreatmentTask => "treatment_task",
            Self::TaskStep => "task_step",
            Self::ChangeRequest => "change_request",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("unknown entity type: {s}"))
    }
}

/// Weak reference to an entity: lookup only, never ownership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub entity_type: EntityType,
    pub id: String,
}

impl EntityRef {
    pub fn new(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self {
            entity_type,
            id: id.into(),
        }
    }

    pub fn risk(id: impl Into<String>) -> Self {
        Self::new(EntityType::Risk, id)
    }

    pub fn plan(id: impl Into<String>) -> Self {
        Self::new(EntityType::TreatmentPlan, id)
    }

    pub fn task(id: impl Into<String>) -> Self {
        Self::new(EntityType::TreatmentTask, id)
    }

    pub fn step(id: impl Into<String>) -> Self {
        Self::new(EntityType::TaskStep, id)
    }

    pub fn change_request(id: impl Into<String>) -> Self {
        Self::new(EntityType::ChangeRequest, id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.id)
    }
}

/// Row counts removed by an explicit cascading delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSummary {
    pub risks: usize,
    pub plans: usize,
    pub tasks: usize,
    pub steps: usize,
    pub change_requests: usize,
    pub change_log_entries: usize,
}

impl DeleteSummary {
    pub fn total(&self) -> usize {
        self.risks
            + self.plans
            + self.tasks
            + self.steps
            + self.change_requests
            + self.change_log_entries
    }
}
