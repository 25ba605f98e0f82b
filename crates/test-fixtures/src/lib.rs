//! Shared test data for the riskreg workspace.
//!
//! Entity builders with stable ids and timestamps, plus typed loaders for the
//! golden JSON scenarios under `golden/`.

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use riskreg_core::models::{
    ActorContext, NewRisk, PlanStatus, Rating, RatingDomain, Risk, RiskAssessment, Role,
    StepStatus, TaskStatus, TaskStep, TreatmentPlan, TreatmentStrategy, TreatmentTask,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

// --- Golden scenarios ---

/// Root directory of the golden datasets.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// Plan roll-up case: task statuses in, plan status and progress out.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRollupCase {
    pub name: String,
    pub now: DateTime<Utc>,
    pub plan_status: PlanStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub task_statuses: Vec<TaskStatus>,
    pub expected_status: PlanStatus,
    pub expected_progress: u8,
}

/// Task roll-up case: step statuses in, task status out.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRollupCase {
    pub name: String,
    pub task_status: TaskStatus,
    pub step_statuses: Vec<StepStatus>,
    pub expected_status: TaskStatus,
}

/// Rating case under the compiled-in default tables.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingCase {
    pub domain: RatingDomain,
    pub likelihood: u8,
    pub impact: u8,
    pub expected_score: u8,
    pub expected_rating: Rating,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RollupScenarios {
    pub plans: Vec<PlanRollupCase>,
    pub tasks: Vec<TaskRollupCase>,
}

pub fn rollup_scenarios() -> RollupScenarios {
    load_fixture("rollup/scenarios.json")
}

pub fn rating_cases() -> Vec<RatingCase> {
    load_fixture("rating/default_tables.json")
}

// --- Entity builders ---

/// Fixed clock used by builders: 2026-03-01T09:00:00Z.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("fixed timestamp is unambiguous"))
}

pub fn actor(role: Role) -> ActorContext {
    ActorContext::new(format!("user-{}", role.as_str()), role)
}

/// Risk with inherent 3×4 (high) and residual 2×3 (medium).
pub fn risk(id: &str) -> Risk {
    Risk {
        id: id.to_string(),
        title_en: "Vendor outage".to_string(),
        title_ar: "انقطاع المورد".to_string(),
        description_en: "Primary hosting vendor becomes unavailable".to_string(),
        description_ar: "تعطل مزود الاستضافة الرئيسي".to_string(),
        department_id: "dept-it".to_string(),
        owner_id: Some("user-owner".to_string()),
        inherent: RiskAssessment {
            likelihood: 3,
            impact: 4,
            score: 12,
            rating: Rating::High,
        },
        residual: RiskAssessment {
            likelihood: 2,
            impact: 3,
            score: 6,
            rating: Rating::Medium,
        },
        created_at: fixed_now(),
        updated_at: fixed_now(),
        version: 1,
    }
}

pub fn new_risk() -> NewRisk {
    NewRisk {
        title_en: "Data centre flood".to_string(),
        title_ar: "غرق مركز البيانات".to_string(),
        description_en: String::new(),
        description_ar: String::new(),
        department_id: "dept-ops".to_string(),
        owner_id: None,
        inherent_likelihood: 4,
        inherent_impact: 5,
        residual_likelihood: None,
        residual_impact: None,
    }
}

pub fn plan(id: &str, risk_id: &str) -> TreatmentPlan {
    TreatmentPlan {
        id: id.to_string(),
        risk_id: risk_id.to_string(),
        title_en: "Secondary hosting".to_string(),
        title_ar: "استضافة احتياطية".to_string(),
        strategy: TreatmentStrategy::Mitigate,
        status: PlanStatus::NotStarted,
        progress: 0,
        due_date: None,
        owner_id: Some("user-owner".to_string()),
        created_at: fixed_now(),
        updated_at: fixed_now(),
        version: 1,
    }
}

pub fn task(id: &str, plan_id: &str, position: u32) -> TreatmentTask {
    TreatmentTask {
        id: id.to_string(),
        plan_id: plan_id.to_string(),
        title_en: format!("Task {position}"),
        title_ar: format!("المهمة {position}"),
        position,
        status: TaskStatus::NotStarted,
        assignee_id: None,
        version: 1,
    }
}

pub fn step(id: &str, task_id: &str, position: u32) -> TaskStep {
    TaskStep {
        id: id.to_string(),
        task_id: task_id.to_string(),
        title_en: format!("Step {position}"),
        title_ar: format!("الخطوة {position}"),
        position,
        status: StepStatus::NotStarted,
        version: 1,
    }
}

/// Tasks `{plan_id}-t{n}` with the given statuses, positions from 1.
pub fn tasks_with(plan_id: &str, statuses: &[TaskStatus]) -> Vec<TreatmentTask> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let position = i as u32 + 1;
            let mut t = task(&format!("{plan_id}-t{position}"), plan_id, position);
            t.status = *status;
            t
        })
        .collect()
}

/// Steps `{task_id}-s{n}` with the given statuses, positions from 1.
pub fn steps_with(task_id: &str, statuses: &[StepStatus]) -> Vec<TaskStep> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let position = i as u32 + 1;
            let mut s = step(&format!("{task_id}-s{position}"), task_id, position);
            s.status = *status;
            s
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "golden directory not found");
    }

    #[test]
    fn rollup_scenarios_load() {
        let scenarios = rollup_scenarios();
        assert!(!scenarios.plans.is_empty());
        assert!(!scenarios.tasks.is_empty());
    }

    #[test]
    fn every_fixture_parses_as_json() {
        for dir in ["rollup", "rating"] {
            for path in list_fixtures(dir) {
                let content = std::fs::read_to_string(&path).unwrap();
                let _: serde_json::Value = serde_json::from_str(&content)
                    .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
            }
        }
    }

    #[test]
    fn builders_are_consistent() {
        let r = risk("r-1");
        assert_eq!(r.inherent.score, r.inherent.likelihood * r.inherent.impact);
        assert_eq!(r.residual.score, r.residual.likelihood * r.residual.impact);
        let tasks = tasks_with("p-1", &[TaskStatus::Completed, TaskStatus::NotStarted]);
        assert_eq!(tasks[1].id, "p-1-t2");
        assert_eq!(tasks[1].position, 2);
    }
}
