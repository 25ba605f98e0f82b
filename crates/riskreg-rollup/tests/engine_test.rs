//! TreatmentEngine over in-memory SQLite storage.

use std::sync::Arc;

use chrono::Duration;
use riskreg_core::config::WorkflowConfig;
use riskreg_core::errors::{ConflictReason, ErrorKind, RiskRegError};
use riskreg_core::models::{EntityRef, PlanStatus, Role, StepStatus, TaskStatus};
use riskreg_core::traits::IRegisterStorage;
use riskreg_rollup::TreatmentEngine;
use riskreg_storage::StorageEngine;
use test_fixtures::{actor, fixed_now, plan, risk, step, task};

/// Risk r-1 → plan p-1 with tasks t-1 (two steps), t-2, t-3.
fn seeded() -> TreatmentEngine<StorageEngine> {
    let storage = StorageEngine::open_in_memory().unwrap();
    storage.create_risk(&risk("r-1"), &[]).unwrap();
    let mut p = plan("p-1", "r-1");
    p.due_date = Some(fixed_now() + Duration::days(30));
    storage.create_plan(&p).unwrap();
    for (i, id) in ["t-1", "t-2", "t-3"].iter().enumerate() {
        storage.create_task(&task(id, "p-1", i as u32 + 1)).unwrap();
    }
    storage.create_step(&step("s-1", "t-1", 1)).unwrap();
    storage.create_step(&step("s-2", "t-1", 2)).unwrap();
    TreatmentEngine::new(Arc::new(storage), WorkflowConfig::default())
}

#[test]
fn completing_steps_rolls_up_to_plan() {
    let engine = seeded();
    let editor = actor(Role::Contributor);
    let now = fixed_now();

    let first = engine
        .set_step_status(&editor, "s-1", StepStatus::Completed, now)
        .unwrap();
    assert_eq!(first.task.as_ref().unwrap().status, TaskStatus::InProgress);
    assert_eq!(first.plan.status, PlanStatus::InProgress);
    assert_eq!(first.plan.progress, 0);

    let second = engine
        .set_step_status(&editor, "s-2", StepStatus::Completed, now)
        .unwrap();
    assert_eq!(second.task.as_ref().unwrap().status, TaskStatus::Completed);
    assert_eq!(second.plan.status, PlanStatus::InProgress);
    assert_eq!(second.plan.progress, 33);
    assert!(second.plan_changed());

    // step status + task status + plan progress
    let fields: Vec<_> = second.log.iter().map(|e| e.field_name.as_str()).collect();
    assert_eq!(fields, ["status", "status", "progress"]);
    assert!(second.log.iter().all(|e| e.batch_id == second.log[0].batch_id));

    let stored = engine.storage().get_plan("p-1").unwrap().unwrap();
    assert_eq!(stored, second.plan);
    assert_eq!(stored.version, 3);
}

#[test]
fn repeating_a_status_writes_nothing() {
    let engine = seeded();
    let editor = actor(Role::Contributor);
    engine
        .set_step_status(&editor, "s-1", StepStatus::InProgress, fixed_now())
        .unwrap();
    let again = engine
        .set_step_status(&editor, "s-1", StepStatus::InProgress, fixed_now())
        .unwrap();
    assert!(again.is_noop());
    assert!(again.log.is_empty());
}

#[test]
fn manual_task_status_only_without_steps() {
    let engine = seeded();
    let editor = actor(Role::RiskChampion);

    let err = engine
        .set_task_status(&editor, "t-1", TaskStatus::Completed, fixed_now())
        .unwrap_err();
    assert!(matches!(
        err,
        RiskRegError::Conflict { reason: ConflictReason::DerivedStatus { ref task_id } } if task_id == "t-1"
    ));

    let outcome = engine
        .set_task_status(&editor, "t-2", TaskStatus::Completed, fixed_now())
        .unwrap();
    assert_eq!(outcome.plan.status, PlanStatus::InProgress);
    assert_eq!(outcome.plan.progress, 33);
}

#[test]
fn past_due_plan_becomes_overdue_on_refresh() {
    let engine = seeded();
    let editor = actor(Role::Contributor);
    engine
        .set_task_status(&editor, "t-2", TaskStatus::Completed, fixed_now())
        .unwrap();

    let later = fixed_now() + Duration::days(31);
    let refreshed = engine.refresh_plan(&editor, "p-1", later).unwrap();
    assert_eq!(refreshed.plan.status, PlanStatus::Overdue);
    assert_eq!(refreshed.plan.updated_at, later);
    assert_eq!(refreshed.changed, vec![EntityRef::plan("p-1")]);

    assert!(engine.refresh_plan(&editor, "p-1", later).unwrap().is_noop());
}

#[test]
fn cancellation_is_sticky_and_privileged() {
    let engine = seeded();
    let now = fixed_now();

    let err = engine.cancel_plan(&actor(Role::Contributor), "p-1", now).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    let manager = actor(Role::RiskManager);
    let cancelled = engine.cancel_plan(&manager, "p-1", now).unwrap();
    assert_eq!(cancelled.plan.status, PlanStatus::Cancelled);
    assert_eq!(cancelled.log.len(), 1);

    assert!(engine.cancel_plan(&manager, "p-1", now).unwrap().is_noop());

    for id in ["t-2", "t-3"] {
        engine
            .set_task_status(&manager, id, TaskStatus::Completed, now)
            .unwrap();
    }
    let outcome = engine
        .set_step_status(&manager, "s-1", StepStatus::Completed, now)
        .unwrap();
    assert_eq!(outcome.plan.status, PlanStatus::Cancelled);
    assert!(!outcome.plan_changed());
    assert_eq!(
        engine.storage().get_plan("p-1").unwrap().unwrap().status,
        PlanStatus::Cancelled
    );
}

#[test]
fn completed_plan_cannot_be_cancelled() {
    let engine = seeded();
    let admin = actor(Role::Admin);
    let now = fixed_now();
    engine.set_step_status(&admin, "s-1", StepStatus::Completed, now).unwrap();
    engine.set_step_status(&admin, "s-2", StepStatus::Completed, now).unwrap();
    engine.set_task_status(&admin, "t-2", TaskStatus::Completed, now).unwrap();
    let done = engine.set_task_status(&admin, "t-3", TaskStatus::Completed, now).unwrap();
    assert_eq!(done.plan.status, PlanStatus::Completed);
    assert_eq!(done.plan.progress, 100);

    let err = engine.cancel_plan(&admin, "p-1", now).unwrap_err();
    assert_eq!(err.reason_code(), "CONFLICT_TERMINAL_STATE");
}

#[test]
fn viewers_cannot_mutate() {
    let engine = seeded();
    let err = engine
        .set_step_status(&actor(Role::Viewer), "s-1", StepStatus::Completed, fixed_now())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
}

#[test]
fn missing_entities_are_not_found() {
    let engine = seeded();
    let editor = actor(Role::Contributor);
    let err = engine
        .set_step_status(&editor, "nope", StepStatus::Completed, fixed_now())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        engine.refresh_plan(&editor, "nope", fixed_now()).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}
