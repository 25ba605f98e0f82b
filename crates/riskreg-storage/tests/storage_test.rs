//! StorageEngine round trips, optimistic writes, and cascading deletes.

use chrono::Duration;
use riskreg_core::errors::{ConflictReason, ErrorKind, RiskRegError};
use riskreg_core::models::{
    ChangeLogEntry, EntityRef, PlanStatus, Rating, RequestStatus, ResidualRiskChangeRequest,
    Resolution, Snapshot, TaskStatus,
};
use riskreg_core::traits::IRegisterStorage;
use riskreg_audit::ChangeRecorder;
use riskreg_storage::StorageEngine;
use test_fixtures::{fixed_now, plan, risk, step, task};

fn storage() -> StorageEngine {
    StorageEngine::open_in_memory().unwrap()
}

fn request(id: &str, risk_id: &str, status: RequestStatus) -> ResidualRiskChangeRequest {
    ResidualRiskChangeRequest {
        id: id.to_string(),
        risk_id: risk_id.to_string(),
        requester_id: "user-contributor".to_string(),
        current_likelihood: 2,
        current_impact: 3,
        current_score: 6,
        current_rating: Rating::Medium,
        proposed_likelihood: 4,
        proposed_impact: 4,
        proposed_score: 16,
        proposed_rating: Rating::High,
        justification: "new supplier audit findings".to_string(),
        status,
        reviewer_id: None,
        review_note: None,
        created_at: fixed_now(),
        reviewed_at: None,
    }
}

fn created_log(entity: &impl Snapshot) -> Vec<ChangeLogEntry> {
    let mut recorder = ChangeRecorder::new("user-admin", fixed_now());
    recorder.record_created(entity);
    recorder.into_entries()
}

#[test]
fn risk_round_trip_with_log() {
    let s = storage();
    let r = risk("r-1");
    let log = created_log(&r);
    s.create_risk(&r, &log).unwrap();

    assert_eq!(s.get_risk("r-1").unwrap(), Some(r));
    assert!(s.get_risk("missing").unwrap().is_none());

    let history = s.change_log_for(&EntityRef::risk("r-1")).unwrap();
    assert_eq!(history, log);
}

#[test]
fn update_bumps_version_and_rejects_stale_writes() {
    let s = storage();
    let r = risk("r-1");
    s.create_risk(&r, &[]).unwrap();

    let mut edited = r.clone();
    edited.title_en = "Renamed".to_string();
    s.update_risk(&edited, &[]).unwrap();
    let stored = s.get_risk("r-1").unwrap().unwrap();
    assert_eq!(stored.version, r.version + 1);
    assert_eq!(stored.title_en, "Renamed");

    // Second writer still holds the old version.
    let err = s.update_risk(&edited, &[]).unwrap_err();
    assert!(matches!(
        err,
        RiskRegError::Conflict { reason: ConflictReason::StaleWrite { .. } }
    ));
    assert_eq!(err.reason_code(), "CONFLICT_STALE_WRITE");

    let mut ghost = risk("ghost");
    ghost.version = 1;
    assert_eq!(s.update_risk(&ghost, &[]).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn failed_update_does_not_append_log() {
    let s = storage();
    let r = risk("r-1");
    s.create_risk(&r, &[]).unwrap();

    let mut stale = r.clone();
    stale.version = 99;
    stale.title_ar = "عنوان".to_string();
    let mut recorder = ChangeRecorder::new("u-1", fixed_now());
    recorder.record(&r, &stale);
    assert!(s.update_risk(&stale, recorder.entries()).is_err());
    assert!(s.change_log_for(&EntityRef::risk("r-1")).unwrap().is_empty());
}

#[test]
fn duplicates_and_orphans_are_typed() {
    let s = storage();
    s.create_risk(&risk("r-1"), &[]).unwrap();
    let err = s.create_risk(&risk("r-1"), &[]).unwrap_err();
    assert_eq!(err.reason_code(), "CONFLICT_DUPLICATE");

    let err = s.create_plan(&plan("p-1", "no-such-risk")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn treatment_tree_round_trip_and_ordering() {
    let s = storage();
    s.create_risk(&risk("r-1"), &[]).unwrap();
    let mut p = plan("p-1", "r-1");
    p.due_date = Some(fixed_now() + Duration::days(10));
    s.create_plan(&p).unwrap();
    s.create_task(&task("t-b", "p-1", 2)).unwrap();
    s.create_task(&task("t-a", "p-1", 1)).unwrap();
    s.create_step(&step("s-1", "t-a", 1)).unwrap();

    assert_eq!(s.get_plan("p-1").unwrap(), Some(p.clone()));
    assert_eq!(s.list_plans("r-1").unwrap(), vec![p]);
    let ids: Vec<_> = s.list_tasks("p-1").unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, ["t-a", "t-b"]);
    assert_eq!(s.list_steps("t-a").unwrap().len(), 1);
    assert!(s.list_steps("t-b").unwrap().is_empty());
}

#[test]
fn treatment_changes_commit_together() {
    let s = storage();
    s.create_risk(&risk("r-1"), &[]).unwrap();
    let p = plan("p-1", "r-1");
    s.create_plan(&p).unwrap();
    let t = task("t-1", "p-1", 1);
    s.create_task(&t).unwrap();

    let mut next_task = t.clone();
    next_task.status = TaskStatus::Completed;
    let mut stale_plan = p.clone();
    stale_plan.version = 7;
    stale_plan.status = PlanStatus::Completed;

    let err = s
        .save_treatment_changes(None, Some(&next_task), Some(&stale_plan), &[])
        .unwrap_err();
    assert!(err.is_conflict());
    // Task write rolled back with the plan conflict.
    assert_eq!(s.get_task("t-1").unwrap().unwrap().status, TaskStatus::NotStarted);

    let mut next_plan = p.clone();
    next_plan.status = PlanStatus::Completed;
    next_plan.progress = 100;
    s.save_treatment_changes(None, Some(&next_task), Some(&next_plan), &[])
        .unwrap();
    assert_eq!(s.get_task("t-1").unwrap().unwrap().version, 2);
    assert_eq!(s.get_plan("p-1").unwrap().unwrap().progress, 100);
}

#[test]
fn resolve_is_a_one_shot_conditional_update() {
    let s = storage();
    let r = risk("r-1");
    s.create_risk(&r, &[]).unwrap();
    s.insert_change_request(&request("cr-1", "r-1", RequestStatus::Pending), None, &[])
        .unwrap();

    let resolution = Resolution {
        request_id: "cr-1".to_string(),
        status: RequestStatus::Rejected,
        reviewer_id: "user-risk_manager".to_string(),
        note: Some("insufficient evidence".to_string()),
        reviewed_at: fixed_now(),
    };
    s.resolve_change_request(&resolution, None, &[]).unwrap();

    let stored = s.get_change_request("cr-1").unwrap().unwrap();
    assert_eq!(stored.status, RequestStatus::Rejected);
    assert_eq!(stored.reviewer_id.as_deref(), Some("user-risk_manager"));
    assert_eq!(stored.reviewed_at, Some(fixed_now()));

    let again = Resolution {
        status: RequestStatus::Approved,
        ..resolution
    };
    let err = s.resolve_change_request(&again, Some(&r), &[]).unwrap_err();
    assert_eq!(err.reason_code(), "CONFLICT_ALREADY_RESOLVED");
    // The risk write in the losing call never happened.
    assert_eq!(s.get_risk("r-1").unwrap().unwrap().version, r.version);

    let missing = Resolution {
        request_id: "cr-404".to_string(),
        ..again
    };
    assert_eq!(
        s.resolve_change_request(&missing, None, &[]).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn list_requests_filters_by_status() {
    let s = storage();
    s.create_risk(&risk("r-1"), &[]).unwrap();
    s.insert_change_request(&request("cr-1", "r-1", RequestStatus::Pending), None, &[])
        .unwrap();
    s.insert_change_request(&request("cr-2", "r-1", RequestStatus::AutoApproved), None, &[])
        .unwrap();

    assert_eq!(s.list_change_requests("r-1", None).unwrap().len(), 2);
    let pending = s
        .list_change_requests("r-1", Some(RequestStatus::Pending))
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, "cr-1");
}

#[test]
fn deleting_a_risk_removes_its_tree_and_history() {
    let s = storage();
    let r = risk("r-1");
    s.create_risk(&r, &created_log(&r)).unwrap();
    s.create_risk(&risk("r-2"), &[]).unwrap();
    let p = plan("p-1", "r-1");
    s.create_plan(&p).unwrap();
    s.append_change_log(&created_log(&p)).unwrap();
    s.create_task(&task("t-1", "p-1", 1)).unwrap();
    s.create_task(&task("t-2", "p-1", 2)).unwrap();
    s.create_step(&step("s-1", "t-1", 1)).unwrap();
    s.insert_change_request(&request("cr-1", "r-1", RequestStatus::Pending), None, &[])
        .unwrap();
    s.create_plan(&plan("p-2", "r-2")).unwrap();

    let summary = s.delete_with_children(&EntityRef::risk("r-1")).unwrap();
    assert_eq!(summary.risks, 1);
    assert_eq!(summary.plans, 1);
    assert_eq!(summary.tasks, 2);
    assert_eq!(summary.steps, 1);
    assert_eq!(summary.change_requests, 1);
    assert!(summary.change_log_entries > 0);

    assert!(s.get_risk("r-1").unwrap().is_none());
    assert!(s.get_task("t-2").unwrap().is_none());
    assert!(s.change_log_for(&EntityRef::plan("p-1")).unwrap().is_empty());
    // Unrelated risk untouched.
    assert_eq!(s.list_plans("r-2").unwrap().len(), 1);

    let err = s.delete_with_children(&EntityRef::risk("r-1")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn deleting_a_task_keeps_its_plan() {
    let s = storage();
    s.create_risk(&risk("r-1"), &[]).unwrap();
    s.create_plan(&plan("p-1", "r-1")).unwrap();
    s.create_task(&task("t-1", "p-1", 1)).unwrap();
    s.create_step(&step("s-1", "t-1", 1)).unwrap();
    s.create_step(&step("s-2", "t-1", 2)).unwrap();

    let summary = s.delete_with_children(&EntityRef::task("t-1")).unwrap();
    assert_eq!((summary.tasks, summary.steps, summary.plans), (1, 2, 0));
    assert_eq!(summary.total(), 3);
    assert!(s.get_plan("p-1").unwrap().is_some());
}
