use riskreg_core::models::*;

#[test]
fn status_wire_names_match_persisted_values() {
    assert_eq!(
        serde_json::to_string(&TaskStatus::NotStarted).unwrap(),
        "\"notStarted\""
    );
    assert_eq!(
        serde_json::to_string(&PlanStatus::Cancelled).unwrap(),
        "\"cancelled\""
    );
    assert_eq!(
        serde_json::to_string(&RequestStatus::AutoApproved).unwrap(),
        "\"auto_approved\""
    );
    for status in PlanStatus::ALL {
        assert_eq!(status.as_str().parse::<PlanStatus>().unwrap(), status);
    }
}

#[test]
fn request_status_terminality() {
    assert!(!RequestStatus::Pending.is_terminal());
    assert!(RequestStatus::Approved.is_terminal());
    assert!(RequestStatus::AutoApproved.is_accepted());
    assert!(!RequestStatus::Rejected.is_accepted());
}

#[test]
fn rating_orders_by_severity() {
    assert!(Rating::Low < Rating::Medium);
    assert!(Rating::High < Rating::Critical);
    assert_eq!("critical".parse::<Rating>().unwrap(), Rating::Critical);
    assert!("severe".parse::<Rating>().is_err());
}

#[test]
fn unknown_role_fails_to_parse() {
    assert_eq!("risk_manager".parse::<Role>().unwrap(), Role::RiskManager);
    assert!("root".parse::<Role>().is_err());
}

#[test]
fn workflow_event_exposes_type_and_ids() {
    let event = WorkflowEvent::Resolved {
        request_id: "cr-1".into(),
        risk_id: "risk-1".into(),
        requester_id: "u-1".into(),
        reviewer_id: "u-2".into(),
        outcome: RequestStatus::Rejected,
        note: Some("insufficient evidence".into()),
    };
    assert_eq!(event.event_type(), WorkflowEventType::Resolved);
    assert_eq!(event.request_id(), "cr-1");
    assert_eq!(event.risk_id(), "risk-1");
}

#[test]
fn delete_summary_totals_all_tables() {
    let summary = DeleteSummary {
        risks: 1,
        plans: 2,
        tasks: 3,
        steps: 4,
        change_requests: 1,
        change_log_entries: 10,
    };
    assert_eq!(summary.total(), 21);
}
