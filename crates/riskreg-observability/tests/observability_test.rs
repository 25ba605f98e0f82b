use riskreg_core::config::ObservabilityConfig;
use riskreg_observability::tracing_setup::{events, spans::names};

#[test]
fn tracing_span_names_defined() {
    assert_eq!(names::ROLLUP, "riskreg.rollup");
    assert_eq!(names::APPROVAL_SUBMIT, "riskreg.approval.submit");
    assert_eq!(names::APPROVAL_RESOLVE, "riskreg.approval.resolve");
    assert_eq!(names::RISK_EDIT, "riskreg.risk_edit");
}

#[test]
fn tracing_events_do_not_panic() {
    events::change_request_submitted("cr-1", "r-1", "pending");
    events::change_request_resolved("cr-1", "u-2", "approved");
    events::change_request_conflict("cr-1", "u-3");
    events::rollup_recomputed("treatment_plan", "p-1", "notStarted", "inProgress", Some(33));
    events::risk_edited("r-1", "u-1", "contributor", 2);
    events::entity_deleted("risk:r-1", "u-admin", 9);
    events::change_log_appended("risk:r-1", "b-1", 3);
    events::notification_failed("recipient_fanout", "resolved", "sink offline");
}

#[test]
fn second_init_reports_existing_subscriber() {
    let config = ObservabilityConfig::default();
    riskreg_observability::init_from_config(&config);
    // Only one global subscriber can ever be installed per process.
    assert!(!riskreg_observability::init_tracing_with_filter("debug"));
}
