//! Structured log events for key register operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a change request submission.
pub fn change_request_submitted(request_id: &str, risk_id: &str, status: &str) {
    tracing::info!(
        event = "change_request_submitted",
        request_id = %request_id,
        risk_id = %risk_id,
        status = %status,
        "change request submitted"
    );
}

/// Log a change request reaching a terminal state through review.
pub fn change_request_resolved(request_id: &str, reviewer_id: &str, outcome: &str) {
    tracing::info!(
        event = "change_request_resolved",
        request_id = %request_id,
        reviewer_id = %reviewer_id,
        outcome = %outcome,
        "change request resolved"
    );
}

/// Log a lost race on the pending guard.
pub fn change_request_conflict(request_id: &str, actor_id: &str) {
    tracing::warn!(
        event = "change_request_conflict",
        request_id = %request_id,
        actor_id = %actor_id,
        "change request already resolved"
    );
}

/// Log a roll-up that changed a persisted entity.
pub fn rollup_recomputed(entity: &str, id: &str, from: &str, to: &str, progress: Option<u8>) {
    tracing::debug!(
        event = "rollup_recomputed",
        entity = %entity,
        id = %id,
        from = %from,
        to = %to,
        progress = ?progress,
        "status recomputed"
    );
}

/// Log a direct risk edit.
pub fn risk_edited(risk_id: &str, actor_id: &str, tier: &str, changed_fields: usize) {
    tracing::info!(
        event = "risk_edited",
        risk_id = %risk_id,
        actor_id = %actor_id,
        tier = %tier,
        changed_fields = changed_fields,
        "risk edited"
    );
}

/// Log a cascading delete.
pub fn entity_deleted(entity: &str, actor_id: &str, rows: usize) {
    tracing::info!(
        event = "entity_deleted",
        entity = %entity,
        actor_id = %actor_id,
        rows = rows,
        "entity deleted with children"
    );
}

/// Log a batch of change log entries committed alongside a write.
pub fn change_log_appended(subject: &str, batch_id: &str, entries: usize) {
    tracing::debug!(
        event = "change_log_appended",
        subject = %subject,
        batch_id = %batch_id,
        entries = entries,
        "change log appended"
    );
}

/// Log a failed or panicking workflow event handler.
pub fn notification_failed(handler: &str, event_type: &str, error: &str) {
    tracing::warn!(
        event = "notification_failed",
        handler = %handler,
        event_type = %event_type,
        error = %error,
        "workflow event handler failed"
    );
}
