use std::collections::BTreeSet;

use crate::errors::RiskRegResult;
use crate::models::{WorkflowEvent, WorkflowEventType};

/// Resolves who should hear about a workflow event (department members,
/// access grantees, champions, role-based teams). Supplied by the caller.
pub trait IRecipientResolver: Send + Sync {
    fn resolve_recipients(
        &self,
        event_type: WorkflowEventType,
        context: &WorkflowEvent,
    ) -> RiskRegResult<BTreeSet<String>>;
}

/// Transport for notifications. Supplied by the caller.
pub trait INotificationSink: Send + Sync {
    fn deliver(&self, recipients: &BTreeSet<String>, event: &WorkflowEvent) -> RiskRegResult<()>;
}
