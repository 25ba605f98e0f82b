//! Handler that resolves recipients and hands the event to a sink.

use std::sync::Arc;

use riskreg_core::errors::RiskRegResult;
use riskreg_core::models::WorkflowEvent;
use riskreg_core::traits::{INotificationSink, IRecipientResolver};

use super::IWorkflowEventHandler;

/// Combines an external recipient resolver with a delivery sink. The state
/// machine only raises events; who hears about them is decided here.
pub struct RecipientFanout {
    resolver: Arc<dyn IRecipientResolver>,
    sink: Arc<dyn INotificationSink>,
}

impl RecipientFanout {
    pub fn new(resolver: Arc<dyn IRecipientResolver>, sink: Arc<dyn INotificationSink>) -> Self {
        Self { resolver, sink }
    }

    fn fan_out(&self, event: &WorkflowEvent) -> RiskRegResult<()> {
        let recipients = self.resolver.resolve_recipients(event.event_type(), event)?;
        if recipients.is_empty() {
            tracing::debug!(
                request_id = %event.request_id(),
                event_type = event.event_type().as_str(),
                "no recipients"
            );
            return Ok(());
        }
        self.sink.deliver(&recipients, event)
    }
}

impl IWorkflowEventHandler for RecipientFanout {
    fn name(&self) -> &str {
        "recipient_fanout"
    }

    fn on_review_requested(&self, event: &WorkflowEvent) -> RiskRegResult<()> {
        self.fan_out(event)
    }

    fn on_auto_approved(&self, event: &WorkflowEvent) -> RiskRegResult<()> {
        self.fan_out(event)
    }

    fn on_resolved(&self, event: &WorkflowEvent) -> RiskRegResult<()> {
        self.fan_out(event)
    }
}
