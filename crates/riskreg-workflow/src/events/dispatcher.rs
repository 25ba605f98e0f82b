//! EventDispatcher: synchronous, fire-and-forget delivery.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use riskreg_core::models::WorkflowEvent;
use riskreg_observability::tracing_setup::events;

use super::IWorkflowEventHandler;

/// Outcome counts for one emitted event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Dispatches events to registered handlers.
///
/// A handler that errors or panics is logged and skipped; the remaining
/// handlers still run, and nothing propagates back to the caller.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn IWorkflowEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn IWorkflowEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn emit(&self, event: &WorkflowEvent) -> DispatchReport {
        let mut report = DispatchReport::default();
        for handler in &self.handlers {
            let result = catch_unwind(AssertUnwindSafe(|| match event {
                WorkflowEvent::ReviewRequested { .. } => handler.on_review_requested(event),
                WorkflowEvent::AutoApproved { .. } => handler.on_auto_approved(event),
                WorkflowEvent::Resolved { .. } => handler.on_resolved(event),
            }));
            let error = match result {
                Ok(Ok(())) => {
                    report.delivered += 1;
                    continue;
                }
                Ok(Err(e)) => e.to_string(),
                Err(panic) => panic_message(panic.as_ref()),
            };
            report.failed += 1;
            events::notification_failed(handler.name(), event.event_type().as_str(), &error);
        }
        report
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskreg_core::errors::{RiskRegError, RiskRegResult};
    use riskreg_core::models::Rating;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(AtomicUsize);

    impl IWorkflowEventHandler for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn on_review_requested(&self, _event: &WorkflowEvent) -> RiskRegResult<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Panicking;

    impl IWorkflowEventHandler for Panicking {
        fn name(&self) -> &str {
            "panicking"
        }

        fn on_review_requested(&self, _event: &WorkflowEvent) -> RiskRegResult<()> {
            panic!("handler exploded");
        }
    }

    struct Failing;

    impl IWorkflowEventHandler for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn on_review_requested(&self, _event: &WorkflowEvent) -> RiskRegResult<()> {
            Err(RiskRegError::validation("recipient", "mailbox full"))
        }
    }

    fn review_requested() -> WorkflowEvent {
        WorkflowEvent::ReviewRequested {
            request_id: "cr-1".into(),
            risk_id: "r-1".into(),
            requester_id: "u-1".into(),
            proposed_rating: Rating::High,
        }
    }

    #[test]
    fn failing_handlers_do_not_block_others() {
        let counting = Arc::new(Counting(AtomicUsize::new(0)));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(Arc::new(Panicking));
        dispatcher.register(Arc::new(Failing));
        dispatcher.register(counting.clone());

        let report = dispatcher.emit(&review_requested());
        assert_eq!(report, DispatchReport { delivered: 1, failed: 2 });
        assert_eq!(counting.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_dispatcher_is_a_no_op() {
        let dispatcher = EventDispatcher::new();
        assert_eq!(dispatcher.handler_count(), 0);
        assert_eq!(dispatcher.emit(&review_requested()), DispatchReport::default());
    }
}
