//! Workflow event handlers and the dispatcher that shields the state
//! machine from their failures.

pub mod dispatcher;
pub mod fanout;

use riskreg_core::errors::RiskRegResult;
use riskreg_core::models::WorkflowEvent;

pub use dispatcher::{DispatchReport, EventDispatcher};
pub use fanout::RecipientFanout;

/// Receives workflow events after the transition that raised them has
/// committed. All methods default to no-ops.
pub trait IWorkflowEventHandler: Send + Sync {
    /// Name used in failure logs.
    fn name(&self) -> &str;

    fn on_review_requested(&self, _event: &WorkflowEvent) -> RiskRegResult<()> {
        Ok(())
    }

    fn on_auto_approved(&self, _event: &WorkflowEvent) -> RiskRegResult<()> {
        Ok(())
    }

    fn on_resolved(&self, _event: &WorkflowEvent) -> RiskRegResult<()> {
        Ok(())
    }
}
