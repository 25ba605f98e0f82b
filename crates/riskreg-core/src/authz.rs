//! Role gates shared by every engine that mutates the register.
//!
//! Callers arrive already authenticated; these checks only decide whether
//! the actor's role may perform the operation. Refusals are logged here so
//! every engine reports them the same way.

use crate::config::WorkflowConfig;
use crate::errors::{RiskRegError, RiskRegResult};
use crate::models::{ActorContext, Role};

/// Any role except viewer.
pub fn require_writer(actor: &ActorContext, operation: &str) -> RiskRegResult<()> {
    if actor.role.can_write() {
        return Ok(());
    }
    Err(deny(actor, operation, format!("{operation} requires write access")))
}

/// One of the configured privileged roles.
pub fn require_privileged(
    workflow: &WorkflowConfig,
    actor: &ActorContext,
    operation: &str,
) -> RiskRegResult<()> {
    if workflow.is_privileged(actor.role) {
        return Ok(());
    }
    Err(deny(actor, operation, format!("{operation} requires a privileged role")))
}

/// One of an explicit set of roles.
pub fn require_role(actor: &ActorContext, allowed: &[Role], operation: &str) -> RiskRegResult<()> {
    if allowed.contains(&actor.role) {
        return Ok(());
    }
    Err(deny(
        actor,
        operation,
        format!("{operation} is not permitted for {}", actor.role),
    ))
}

/// Log the refusal and build the error for it.
pub fn deny(actor: &ActorContext, operation: &str, reason: String) -> RiskRegError {
    tracing::warn!(
        event = "authorization_denied",
        actor_id = %actor.actor_id,
        role = %actor.role,
        operation = %operation,
        "authorization denied"
    );
    RiskRegError::unauthorized(&actor.actor_id, actor.role, reason)
}
