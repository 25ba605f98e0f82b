use serde::{Deserialize, Serialize};

use super::{Rating, RequestStatus};

/// Coarse event type handed to recipient resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowEventType {
    /// A pending request needs a privileged reviewer.
    ReviewRequested,
    /// A privileged requester's change was applied immediately.
    AutoApproved,
    /// A reviewer approved or rejected a pending request.
    Resolved,
}

impl WorkflowEventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReviewRequested => "review_requested",
            Self::AutoApproved => "auto_approved",
            Self::Resolved => "resolved",
        }
    }
}

/// Signals raised by the approval workflow after a transition commits.
/// The workflow never computes who should hear about them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkflowEvent {
    ReviewRequested {
        request_id: String,
        risk_id: String,
        requester_id: String,
        proposed_rating: Rating,
    },
    AutoApproved {
        request_id: String,
        risk_id: String,
        requester_id: String,
        proposed_rating: Rating,
    },
    Resolved {
        request_id: String,
        risk_id: String,
        requester_id: String,
        reviewer_id: String,
        outcome: RequestStatus,
        note: Option<String>,
    },
}

impl WorkflowEvent {
    pub fn event_type(&self) -> WorkflowEventType {
        match self {
            Self::ReviewRequested { .. } => WorkflowEventType::ReviewRequested,
            Self::AutoApproved { .. } => WorkflowEventType::AutoApproved,
            Self::Resolved { .. } => WorkflowEventType::Resolved,
        }
    }

    pub fn request_id(&self) -> &str {
        match self {
            Self::ReviewRequested { request_id, .. }
            | Self::AutoApproved { request_id, .. }
            | Self::Resolved { request_id, .. } => request_id,
        }
    }

    pub fn risk_id(&self) -> &str {
        match self {
            Self::ReviewRequested { risk_id, .. }
            | Self::AutoApproved { risk_id, .. }
            | Self::Resolved { risk_id, .. } => risk_id,
        }
    }
}
