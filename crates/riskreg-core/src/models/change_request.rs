use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::{FieldMap, FieldValue, Snapshot, TrackedField};
use super::{EntityRef, Rating, RequestStatus, RiskAssessment};

/// A proposed edit to a risk's residual assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualRiskChangeRequest {
    pub id: String,
    pub risk_id: String,
    pub requester_id: String,
    pub current_likelihood: u8,
    pub current_impact: u8,
    pub current_score: u8,
    pub current_rating: Rating,
    pub proposed_likelihood: u8,
    pub proposed_impact: u8,
    pub proposed_score: u8,
    pub proposed_rating: Rating,
    pub justification: String,
    pub status: RequestStatus,
    pub reviewer_id: Option<String>,
    pub review_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl ResidualRiskChangeRequest {
    /// The residual assessment this request would give its risk.
    pub fn proposed_assessment(&self) -> RiskAssessment {
        RiskAssessment {
            likelihood: self.proposed_likelihood,
            impact: self.proposed_impact,
            score: self.proposed_score,
            rating: self.proposed_rating,
        }
    }
}

impl Snapshot for ResidualRiskChangeRequest {
    fn entity_ref(&self) -> EntityRef {
        EntityRef::change_request(&self.id)
    }

    fn snapshot(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert(TrackedField::Status, self.status.as_str().into());
        map.insert(TrackedField::ReviewerId, FieldValue::from(&self.reviewer_id));
        map.insert(TrackedField::ReviewNote, FieldValue::from(&self.review_note));
        map
    }
}

/// What a requester proposes for a risk's residual assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeProposal {
    pub likelihood: u8,
    pub impact: u8,
    pub justification: String,
}

impl ChangeProposal {
    pub fn new(likelihood: u8, impact: u8, justification: impl Into<String>) -> Self {
        Self {
            likelihood,
            impact,
            justification: justification.into(),
        }
    }
}

/// Reviewer decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveAction {
    Approve,
    Reject,
}

impl ResolveAction {
    /// Terminal status this action moves a pending request into.
    pub fn target_status(self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Reject => RequestStatus::Rejected,
        }
    }
}

/// The terminal transition written by the conditional `pending → X` update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub request_id: String,
    pub status: RequestStatus,
    pub reviewer_id: String,
    pub note: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}
