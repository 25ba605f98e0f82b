//! ApprovalEngine: the residual-risk change request state machine.
//!
//! ```text
//! submit ──(privileged)──► auto_approved
//!    │
//!    └──► pending ──approve──► approved
//!             └─────reject───► rejected
//! ```
//!
//! Every transition out of `pending` is a conditional write in storage, so
//! exactly one of any set of concurrent resolvers wins.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use riskreg_audit::ChangeRecorder;
use riskreg_core::authz::{require_privileged, require_writer};
use riskreg_core::config::{RiskRegConfig, WorkflowConfig};
use riskreg_core::errors::{ConflictReason, RiskRegError, RiskRegResult};
use riskreg_core::models::{
    ActorContext, ChangeProposal, EntityType, RatingDomain, RequestStatus,
    ResidualRiskChangeRequest, ResolveAction, Resolution, Risk, Snapshot, WorkflowEvent,
};
use riskreg_core::traits::IRegisterStorage;
use riskreg_observability::tracing_setup::events;
use riskreg_observability::tracing_setup::spans::names;
use riskreg_rating::RatingCalculator;
use uuid::Uuid;

use crate::events::EventDispatcher;

pub struct ApprovalEngine<S: IRegisterStorage> {
    storage: Arc<S>,
    calculator: RatingCalculator,
    workflow: WorkflowConfig,
    dispatcher: EventDispatcher,
}

impl<S: IRegisterStorage> ApprovalEngine<S> {
    pub fn new(
        storage: Arc<S>,
        calculator: RatingCalculator,
        workflow: WorkflowConfig,
        dispatcher: EventDispatcher,
    ) -> Self {
        Self {
            storage,
            calculator,
            workflow,
            dispatcher,
        }
    }

    /// Build from loaded configuration. Fails if a rating table is invalid.
    pub fn from_config(
        storage: Arc<S>,
        config: &RiskRegConfig,
        dispatcher: EventDispatcher,
    ) -> RiskRegResult<Self> {
        let calculator = RatingCalculator::from_config(&config.rating)?;
        Ok(Self::new(storage, calculator, config.workflow.clone(), dispatcher))
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Propose new residual likelihood and impact for a risk.
    ///
    /// Privileged requesters skip review: the request is stored as
    /// `auto_approved` and the risk's residual assessment is updated in the
    /// same transaction. Everyone else gets a `pending` request and the
    /// risk is left alone.
    pub fn submit_change_request(
        &self,
        risk_id: &str,
        proposal: ChangeProposal,
        actor: &ActorContext,
        now: DateTime<Utc>,
    ) -> RiskRegResult<ResidualRiskChangeRequest> {
        let _span = tracing::info_span!(names::APPROVAL_SUBMIT, risk_id, actor = %actor.actor_id)
            .entered();
        require_writer(actor, "submit_change_request")?;

        let justification = proposal.justification.trim();
        if justification.is_empty() {
            return Err(RiskRegError::validation(
                "justification",
                "a justification is required",
            ));
        }
        let proposed = self.calculator.rate(
            RatingDomain::ResidualRequest,
            proposal.likelihood,
            proposal.impact,
        )?;
        let risk = self.load_risk(risk_id)?;

        let auto_approve = self.workflow.is_privileged(actor.role);
        let request = ResidualRiskChangeRequest {
            id: Uuid::new_v4().to_string(),
            risk_id: risk.id.clone(),
            requester_id: actor.actor_id.clone(),
            current_likelihood: risk.residual.likelihood,
            current_impact: risk.residual.impact,
            current_score: risk.residual.score,
            current_rating: risk.residual.rating,
            proposed_likelihood: proposal.likelihood,
            proposed_impact: proposal.impact,
            proposed_score: proposed.score,
            proposed_rating: proposed.rating,
            justification: justification.to_string(),
            status: if auto_approve {
                RequestStatus::AutoApproved
            } else {
                RequestStatus::Pending
            },
            reviewer_id: auto_approve.then(|| actor.actor_id.clone()),
            review_note: None,
            created_at: now,
            reviewed_at: auto_approve.then_some(now),
        };

        let mut recorder = ChangeRecorder::new(&actor.actor_id, now);
        let applied = if auto_approve {
            apply_proposal(&risk, &request, now, &mut recorder)
        } else {
            None
        };
        recorder.record_created(&request);

        self.storage
            .insert_change_request(&request, applied.as_ref(), recorder.entries())?;
        events::change_log_appended(
            &request.entity_ref().to_string(),
            recorder.batch_id(),
            recorder.len(),
        );
        events::change_request_submitted(&request.id, &request.risk_id, request.status.as_str());

        let event = if auto_approve {
            WorkflowEvent::AutoApproved {
                request_id: request.id.clone(),
                risk_id: request.risk_id.clone(),
                requester_id: request.requester_id.clone(),
                proposed_rating: request.proposed_rating,
            }
        } else {
            WorkflowEvent::ReviewRequested {
                request_id: request.id.clone(),
                risk_id: request.risk_id.clone(),
                requester_id: request.requester_id.clone(),
                proposed_rating: request.proposed_rating,
            }
        };
        self.dispatcher.emit(&event);

        Ok(request)
    }

    /// Approve or reject a pending request.
    ///
    /// Approval applies the proposed values to the risk; rejection leaves
    /// it untouched. Losing a race against another reviewer fails with
    /// `ConflictReason::AlreadyResolved` and writes nothing.
    pub fn resolve_change_request(
        &self,
        request_id: &str,
        action: ResolveAction,
        reviewer: &ActorContext,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> RiskRegResult<ResidualRiskChangeRequest> {
        let _span = tracing::info_span!(
            names::APPROVAL_RESOLVE,
            request_id,
            reviewer = %reviewer.actor_id
        )
        .entered();
        require_privileged(&self.workflow, reviewer, "resolve_change_request")?;

        let request = self.get(request_id)?;
        if request.status != RequestStatus::Pending {
            events::change_request_conflict(request_id, &reviewer.actor_id);
            return Err(RiskRegError::conflict(ConflictReason::AlreadyResolved {
                request_id: request.id,
            }));
        }

        let note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let resolution = Resolution {
            request_id: request.id.clone(),
            status: action.target_status(),
            reviewer_id: reviewer.actor_id.clone(),
            note: note.clone(),
            reviewed_at: now,
        };
        let mut resolved = request.clone();
        resolved.status = resolution.status;
        resolved.reviewer_id = Some(resolution.reviewer_id.clone());
        resolved.review_note = note;
        resolved.reviewed_at = Some(now);

        let mut recorder = ChangeRecorder::new(&reviewer.actor_id, now);
        let applied = match action {
            ResolveAction::Approve => {
                let risk = self.load_risk(&request.risk_id)?;
                apply_proposal(&risk, &request, now, &mut recorder)
            }
            ResolveAction::Reject => None,
        };
        recorder.record(&request, &resolved);

        self.storage
            .resolve_change_request(&resolution, applied.as_ref(), recorder.entries())
            .inspect_err(|e| {
                if let RiskRegError::Conflict {
                    reason: ConflictReason::AlreadyResolved { .. },
                } = e
                {
                    events::change_request_conflict(request_id, &reviewer.actor_id);
                }
            })?;
        events::change_log_appended(
            &resolved.entity_ref().to_string(),
            recorder.batch_id(),
            recorder.len(),
        );
        events::change_request_resolved(
            &resolved.id,
            &reviewer.actor_id,
            resolved.status.as_str(),
        );

        self.dispatcher.emit(&WorkflowEvent::Resolved {
            request_id: resolved.id.clone(),
            risk_id: resolved.risk_id.clone(),
            requester_id: resolved.requester_id.clone(),
            reviewer_id: reviewer.actor_id.clone(),
            outcome: resolved.status,
            note: resolved.review_note.clone(),
        });

        Ok(resolved)
    }

    pub fn get(&self, request_id: &str) -> RiskRegResult<ResidualRiskChangeRequest> {
        self.storage
            .get_change_request(request_id)?
            .ok_or_else(|| RiskRegError::not_found(EntityType::ChangeRequest, request_id))
    }

    /// Requests on a risk still awaiting review, oldest first.
    pub fn pending_for_risk(&self, risk_id: &str) -> RiskRegResult<Vec<ResidualRiskChangeRequest>> {
        self.storage
            .list_change_requests(risk_id, Some(RequestStatus::Pending))
    }

    fn load_risk(&self, id: &str) -> RiskRegResult<Risk> {
        self.storage
            .get_risk(id)?
            .ok_or_else(|| RiskRegError::not_found(EntityType::Risk, id))
    }
}

/// Risk with the request's proposed residual assessment copied over as-is.
/// `None` when the residual assessment would not change.
fn apply_proposal(
    risk: &Risk,
    request: &ResidualRiskChangeRequest,
    now: DateTime<Utc>,
    recorder: &mut ChangeRecorder,
) -> Option<Risk> {
    let residual = request.proposed_assessment();
    if residual == risk.residual {
        return None;
    }
    let mut next = risk.clone();
    next.residual = residual;
    next.updated_at = now;
    recorder.record(risk, &next);
    Some(next)
}
