//! RiskEditor: direct risk creation, tiered edits, and cascading delete.
//!
//! Residual assessment fields are not reachable from here. They change only
//! through an accepted change request (see [`crate::approval`]).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use riskreg_audit::ChangeRecorder;
use riskreg_core::authz::{require_role, require_writer};
use riskreg_core::errors::{RiskRegError, RiskRegResult};
use riskreg_core::models::{
    ActorContext, DeleteSummary, EntityRef, EntityType, NewRisk, RatingDomain, Risk, Role,
    Snapshot,
};
use riskreg_core::traits::IRegisterStorage;
use riskreg_core::updates::RiskUpdate;
use riskreg_observability::tracing_setup::events;
use riskreg_observability::tracing_setup::spans::names;
use riskreg_rating::RatingCalculator;
use uuid::Uuid;


pub struct RiskEditor<S: IRegisterStorage> {
    storage: Arc<S>,
    calculator: RatingCalculator,
}

impl<S: IRegisterStorage> RiskEditor<S> {
    pub fn new(storage: Arc<S>, calculator: RatingCalculator) -> Self {
        Self { storage, calculator }
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Register a new risk. The residual assessment starts equal to the
    /// inherent one unless residual factors are given.
    pub fn create(
        &self,
        actor: &ActorContext,
        input: NewRisk,
        now: DateTime<Utc>,
    ) -> RiskRegResult<Risk> {
        require_writer(actor, "create_risk")?;
        let title_en = required_text("titleEn", &input.title_en)?;
        let title_ar = required_text("titleAr", &input.title_ar)?;
        let department_id = required_text("departmentId", &input.department_id)?;

        let inherent = self.calculator.assess(
            RatingDomain::Risk,
            input.inherent_likelihood,
            input.inherent_impact,
        )?;
        let residual = self.calculator.assess(
            RatingDomain::Risk,
            input.residual_likelihood.unwrap_or(input.inherent_likelihood),
            input.residual_impact.unwrap_or(input.inherent_impact),
        )?;

        let risk = Risk {
            id: Uuid::new_v4().to_string(),
            title_en,
            title_ar,
            description_en: input.description_en.trim().to_string(),
            description_ar: input.description_ar.trim().to_string(),
            department_id,
            owner_id: input.owner_id.filter(|o| !o.trim().is_empty()),
            inherent,
            residual,
            created_at: now,
            updated_at: now,
            version: 1,
        };

        let mut recorder = ChangeRecorder::new(&actor.actor_id, now);
        recorder.record_created(&risk);
        self.storage.create_risk(&risk, recorder.entries())?;
        events::change_log_appended(
            &risk.entity_ref().to_string(),
            recorder.batch_id(),
            recorder.len(),
        );
        Ok(risk)
    }

    /// Apply a tiered edit with an optimistic version check.
    ///
    /// Returns the risk as now stored. An edit that changes nothing writes
    /// nothing and returns the risk unchanged.
    pub fn apply(
        &self,
        actor: &ActorContext,
        risk_id: &str,
        update: RiskUpdate,
        now: DateTime<Utc>,
    ) -> RiskRegResult<Risk> {
        let _span = tracing::info_span!(names::RISK_EDIT, risk_id, tier = update.tier()).entered();
        require_role(actor, update.permitted_roles(), "edit_risk")?;

        let risk = self
            .storage
            .get_risk(risk_id)?
            .ok_or_else(|| RiskRegError::not_found(EntityType::Risk, risk_id))?;
        let mut next = risk.clone();

        let details = update.details();
        if let Some(title) = &details.title_en {
            next.title_en = required_text("titleEn", title)?;
        }
        if let Some(title) = &details.title_ar {
            next.title_ar = required_text("titleAr", title)?;
        }
        if let Some(description) = &details.description_en {
            next.description_en = description.trim().to_string();
        }
        if let Some(description) = &details.description_ar {
            next.description_ar = description.trim().to_string();
        }

        let (likelihood, impact) = update.inherent();
        if likelihood.is_some() || impact.is_some() {
            next.inherent = self.calculator.assess(
                RatingDomain::Risk,
                likelihood.unwrap_or(risk.inherent.likelihood),
                impact.unwrap_or(risk.inherent.impact),
            )?;
        }

        let (department_id, owner_id) = update.ownership();
        if let Some(department_id) = department_id {
            next.department_id = required_text("departmentId", department_id)?;
        }
        if let Some(owner_id) = owner_id {
            next.owner_id = owner_id
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string);
        }

        if next == risk {
            return Ok(risk);
        }
        next.updated_at = now;

        let mut recorder = ChangeRecorder::new(&actor.actor_id, now);
        recorder.record(&risk, &next);
        self.storage.update_risk(&next, recorder.entries())?;
        next.version += 1;

        events::risk_edited(&next.id, &actor.actor_id, update.tier(), recorder.len());
        Ok(next)
    }

    /// Delete a risk with its plans, tasks, steps, change requests, and
    /// every change log entry about them. Admin only.
    pub fn delete(&self, actor: &ActorContext, risk_id: &str) -> RiskRegResult<DeleteSummary> {
        require_role(actor, &[Role::Admin], "delete_risk")?;
        let summary = self.storage.delete_with_children(&EntityRef::risk(risk_id))?;
        events::entity_deleted(EntityType::Risk.as_str(), &actor.actor_id, summary.total());
        Ok(summary)
    }
}

fn required_text(field: &str, value: &str) -> RiskRegResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RiskRegError::validation(field, "must not be blank"));
    }
    Ok(trimmed.to_string())
}
