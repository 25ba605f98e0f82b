//! TreatmentEngine: status mutations on the treatment tree with roll-up.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use riskreg_audit::ChangeRecorder;
use riskreg_core::authz::{require_privileged, require_writer};
use riskreg_core::config::WorkflowConfig;
use riskreg_core::errors::{ConflictReason, RiskRegError, RiskRegResult};
use riskreg_core::models::{
    ActorContext, ChangeLogEntry, EntityRef, EntityType, PlanStatus, Snapshot, StepStatus,
    TaskStatus, TaskStep, TreatmentPlan, TreatmentTask,
};
use riskreg_core::traits::IRegisterStorage;
use riskreg_observability::tracing_setup::events;
use riskreg_observability::tracing_setup::spans::names;

use crate::formula::{recalculate_task_status, recalculate_treatment_status};

/// Result of one treatment mutation.
///
/// Entities are returned in their post-operation state, with versions
/// matching what is now stored. `changed` lists every entity written.
#[derive(Debug, Clone, PartialEq)]
pub struct RollupOutcome {
    pub step: Option<TaskStep>,
    pub task: Option<TreatmentTask>,
    pub plan: TreatmentPlan,
    pub changed: Vec<EntityRef>,
    pub log: Vec<ChangeLogEntry>,
}

impl RollupOutcome {
    fn unchanged(plan: TreatmentPlan) -> Self {
        Self {
            step: None,
            task: None,
            plan,
            changed: Vec::new(),
            log: Vec::new(),
        }
    }

    /// Nothing was persisted.
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }

    pub fn plan_changed(&self) -> bool {
        self.changed
            .iter()
            .any(|r| r.entity_type == EntityType::TreatmentPlan)
    }

    pub fn task_changed(&self) -> bool {
        self.changed
            .iter()
            .any(|r| r.entity_type == EntityType::TreatmentTask)
    }
}

/// Orchestrates step/task status changes and the roll-up they trigger.
pub struct TreatmentEngine<S: IRegisterStorage> {
    storage: Arc<S>,
    workflow: WorkflowConfig,
}

impl<S: IRegisterStorage> TreatmentEngine<S> {
    pub fn new(storage: Arc<S>, workflow: WorkflowConfig) -> Self {
        Self { storage, workflow }
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Set a step's status, then roll up its task and plan.
    pub fn set_step_status(
        &self,
        actor: &ActorContext,
        step_id: &str,
        status: StepStatus,
        now: DateTime<Utc>,
    ) -> RiskRegResult<RollupOutcome> {
        require_writer(actor, "set_step_status")?;

        let step = self
            .storage
            .get_step(step_id)?
            .ok_or_else(|| RiskRegError::not_found(EntityType::TaskStep, step_id))?;
        let task = self.load_task(&step.task_id)?;
        let plan = self.load_plan(&task.plan_id)?;

        let mut next_step = step.clone();
        next_step.status = status;

        let mut steps = self.storage.list_steps(&task.id)?;
        replace_by_id(&mut steps, &next_step, |s| &s.id);
        let next_task = recalculate_task_status(&task, &steps);

        self.cascade(actor, now, Some((step, next_step)), task, next_task, plan)
    }

    /// Manually set the status of a task that has no steps, then roll up
    /// its plan. Tasks with steps have a derived status.
    pub fn set_task_status(
        &self,
        actor: &ActorContext,
        task_id: &str,
        status: TaskStatus,
        now: DateTime<Utc>,
    ) -> RiskRegResult<RollupOutcome> {
        require_writer(actor, "set_task_status")?;

        let task = self.load_task(task_id)?;
        if !self.storage.list_steps(&task.id)?.is_empty() {
            return Err(RiskRegError::conflict(ConflictReason::DerivedStatus {
                task_id: task.id,
            }));
        }
        let plan = self.load_plan(&task.plan_id)?;

        let mut next_task = task.clone();
        next_task.status = status;

        self.cascade(actor, now, None, task, next_task, plan)
    }

    /// Cancel a plan. Cancellation is sticky: roll-up never moves a plan
    /// out of it. Cancelling twice is a no-op; completed plans stay completed.
    pub fn cancel_plan(
        &self,
        actor: &ActorContext,
        plan_id: &str,
        now: DateTime<Utc>,
    ) -> RiskRegResult<RollupOutcome> {
        require_privileged(&self.workflow, actor, "cancel_plan")?;

        let plan = self.load_plan(plan_id)?;
        match plan.status {
            PlanStatus::Cancelled => return Ok(RollupOutcome::unchanged(plan)),
            PlanStatus::Completed => {
                return Err(RiskRegError::conflict(ConflictReason::TerminalState {
                    entity: EntityType::TreatmentPlan,
                    id: plan.id,
                    state: PlanStatus::Completed.as_str().to_string(),
                }))
            }
            _ => {}
        }

        let mut next = plan.clone();
        next.status = PlanStatus::Cancelled;
        next.updated_at = now;

        let mut recorder = ChangeRecorder::new(&actor.actor_id, now);
        recorder.record(&plan, &next);
        self.storage.update_plan(&next, recorder.entries())?;
        next.version += 1;

        events::rollup_recomputed(
            EntityType::TreatmentPlan.as_str(),
            &next.id,
            plan.status.as_str(),
            next.status.as_str(),
            None,
        );
        Ok(RollupOutcome {
            step: None,
            task: None,
            changed: vec![next.entity_ref()],
            plan: next,
            log: recorder.into_entries(),
        })
    }

    /// Recompute a plan against the clock without touching its children.
    /// This is how overdue status is picked up.
    pub fn refresh_plan(
        &self,
        actor: &ActorContext,
        plan_id: &str,
        now: DateTime<Utc>,
    ) -> RiskRegResult<RollupOutcome> {
        require_writer(actor, "refresh_plan")?;

        let _span = tracing::debug_span!(names::ROLLUP, plan_id).entered();
        let plan = self.load_plan(plan_id)?;
        let tasks = self.storage.list_tasks(&plan.id)?;
        let mut next = recalculate_treatment_status(&plan, &tasks, now);
        if next == plan {
            return Ok(RollupOutcome::unchanged(plan));
        }
        next.updated_at = now;

        let mut recorder = ChangeRecorder::new(&actor.actor_id, now);
        recorder.record(&plan, &next);
        self.storage.update_plan(&next, recorder.entries())?;
        next.version += 1;
        log_plan_change(&plan, &next);

        Ok(RollupOutcome {
            step: None,
            task: None,
            changed: vec![next.entity_ref()],
            plan: next,
            log: recorder.into_entries(),
        })
    }

    /// Roll the task change up into the plan and write every level that
    /// differs in one storage transaction.
    fn cascade(
        &self,
        actor: &ActorContext,
        now: DateTime<Utc>,
        step: Option<(TaskStep, TaskStep)>,
        task: TreatmentTask,
        next_task: TreatmentTask,
        plan: TreatmentPlan,
    ) -> RiskRegResult<RollupOutcome> {
        let _span = tracing::debug_span!(names::ROLLUP, plan_id = %plan.id, task_id = %task.id)
            .entered();
        let mut tasks = self.storage.list_tasks(&plan.id)?;
        replace_by_id(&mut tasks, &next_task, |t| &t.id);
        let mut next_plan = recalculate_treatment_status(&plan, &tasks, now);
        if next_plan != plan {
            next_plan.updated_at = now;
        }

        let mut recorder = ChangeRecorder::new(&actor.actor_id, now);
        let mut changed = Vec::new();

        let step_write = match &step {
            Some((before, after)) if before != after => {
                recorder.record(before, after);
                changed.push(after.entity_ref());
                Some(after)
            }
            _ => None,
        };
        let task_write = (next_task != task).then(|| {
            recorder.record(&task, &next_task);
            changed.push(next_task.entity_ref());
            &next_task
        });
        let plan_write = (next_plan != plan).then(|| {
            recorder.record(&plan, &next_plan);
            changed.push(next_plan.entity_ref());
            &next_plan
        });

        if changed.is_empty() {
            return Ok(RollupOutcome {
                step: step.map(|(_, after)| after),
                task: Some(next_task),
                plan,
                changed,
                log: Vec::new(),
            });
        }

        self.storage
            .save_treatment_changes(step_write, task_write, plan_write, recorder.entries())?;

        let step_changed = step_write.is_some();
        let task_changed = task_write.is_some();
        let plan_changed = plan_write.is_some();

        let mut step = step.map(|(_, after)| after);
        let mut next_task = next_task;
        let mut next_plan = next_plan;
        if step_changed {
            if let Some(s) = step.as_mut() {
                s.version += 1;
            }
        }
        if task_changed {
            next_task.version += 1;
            events::rollup_recomputed(
                EntityType::TreatmentTask.as_str(),
                &next_task.id,
                task.status.as_str(),
                next_task.status.as_str(),
                None,
            );
        }
        if plan_changed {
            next_plan.version += 1;
            log_plan_change(&plan, &next_plan);
        }

        Ok(RollupOutcome {
            step,
            task: Some(next_task),
            plan: next_plan,
            changed,
            log: recorder.into_entries(),
        })
    }

    fn load_task(&self, id: &str) -> RiskRegResult<TreatmentTask> {
        self.storage
            .get_task(id)?
            .ok_or_else(|| RiskRegError::not_found(EntityType::TreatmentTask, id))
    }

    fn load_plan(&self, id: &str) -> RiskRegResult<TreatmentPlan> {
        self.storage
            .get_plan(id)?
            .ok_or_else(|| RiskRegError::not_found(EntityType::TreatmentPlan, id))
    }
}

fn replace_by_id<T: Clone>(items: &mut [T], replacement: &T, id: impl Fn(&T) -> &String) {
    if let Some(slot) = items.iter_mut().find(|item| id(item) == id(replacement)) {
        *slot = replacement.clone();
    }
}

fn log_plan_change(before: &TreatmentPlan, after: &TreatmentPlan) {
    events::rollup_recomputed(
        EntityType::TreatmentPlan.as_str(),
        &after.id,
        before.status.as_str(),
        after.status.as_str(),
        Some(after.progress),
    );
}
