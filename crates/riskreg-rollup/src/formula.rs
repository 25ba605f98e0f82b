//! Pure roll-up formulas. Always recomputed from scratch over the full
//! child set, so replaying a computation is harmless.

use chrono::{DateTime, Utc};
use riskreg_core::constants::FULL_PROGRESS;
use riskreg_core::models::{PlanStatus, StepStatus, TaskStatus, TaskStep, TreatmentPlan, TreatmentTask};

/// Status implied by a set of child statuses, or `None` with no children.
pub fn derive_task_status(steps: &[StepStatus]) -> Option<TaskStatus> {
    if steps.is_empty() {
        return None;
    }
    let completed = steps.iter().filter(|s| **s == StepStatus::Completed).count();
    let status = if completed == steps.len() {
        TaskStatus::Completed
    } else if steps.iter().any(|s| s.is_started()) {
        TaskStatus::InProgress
    } else {
        TaskStatus::NotStarted
    };
    Some(status)
}

/// Task with its status derived from `steps`. A task without steps keeps
/// its manually set status.
pub fn recalculate_task_status(task: &TreatmentTask, steps: &[TaskStep]) -> TreatmentTask {
    let statuses: Vec<StepStatus> = steps.iter().map(|s| s.status).collect();
    let mut next = task.clone();
    if let Some(status) = derive_task_status(&statuses) {
        next.status = status;
    }
    next
}

/// `completed / total × 100`, rounded half up. Zero total yields zero.
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let full = FULL_PROGRESS as usize;
    let pct = (completed.min(total) * full + total / 2) / total;
    pct as u8
}

/// Plan with status and progress derived from `tasks` at time `now`.
///
/// Cancelled plans and plans without tasks come back unchanged. A plan
/// without a due date is never overdue.
pub fn recalculate_treatment_status(
    plan: &TreatmentPlan,
    tasks: &[TreatmentTask],
    now: DateTime<Utc>,
) -> TreatmentPlan {
    if plan.status == PlanStatus::Cancelled || tasks.is_empty() {
        return plan.clone();
    }

    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.status == TaskStatus::Completed).count();
    let past_due = plan.due_date.is_some_and(|due| due < now);

    let status = if completed == total {
        PlanStatus::Completed
    } else if past_due {
        PlanStatus::Overdue
    } else if tasks.iter().any(|t| t.status.is_started()) {
        PlanStatus::InProgress
    } else {
        PlanStatus::NotStarted
    };

    let mut next = plan.clone();
    next.status = status;
    next.progress = progress_percent(completed, total);
    next
}
