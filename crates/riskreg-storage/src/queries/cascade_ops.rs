//! Explicit cascading delete down the ownership tree.
//!
//! Children go first so foreign keys hold at every statement: steps, tasks,
//! plans, change requests, then the target. The change log of every removed
//! entity goes with it.

use rusqlite::{Connection, OptionalExtension};

use riskreg_core::errors::{RiskRegError, RiskRegResult};
use riskreg_core::models::{DeleteSummary, EntityRef, EntityType};

use super::change_log_ops;
use crate::to_storage_err;

fn table_for(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Risk => "risks",
        EntityType::TreatmentPlan => "treatment_plans",
        EntityType::TreatmentTask => "treatment_tasks",
        EntityType::TaskStep => "task_steps",
        EntityType::ChangeRequest => "change_requests",
    }
}

/// Ids of `table` rows whose `parent_column` is one of `parents`.
fn child_ids(
    conn: &Connection,
    table: &str,
    parent_column: &str,
    parents: &[String],
) -> RiskRegResult<Vec<String>> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT id FROM {table} WHERE {parent_column} = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut ids = Vec::new();
    for parent in parents {
        let rows = stmt
            .query_map([parent], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| to_storage_err(e.to_string()))?;
        ids.extend(rows);
    }
    Ok(ids)
}

fn delete_rows(conn: &Connection, entity_type: EntityType, ids: &[String]) -> RiskRegResult<usize> {
    let mut stmt = conn
        .prepare_cached(&format!("DELETE FROM {} WHERE id = ?1", table_for(entity_type)))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut removed = 0;
    for id in ids {
        removed += stmt.execute([id]).map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(removed)
}

/// Delete `target` and everything it owns. Must run inside a transaction.
pub fn delete_with_children(conn: &Connection, target: &EntityRef) -> RiskRegResult<DeleteSummary> {
    let exists = conn
        .query_row(
            &format!("SELECT 1 FROM {} WHERE id = ?1", table_for(target.entity_type)),
            [&target.id],
            |_| Ok(()),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .is_some();
    if !exists {
        return Err(RiskRegError::not_found(target.entity_type, &target.id));
    }

    let root = vec![target.id.clone()];
    let (risks, plans, tasks, steps, requests) = match target.entity_type {
        EntityType::Risk => {
            let plans = child_ids(conn, "treatment_plans", "risk_id", &root)?;
            let tasks = child_ids(conn, "treatment_tasks", "plan_id", &plans)?;
            let steps = child_ids(conn, "task_steps", "task_id", &tasks)?;
            let requests = child_ids(conn, "change_requests", "risk_id", &root)?;
            (root, plans, tasks, steps, requests)
        }
        EntityType::TreatmentPlan => {
            let tasks = child_ids(conn, "treatment_tasks", "plan_id", &root)?;
            let steps = child_ids(conn, "task_steps", "task_id", &tasks)?;
            (Vec::new(), root, tasks, steps, Vec::new())
        }
        EntityType::TreatmentTask => {
            let steps = child_ids(conn, "task_steps", "task_id", &root)?;
            (Vec::new(), Vec::new(), root, steps, Vec::new())
        }
        EntityType::TaskStep => (Vec::new(), Vec::new(), Vec::new(), root, Vec::new()),
        EntityType::ChangeRequest => (Vec::new(), Vec::new(), Vec::new(), Vec::new(), root),
    };

    let mut summary = DeleteSummary::default();
    for (entity_type, ids) in [
        (EntityType::TaskStep, &steps),
        (EntityType::TreatmentTask, &tasks),
        (EntityType::TreatmentPlan, &plans),
        (EntityType::ChangeRequest, &requests),
        (EntityType::Risk, &risks),
    ] {
        summary.change_log_entries += change_log_ops::delete_for(conn, entity_type.as_str(), ids)?;
        let removed = delete_rows(conn, entity_type, ids)?;
        match entity_type {
            EntityType::TaskStep => summary.steps = removed,
            EntityType::TreatmentTask => summary.tasks = removed,
            EntityType::TreatmentPlan => summary.plans = removed,
            EntityType::ChangeRequest => summary.change_requests = removed,
            EntityType::Risk => summary.risks = removed,
        }
    }
    Ok(summary)
}
