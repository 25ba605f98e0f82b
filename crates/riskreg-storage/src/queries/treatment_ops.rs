//! Treatment plan, task, and step rows.

use rusqlite::{params, Connection, OptionalExtension, Row};

use riskreg_core::errors::RiskRegResult;
use riskreg_core::models::{EntityType, TaskStep, TreatmentPlan, TreatmentTask};

use super::row::{
    decode_enum, decode_int, decode_opt_ts, decode_ts, encode_ts, insert_err, stale_or_missing,
};
use crate::to_storage_err;

// --- Plans ---

const PLANS: &str = "treatment_plans";
const PLAN_COLUMNS: &str = "id, risk_id, title_en, title_ar, strategy, status, progress,
    due_date, owner_id, created_at, updated_at, version";

struct PlanRow {
    id: String,
    risk_id: String,
    title_en: String,
    title_ar: String,
    strategy: String,
    status: String,
    progress: i64,
    due_date: Option<String>,
    owner_id: Option<String>,
    created_at: String,
    updated_at: String,
    version: i64,
}

impl PlanRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            risk_id: row.get(1)?,
            title_en: row.get(2)?,
            title_ar: row.get(3)?,
            strategy: row.get(4)?,
            status: row.get(5)?,
            progress: row.get(6)?,
            due_date: row.get(7)?,
            owner_id: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
            version: row.get(11)?,
        })
    }

    fn into_plan(self) -> RiskRegResult<TreatmentPlan> {
        Ok(TreatmentPlan {
            strategy: decode_enum(PLANS, &self.strategy)?,
            status: decode_enum(PLANS, &self.status)?,
            progress: decode_int(PLANS, "progress", self.progress)?,
            due_date: decode_opt_ts(PLANS, self.due_date)?,
            created_at: decode_ts(PLANS, &self.created_at)?,
            updated_at: decode_ts(PLANS, &self.updated_at)?,
            id: self.id,
            risk_id: self.risk_id,
            title_en: self.title_en,
            title_ar: self.title_ar,
            owner_id: self.owner_id,
            version: self.version,
        })
    }
}

pub fn insert_plan(conn: &Connection, plan: &TreatmentPlan) -> RiskRegResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO treatment_plans ({PLAN_COLUMNS}) VALUES
             (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
        ),
        params![
            plan.id,
            plan.risk_id,
            plan.title_en,
            plan.title_ar,
            plan.strategy.as_str(),
            plan.status.as_str(),
            plan.progress,
            plan.due_date.as_ref().map(encode_ts),
            plan.owner_id,
            encode_ts(&plan.created_at),
            encode_ts(&plan.updated_at),
            plan.version,
        ],
    )
    .map_err(|e| insert_err(e, EntityType::TreatmentPlan, &plan.id))?;
    Ok(())
}

pub fn get_plan(conn: &Connection, id: &str) -> RiskRegResult<Option<TreatmentPlan>> {
    let row = conn
        .prepare_cached(&format!("SELECT {PLAN_COLUMNS} FROM treatment_plans WHERE id = ?1"))
        .and_then(|mut stmt| stmt.query_row([id], PlanRow::from_row).optional())
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(PlanRow::into_plan).transpose()
}

pub fn list_plans(conn: &Connection, risk_id: &str) -> RiskRegResult<Vec<TreatmentPlan>> {
    let rows = conn
        .prepare_cached(&format!(
            "SELECT {PLAN_COLUMNS} FROM treatment_plans
             WHERE risk_id = ?1 ORDER BY created_at, id"
        ))
        .and_then(|mut stmt| {
            let rows = stmt
                .query_map([risk_id], PlanRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>();
            rows
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.into_iter().map(PlanRow::into_plan).collect()
}

pub fn update_plan(conn: &Connection, plan: &TreatmentPlan) -> RiskRegResult<()> {
    let rows = conn
        .execute(
            "UPDATE treatment_plans SET
                title_en = ?2, title_ar = ?3, strategy = ?4, status = ?5, progress = ?6,
                due_date = ?7, owner_id = ?8, updated_at = ?9, version = version + 1
             WHERE id = ?1 AND version = ?10",
            params![
                plan.id,
                plan.title_en,
                plan.title_ar,
                plan.strategy.as_str(),
                plan.status.as_str(),
                plan.progress,
                plan.due_date.as_ref().map(encode_ts),
                plan.owner_id,
                encode_ts(&plan.updated_at),
                plan.version,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if rows == 0 {
        return Err(stale_or_missing(conn, PLANS, EntityType::TreatmentPlan, &plan.id));
    }
    Ok(())
}

// --- Tasks ---

const TASKS: &str = "treatment_tasks";
const TASK_COLUMNS: &str = "id, plan_id, title_en, title_ar, position, status, assignee_id, version";

struct TaskRow {
    id: String,
    plan_id: String,
    title_en: String,
    title_ar: String,
    position: i64,
    status: String,
    assignee_id: Option<String>,
    version: i64,
}

impl TaskRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            plan_id: row.get(1)?,
            title_en: row.get(2)?,
            title_ar: row.get(3)?,
            position: row.get(4)?,
            status: row.get(5)?,
            assignee_id: row.get(6)?,
            version: row.get(7)?,
        })
    }

    fn into_task(self) -> RiskRegResult<TreatmentTask> {
        Ok(TreatmentTask {
            position: decode_int(TASKS, "position", self.position)?,
            status: decode_enum(TASKS, &self.status)?,
            id: self.id,
            plan_id: self.plan_id,
            title_en: self.title_en,
            title_ar: self.title_ar,
            assignee_id: self.assignee_id,
            version: self.version,
        })
    }
}

pub fn insert_task(conn: &Connection, task: &TreatmentTask) -> RiskRegResult<()> {
    conn.execute(
        &format!("INSERT INTO treatment_tasks ({TASK_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
        params![
            task.id,
            task.plan_id,
            task.title_en,
            task.title_ar,
            task.position,
            task.status.as_str(),
            task.assignee_id,
            task.version,
        ],
    )
    .map_err(|e| insert_err(e, EntityType::TreatmentTask, &task.id))?;
    Ok(())
}

pub fn get_task(conn: &Connection, id: &str) -> RiskRegResult<Option<TreatmentTask>> {
    let row = conn
        .prepare_cached(&format!("SELECT {TASK_COLUMNS} FROM treatment_tasks WHERE id = ?1"))
        .and_then(|mut stmt| stmt.query_row([id], TaskRow::from_row).optional())
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(TaskRow::into_task).transpose()
}

pub fn list_tasks(conn: &Connection, plan_id: &str) -> RiskRegResult<Vec<TreatmentTask>> {
    let rows = conn
        .prepare_cached(&format!(
            "SELECT {TASK_COLUMNS} FROM treatment_tasks WHERE plan_id = ?1 ORDER BY position, id"
        ))
        .and_then(|mut stmt| {
            let rows = stmt
                .query_map([plan_id], TaskRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>();
            rows
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.into_iter().map(TaskRow::into_task).collect()
}

pub fn update_task(conn: &Connection, task: &TreatmentTask) -> RiskRegResult<()> {
    let rows = conn
        .execute(
            "UPDATE treatment_tasks SET
                title_en = ?2, title_ar = ?3, position = ?4, status = ?5, assignee_id = ?6,
                version = version + 1
             WHERE id = ?1 AND version = ?7",
            params![
                task.id,
                task.title_en,
                task.title_ar,
                task.position,
                task.status.as_str(),
                task.assignee_id,
                task.version,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if rows == 0 {
        return Err(stale_or_missing(conn, TASKS, EntityType::TreatmentTask, &task.id));
    }
    Ok(())
}

// --- Steps ---

const STEPS: &str = "task_steps";
const STEP_COLUMNS: &str = "id, task_id, title_en, title_ar, position, status, version";

struct StepRow {
    id: String,
    task_id: String,
    title_en: String,
    title_ar: String,
    position: i64,
    status: String,
    version: i64,
}

impl StepRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            task_id: row.get(1)?,
            title_en: row.get(2)?,
            title_ar: row.get(3)?,
            position: row.get(4)?,
            status: row.get(5)?,
            version: row.get(6)?,
        })
    }

    fn into_step(self) -> RiskRegResult<TaskStep> {
        Ok(TaskStep {
            position: decode_int(STEPS, "position", self.position)?,
            status: decode_enum(STEPS, &self.status)?,
            id: self.id,
            task_id: self.task_id,
            title_en: self.title_en,
            title_ar: self.title_ar,
            version: self.version,
        })
    }
}

pub fn insert_step(conn: &Connection, step: &TaskStep) -> RiskRegResult<()> {
    conn.execute(
        &format!("INSERT INTO task_steps ({STEP_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        params![
            step.id,
            step.task_id,
            step.title_en,
            step.title_ar,
            step.position,
            step.status.as_str(),
            step.version,
        ],
    )
    .map_err(|e| insert_err(e, EntityType::TaskStep, &step.id))?;
    Ok(())
}

pub fn get_step(conn: &Connection, id: &str) -> RiskRegResult<Option<TaskStep>> {
    let row = conn
        .prepare_cached(&format!("SELECT {STEP_COLUMNS} FROM task_steps WHERE id = ?1"))
        .and_then(|mut stmt| stmt.query_row([id], StepRow::from_row).optional())
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(StepRow::into_step).transpose()
}

pub fn list_steps(conn: &Connection, task_id: &str) -> RiskRegResult<Vec<TaskStep>> {
    let rows = conn
        .prepare_cached(&format!(
            "SELECT {STEP_COLUMNS} FROM task_steps WHERE task_id = ?1 ORDER BY position, id"
        ))
        .and_then(|mut stmt| {
            let rows = stmt
                .query_map([task_id], StepRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>();
            rows
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.into_iter().map(StepRow::into_step).collect()
}

pub fn update_step(conn: &Connection, step: &TaskStep) -> RiskRegResult<()> {
    let rows = conn
        .execute(
            "UPDATE task_steps SET
                title_en = ?2, title_ar = ?3, position = ?4, status = ?5,
                version = version + 1
             WHERE id = ?1 AND version = ?6",
            params![
                step.id,
                step.title_en,
                step.title_ar,
                step.position,
                step.status.as_str(),
                step.version,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if rows == 0 {
        return Err(stale_or_missing(conn, STEPS, EntityType::TaskStep, &step.id));
    }
    Ok(())
}
