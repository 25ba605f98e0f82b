//! V002: treatment plans, tasks, steps.

pub const MIGRATION_SQL: &str = r#"
-- Strict ownership tree: risk → plans → tasks → steps.
-- No ON DELETE CASCADE; deletes walk the tree explicitly.
CREATE TABLE IF NOT EXISTS treatment_plans (
    id TEXT PRIMARY KEY,
    risk_id TEXT NOT NULL REFERENCES risks(id),
    title_en TEXT NOT NULL,
    title_ar TEXT NOT NULL,
    strategy TEXT NOT NULL,
    status TEXT NOT NULL,
    progress INTEGER NOT NULL DEFAULT 0 CHECK (progress BETWEEN 0 AND 100),
    due_date TEXT,
    owner_id TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 1
) STRICT;

CREATE INDEX IF NOT EXISTS idx_plans_risk ON treatment_plans(risk_id);
CREATE INDEX IF NOT EXISTS idx_plans_due ON treatment_plans(due_date)
    WHERE due_date IS NOT NULL;

CREATE TABLE IF NOT EXISTS treatment_tasks (
    id TEXT PRIMARY KEY,
    plan_id TEXT NOT NULL REFERENCES treatment_plans(id),
    title_en TEXT NOT NULL,
    title_ar TEXT NOT NULL,
    position INTEGER NOT NULL,
    status TEXT NOT NULL,
    assignee_id TEXT,
    version INTEGER NOT NULL DEFAULT 1
) STRICT;

CREATE INDEX IF NOT EXISTS idx_tasks_plan ON treatment_tasks(plan_id, position);

CREATE TABLE IF NOT EXISTS task_steps (
    id TEXT PRIMARY KEY,
    task_id TEXT NOT NULL REFERENCES treatment_tasks(id),
    title_en TEXT NOT NULL,
    title_ar TEXT NOT NULL,
    position INTEGER NOT NULL,
    status TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 1
) STRICT;

CREATE INDEX IF NOT EXISTS idx_steps_task ON task_steps(task_id, position);
"#;
