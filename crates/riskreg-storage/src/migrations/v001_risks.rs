//! V001: risks.

pub const MIGRATION_SQL: &str = r#"
-- Risks: bilingual text, ownership, inherent and residual assessments.
-- Scores and ratings are stored denormalized; the engines keep them in step
-- with likelihood × impact.
CREATE TABLE IF NOT EXISTS risks (
    id TEXT PRIMARY KEY,
    title_en TEXT NOT NULL,
    title_ar TEXT NOT NULL,
    description_en TEXT NOT NULL DEFAULT '',
    description_ar TEXT NOT NULL DEFAULT '',
    department_id TEXT NOT NULL,
    owner_id TEXT,
    inherent_likelihood INTEGER NOT NULL CHECK (inherent_likelihood BETWEEN 1 AND 5),
    inherent_impact INTEGER NOT NULL CHECK (inherent_impact BETWEEN 1 AND 5),
    inherent_score INTEGER NOT NULL,
    inherent_rating TEXT NOT NULL,
    residual_likelihood INTEGER NOT NULL CHECK (residual_likelihood BETWEEN 1 AND 5),
    residual_impact INTEGER NOT NULL CHECK (residual_impact BETWEEN 1 AND 5),
    residual_score INTEGER NOT NULL,
    residual_rating TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 1
) STRICT;

CREATE INDEX IF NOT EXISTS idx_risks_department ON risks(department_id);
CREATE INDEX IF NOT EXISTS idx_risks_owner ON risks(owner_id)
    WHERE owner_id IS NOT NULL;
"#;
