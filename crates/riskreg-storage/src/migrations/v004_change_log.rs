//! V004: append-only change log.

pub const MIGRATION_SQL: &str = r#"
-- Field-level audit entries. Rows are inserted and, when their subject is
-- deleted, removed with it. Nothing updates them.
CREATE TABLE IF NOT EXISTS change_log (
    id TEXT PRIMARY KEY,
    batch_id TEXT NOT NULL,
    entity_type TEXT NOT NULL,
    entity_id TEXT NOT NULL,
    actor_id TEXT NOT NULL,
    field_name TEXT NOT NULL,
    label_en TEXT NOT NULL,
    label_ar TEXT NOT NULL,
    old_value TEXT NOT NULL,
    new_value TEXT NOT NULL,
    category TEXT NOT NULL,
    kind TEXT NOT NULL,
    description_en TEXT NOT NULL,
    description_ar TEXT NOT NULL,
    created_at TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_change_log_subject
    ON change_log(entity_type, entity_id);
CREATE INDEX IF NOT EXISTS idx_change_log_batch ON change_log(batch_id);
"#;
