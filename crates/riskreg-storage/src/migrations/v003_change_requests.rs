//! V003: residual-risk change requests.

pub const MIGRATION_SQL: &str = r#"
-- Requests leave 'pending' exactly once, through a conditional UPDATE.
CREATE TABLE IF NOT EXISTS change_requests (
    id TEXT PRIMARY KEY,
    risk_id TEXT NOT NULL REFERENCES risks(id),
    requester_id TEXT NOT NULL,
    current_likelihood INTEGER NOT NULL,
    current_impact INTEGER NOT NULL,
    current_score INTEGER NOT NULL,
    current_rating TEXT NOT NULL,
    proposed_likelihood INTEGER NOT NULL CHECK (proposed_likelihood BETWEEN 1 AND 5),
    proposed_impact INTEGER NOT NULL CHECK (proposed_impact BETWEEN 1 AND 5),
    proposed_score INTEGER NOT NULL,
    proposed_rating TEXT NOT NULL,
    justification TEXT NOT NULL,
    status TEXT NOT NULL
        CHECK (status IN ('pending', 'approved', 'rejected', 'auto_approved')),
    reviewer_id TEXT,
    review_note TEXT,
    created_at TEXT NOT NULL,
    reviewed_at TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_change_requests_risk
    ON change_requests(risk_id, status);
"#;
