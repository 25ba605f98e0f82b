// Single source of truth for all default values.

use crate::models::{Rating, RatingThreshold, Role};

// --- Rating domains (evaluated high → low) ---
pub const DEFAULT_RISK_THRESHOLDS: [RatingThreshold; 4] = [
    RatingThreshold::new(20, Rating::Critical),
    RatingThreshold::new(12, Rating::High),
    RatingThreshold::new(6, Rating::Medium),
    RatingThreshold::new(1, Rating::Low),
];
pub const DEFAULT_COMPLIANCE_THRESHOLDS: [RatingThreshold; 4] = [
    RatingThreshold::new(16, Rating::Critical),
    RatingThreshold::new(10, Rating::High),
    RatingThreshold::new(5, Rating::Medium),
    RatingThreshold::new(1, Rating::Low),
];
pub const DEFAULT_RESIDUAL_REQUEST_THRESHOLDS: [RatingThreshold; 4] = [
    RatingThreshold::new(20, Rating::Critical),
    RatingThreshold::new(15, Rating::High),
    RatingThreshold::new(8, Rating::Medium),
    RatingThreshold::new(1, Rating::Low),
];

// --- Workflow ---
pub const DEFAULT_PRIVILEGED_ROLES: [Role; 2] = [Role::Admin, Role::RiskManager];

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "riskreg.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const MAX_READ_POOL_SIZE: usize = 8;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
