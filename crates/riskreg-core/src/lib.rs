//! # riskreg-core
//!
//! Foundation crate for the risk register rules engine.
//! Defines entity models, status enums, tagged update types, traits, errors,
//! config, role gates, and constants. Every other crate in the workspace depends on this.

pub mod authz;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod updates;

// Re-export the most commonly used types at the crate root.
pub use config::RiskRegConfig;
pub use errors::{RiskRegError, RiskRegResult};
pub use models::{
    ActorContext, ChangeLogEntry, EntityRef, EntityType, PlanStatus, Rating, RatingDomain,
    RequestStatus, ResidualRiskChangeRequest, Risk, Role, TaskStatus, TaskStep, TreatmentPlan,
    TreatmentTask,
};
