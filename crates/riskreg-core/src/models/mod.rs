//! Entity models for the risk register core.

pub mod actor;
pub mod change_log;
pub mod change_request;
pub mod entity;
pub mod field;
pub mod rating;
pub mod risk;
pub mod status;
pub mod treatment;
pub mod workflow_event;

pub use actor::{ActorContext, Role};
pub use change_log::{ChangeCategory, ChangeKind, ChangeLogEntry};
pub use change_request::{
    ChangeProposal, ResidualRiskChangeRequest, ResolveAction, Resolution,
};
pub use entity::{DeleteSummary, EntityRef, EntityType};
pub use field::{FieldMap, FieldValue, Snapshot, TrackedField};
pub use rating::{Rating, RatingDomain, RatingThreshold};
pub use risk::{NewRisk, Risk, RiskAssessment};
pub use status::{PlanStatus, RequestStatus, StepStatus, TaskStatus};
pub use treatment::{TaskStep, TreatmentPlan, TreatmentStrategy, TreatmentTask};
pub use workflow_event::{WorkflowEvent, WorkflowEventType};
