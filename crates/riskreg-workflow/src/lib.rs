//! # riskreg-workflow
//!
//! The residual-risk change request state machine (`pending` →
//! `approved` / `rejected`, or straight to `auto_approved` for privileged
//! requesters), tier-checked direct risk edits, and post-commit event
//! dispatch to notification handlers.

pub mod approval;
pub mod edits;
pub mod events;

pub use approval::ApprovalEngine;
pub use edits::RiskEditor;
pub use events::{DispatchReport, EventDispatcher, IWorkflowEventHandler, RecipientFanout};
