//! # riskreg-rollup
//!
//! Derives task status from its steps and plan status/progress from its
//! tasks. The formulas are pure; `TreatmentEngine` loads the tree, applies
//! them after every step or task mutation, and persists only what changed.

pub mod engine;
pub mod formula;

pub use engine::{RollupOutcome, TreatmentEngine};
pub use formula::{
    derive_task_status, progress_percent, recalculate_task_status, recalculate_treatment_status,
};
