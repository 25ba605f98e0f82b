//! Span names for the top-level operations.

pub mod names {
    pub const ROLLUP: &str = "riskreg.rollup";
    pub const APPROVAL_SUBMIT: &str = "riskreg.approval.submit";
    pub const APPROVAL_RESOLVE: &str = "riskreg.approval.resolve";
    pub const RISK_EDIT: &str = "riskreg.risk_edit";
}
