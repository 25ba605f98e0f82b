use crate::errors::RiskRegResult;
use crate::models::{
    ChangeLogEntry, DeleteSummary, EntityRef, RequestStatus, ResidualRiskChangeRequest,
    Resolution, Risk, TaskStep, TreatmentPlan, TreatmentTask,
};

/// Persistence consumed by the core engines.
///
/// Every method is one logical transaction. `update_*` methods are
/// optimistic: they succeed only if the stored `version` equals the
/// entity's `version`, store `version + 1`, and otherwise fail with
/// `ConflictReason::StaleWrite`. Change log entries passed alongside a write
/// are appended in the same transaction.
pub trait IRegisterStorage: Send + Sync {
    // --- Risks ---
    fn create_risk(&self, risk: &Risk, log: &[ChangeLogEntry]) -> RiskRegResult<()>;
    fn get_risk(&self, id: &str) -> RiskRegResult<Option<Risk>>;
    fn update_risk(&self, risk: &Risk, log: &[ChangeLogEntry]) -> RiskRegResult<()>;

    // --- Treatment plans ---
    fn create_plan(&self, plan: &TreatmentPlan) -> RiskRegResult<()>;
    fn get_plan(&self, id: &str) -> RiskRegResult<Option<TreatmentPlan>>;
    fn list_plans(&self, risk_id: &str) -> RiskRegResult<Vec<TreatmentPlan>>;
    fn update_plan(&self, plan: &TreatmentPlan, log: &[ChangeLogEntry]) -> RiskRegResult<()>;

    // --- Tasks (ordered by position) ---
    fn create_task(&self, task: &TreatmentTask) -> RiskRegResult<()>;
    fn get_task(&self, id: &str) -> RiskRegResult<Option<TreatmentTask>>;
    fn list_tasks(&self, plan_id: &str) -> RiskRegResult<Vec<TreatmentTask>>;
    fn update_task(&self, task: &TreatmentTask, log: &[ChangeLogEntry]) -> RiskRegResult<()>;

    // --- Steps (ordered by position) ---
    fn create_step(&self, step: &TaskStep) -> RiskRegResult<()>;
    fn get_step(&self, id: &str) -> RiskRegResult<Option<TaskStep>>;
    fn list_steps(&self, task_id: &str) -> RiskRegResult<Vec<TaskStep>>;
    fn update_step(&self, step: &TaskStep, log: &[ChangeLogEntry]) -> RiskRegResult<()>;

    /// Write a roll-up cascade in one transaction. Each present entity is
    /// version-checked like its `update_*` counterpart; any conflict rolls
    /// back every write in the call, including the log append.
    fn save_treatment_changes(
        &self,
        step: Option<&TaskStep>,
        task: Option<&TreatmentTask>,
        plan: Option<&TreatmentPlan>,
        log: &[ChangeLogEntry],
    ) -> RiskRegResult<()>;

    // --- Residual-risk change requests ---

    /// Insert a new request. When `applied` is given (auto-approval), the
    /// risk write and the log append commit atomically with the insert.
    fn insert_change_request(
        &self,
        request: &ResidualRiskChangeRequest,
        applied: Option<&Risk>,
        log: &[ChangeLogEntry],
    ) -> RiskRegResult<()>;

    /// Atomic conditional transition `pending → resolution.status`.
    ///
    /// Zero rows matched fails with `ConflictReason::AlreadyResolved`, and
    /// nothing else in the call is written. `applied` is written with the
    /// usual version check inside the same transaction.
    fn resolve_change_request(
        &self,
        resolution: &Resolution,
        applied: Option<&Risk>,
        log: &[ChangeLogEntry],
    ) -> RiskRegResult<()>;

    fn get_change_request(&self, id: &str) -> RiskRegResult<Option<ResidualRiskChangeRequest>>;
    fn list_change_requests(
        &self,
        risk_id: &str,
        status: Option<RequestStatus>,
    ) -> RiskRegResult<Vec<ResidualRiskChangeRequest>>;

    // --- Change log (append-only) ---
    fn append_change_log(&self, entries: &[ChangeLogEntry]) -> RiskRegResult<usize>;
    /// Entries for one subject, oldest first.
    fn change_log_for(&self, subject: &EntityRef) -> RiskRegResult<Vec<ChangeLogEntry>>;

    // --- Cascade ---

    /// Delete an entity and everything it owns, including the change log
    /// entries of every removed entity.
    fn delete_with_children(&self, target: &EntityRef) -> RiskRegResult<DeleteSummary>;
}
