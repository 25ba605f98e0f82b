//! StorageEngine: owns the ConnectionPool and implements IRegisterStorage.

use std::path::Path;

use riskreg_core::config::StorageConfig;
use riskreg_core::errors::RiskRegResult;
use riskreg_core::models::{
    ChangeLogEntry, DeleteSummary, EntityRef, RequestStatus, ResidualRiskChangeRequest,
    Resolution, Risk, TaskStep, TreatmentPlan, TreatmentTask,
};
use riskreg_core::traits::IRegisterStorage;

use crate::migrations;
use crate::pool::{with_immediate_transaction, ConnectionPool};
use crate::queries::{
    cascade_ops, change_log_ops, change_request_ops, risk_ops, treatment_ops,
};

/// SQLite-backed register storage.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a database file with default storage settings.
    pub fn open(path: &Path) -> RiskRegResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    /// Open a database file: pragmas, migrations, then the read pool.
    pub fn open_with_config(path: &Path, config: &StorageConfig) -> RiskRegResult<Self> {
        let mut pool = ConnectionPool::open(path, config)?;
        pool.with_writer(migrations::run_migrations)?;
        pool.attach_readers(config)?;
        tracing::info!(
            path = %path.display(),
            readers = pool.read_pool_size(),
            "storage opened"
        );
        Ok(Self { pool })
    }

    /// Open an in-memory database (for testing). Reads share the writer.
    pub fn open_in_memory() -> RiskRegResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        pool.with_writer(migrations::run_migrations)?;
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Run `f` in one BEGIN IMMEDIATE transaction on the writer.
    fn write<F, T>(&self, f: F) -> RiskRegResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> RiskRegResult<T>,
    {
        self.pool
            .with_writer(|conn| with_immediate_transaction(conn, |tx| f(tx)))
    }
}

impl IRegisterStorage for StorageEngine {
    fn create_risk(&self, risk: &Risk, log: &[ChangeLogEntry]) -> RiskRegResult<()> {
        self.write(|conn| {
            risk_ops::insert_risk(conn, risk)?;
            change_log_ops::append_entries(conn, log)?;
            Ok(())
        })
    }

    fn get_risk(&self, id: &str) -> RiskRegResult<Option<Risk>> {
        self.pool.with_reader(|conn| risk_ops::get_risk(conn, id))
    }

    fn update_risk(&self, risk: &Risk, log: &[ChangeLogEntry]) -> RiskRegResult<()> {
        self.write(|conn| {
            risk_ops::update_risk(conn, risk)?;
            change_log_ops::append_entries(conn, log)?;
            Ok(())
        })
    }

    fn create_plan(&self, plan: &TreatmentPlan) -> RiskRegResult<()> {
        self.write(|conn| treatment_ops::insert_plan(conn, plan))
    }

    fn get_plan(&self, id: &str) -> RiskRegResult<Option<TreatmentPlan>> {
        self.pool.with_reader(|conn| treatment_ops::get_plan(conn, id))
    }

    fn list_plans(&self, risk_id: &str) -> RiskRegResult<Vec<TreatmentPlan>> {
        self.pool.with_reader(|conn| treatment_ops::list_plans(conn, risk_id))
    }

    fn update_plan(&self, plan: &TreatmentPlan, log: &[ChangeLogEntry]) -> RiskRegResult<()> {
        self.write(|conn| {
            treatment_ops::update_plan(conn, plan)?;
            change_log_ops::append_entries(conn, log)?;
            Ok(())
        })
    }

    fn create_task(&self, task: &TreatmentTask) -> RiskRegResult<()> {
        self.write(|conn| treatment_ops::insert_task(conn, task))
    }

    fn get_task(&self, id: &str) -> RiskRegResult<Option<TreatmentTask>> {
        self.pool.with_reader(|conn| treatment_ops::get_task(conn, id))
    }

    fn list_tasks(&self, plan_id: &str) -> RiskRegResult<Vec<TreatmentTask>> {
        self.pool.with_reader(|conn| treatment_ops::list_tasks(conn, plan_id))
    }

    fn update_task(&self, task: &TreatmentTask, log: &[ChangeLogEntry]) -> RiskRegResult<()> {
        self.write(|conn| {
            treatment_ops::update_task(conn, task)?;
            change_log_ops::append_entries(conn, log)?;
            Ok(())
        })
    }

    fn create_step(&self, step: &TaskStep) -> RiskRegResult<()> {
        self.write(|conn| treatment_ops::insert_step(conn, step))
    }

    fn get_step(&self, id: &str) -> RiskRegResult<Option<TaskStep>> {
        self.pool.with_reader(|conn| treatment_ops::get_step(conn, id))
    }

    fn list_steps(&self, task_id: &str) -> RiskRegResult<Vec<TaskStep>> {
        self.pool.with_reader(|conn| treatment_ops::list_steps(conn, task_id))
    }

    fn update_step(&self, step: &TaskStep, log: &[ChangeLogEntry]) -> RiskRegResult<()> {
        self.write(|conn| {
            treatment_ops::update_step(conn, step)?;
            change_log_ops::append_entries(conn, log)?;
            Ok(())
        })
    }

    fn save_treatment_changes(
        &self,
        step: Option<&TaskStep>,
        task: Option<&TreatmentTask>,
        plan: Option<&TreatmentPlan>,
        log: &[ChangeLogEntry],
    ) -> RiskRegResult<()> {
        self.write(|conn| {
            if let Some(step) = step {
                treatment_ops::update_step(conn, step)?;
            }
            if let Some(task) = task {
                treatment_ops::update_task(conn, task)?;
            }
            if let Some(plan) = plan {
                treatment_ops::update_plan(conn, plan)?;
            }
            change_log_ops::append_entries(conn, log)?;
            Ok(())
        })
    }

    fn insert_change_request(
        &self,
        request: &ResidualRiskChangeRequest,
        applied: Option<&Risk>,
        log: &[ChangeLogEntry],
    ) -> RiskRegResult<()> {
        self.write(|conn| {
            change_request_ops::insert_request(conn, request)?;
            if let Some(risk) = applied {
                risk_ops::update_risk(conn, risk)?;
            }
            change_log_ops::append_entries(conn, log)?;
            Ok(())
        })
    }

    fn resolve_change_request(
        &self,
        resolution: &Resolution,
        applied: Option<&Risk>,
        log: &[ChangeLogEntry],
    ) -> RiskRegResult<()> {
        self.write(|conn| {
            change_request_ops::resolve_request(conn, resolution)?;
            if let Some(risk) = applied {
                risk_ops::update_risk(conn, risk)?;
            }
            change_log_ops::append_entries(conn, log)?;
            Ok(())
        })
    }

    fn get_change_request(&self, id: &str) -> RiskRegResult<Option<ResidualRiskChangeRequest>> {
        self.pool
            .with_reader(|conn| change_request_ops::get_request(conn, id))
    }

    fn list_change_requests(
        &self,
        risk_id: &str,
        status: Option<RequestStatus>,
    ) -> RiskRegResult<Vec<ResidualRiskChangeRequest>> {
        self.pool
            .with_reader(|conn| change_request_ops::list_requests(conn, risk_id, status))
    }

    fn append_change_log(&self, entries: &[ChangeLogEntry]) -> RiskRegResult<usize> {
        self.write(|conn| change_log_ops::append_entries(conn, entries))
    }

    fn change_log_for(&self, subject: &EntityRef) -> RiskRegResult<Vec<ChangeLogEntry>> {
        self.pool
            .with_reader(|conn| change_log_ops::entries_for(conn, subject))
    }

    fn delete_with_children(&self, target: &EntityRef) -> RiskRegResult<DeleteSummary> {
        self.write(|conn| cascade_ops::delete_with_children(conn, target))
    }
}
