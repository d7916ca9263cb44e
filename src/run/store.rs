//! In-memory persistence for payroll runs and items.
//!
//! The store owns the uniqueness rules: at most one non-cancelled run per
//! `(client, month, year)` and at most one item per `(run, staff)`. A
//! database-backed store can replace this without touching the calculation
//! path, since both rules are enforced here rather than in callers.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollItem, PayrollRun, RunStatus};

#[derive(Debug, Default)]
struct StoreInner {
    runs: HashMap<Uuid, PayrollRun>,
    items: HashMap<Uuid, BTreeMap<String, PayrollItem>>,
}

/// Thread-safe store of payroll runs and their items.
#[derive(Debug, Default)]
pub struct RunStore {
    inner: RwLock<StoreInner>,
}

impl RunStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts a new run.
    ///
    /// Fails with `DuplicatePeriod` when a non-cancelled run already exists
    /// for the same client and period.
    pub fn insert_run(&self, run: PayrollRun) -> EngineResult<()> {
        let mut inner = self.write();
        let duplicate = inner.runs.values().any(|existing| {
            existing.status != RunStatus::Cancelled
                && existing.client_id == run.client_id
                && existing.month == run.month
                && existing.year == run.year
        });
        if duplicate {
            return Err(EngineError::DuplicatePeriod {
                client_id: run.client_id.clone(),
                month: run.month,
                year: run.year,
            });
        }
        inner.runs.insert(run.id, run);
        Ok(())
    }

    /// Returns a copy of the run.
    pub fn get_run(&self, run_id: Uuid) -> EngineResult<PayrollRun> {
        self.read()
            .runs
            .get(&run_id)
            .cloned()
            .ok_or(EngineError::RunNotFound { run_id })
    }

    /// Replaces an existing run's row.
    pub fn put_run(&self, run: PayrollRun) -> EngineResult<()> {
        let mut inner = self.write();
        if !inner.runs.contains_key(&run.id) {
            return Err(EngineError::RunNotFound { run_id: run.id });
        }
        inner.runs.insert(run.id, run);
        Ok(())
    }

    /// Inserts a payroll item for its run.
    ///
    /// When `allow_replace` is false, a duplicate `(run, staff)` insert
    /// fails with `ItemAlreadyExists`. Replacement is only permitted while
    /// the owning run is still in `Draft`, which the orchestrator guarantees
    /// by recalculating only from that state.
    pub fn insert_item(&self, item: PayrollItem, allow_replace: bool) -> EngineResult<()> {
        let mut inner = self.write();
        let run_items = inner.items.entry(item.run_id).or_default();
        if !allow_replace && run_items.contains_key(&item.staff_id) {
            return Err(EngineError::ItemAlreadyExists {
                run_id: item.run_id,
                staff_id: item.staff_id.clone(),
            });
        }
        run_items.insert(item.staff_id.clone(), item);
        Ok(())
    }

    /// Deletes every item belonging to a run.
    pub fn delete_items(&self, run_id: Uuid) {
        self.write().items.remove(&run_id);
    }

    /// Flags every item of a run as superseded, keeping them for audit.
    pub fn mark_items_superseded(&self, run_id: Uuid) {
        if let Some(run_items) = self.write().items.get_mut(&run_id) {
            for item in run_items.values_mut() {
                item.superseded = true;
            }
        }
    }

    /// Returns copies of a run's items, ordered by staff id.
    pub fn items(&self, run_id: Uuid) -> Vec<PayrollItem> {
        self.read()
            .items
            .get(&run_id)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default()
    }
}
