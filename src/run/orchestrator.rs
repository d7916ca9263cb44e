//! Payroll run orchestration.
//!
//! The orchestrator owns the run workflow: it creates runs, drives the
//! per-staff item calculation over a bounded worker pool, aggregates totals,
//! and applies the approval/export/cancel transitions requested by external
//! collaborators.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_item;
use crate::config::SettingsRegistry;
use crate::error::{EngineError, EngineResult};
use crate::models::{ComponentCatalog, PayrollItem, PayrollRun, RunStatus, RunTotals};

use super::providers::{AttendanceSource, StaffDirectory};
use super::store::RunStore;

/// One staff member whose item could not be calculated.
#[derive(Debug)]
pub struct ItemFailure {
    /// The staff member the failure belongs to.
    pub staff_id: String,
    /// Display name, for the failure report.
    pub staff_name: String,
    /// What went wrong.
    pub error: EngineError,
}

/// The result of the draft-to-calculated transition.
#[derive(Debug)]
pub struct CalculationOutcome {
    /// The run after calculation, with aggregated totals.
    pub run: PayrollRun,
    /// Staff ids whose items were calculated, in id order.
    pub succeeded: Vec<String>,
    /// Staff whose items failed, in id order; the run still completes.
    pub failed: Vec<ItemFailure>,
}

/// Drives payroll runs through their lifecycle.
pub struct RunOrchestrator {
    store: RunStore,
    registry: RwLock<SettingsRegistry>,
    catalog: Arc<ComponentCatalog>,
    staff: Arc<dyn StaffDirectory>,
    attendance: Arc<dyn AttendanceSource>,
    workers: usize,
}

impl RunOrchestrator {
    /// Creates an orchestrator over the given configuration and
    /// collaborators, with a worker pool sized to the available cores.
    pub fn new(
        registry: SettingsRegistry,
        catalog: ComponentCatalog,
        staff: Arc<dyn StaffDirectory>,
        attendance: Arc<dyn AttendanceSource>,
    ) -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self {
            store: RunStore::new(),
            registry: RwLock::new(registry),
            catalog: Arc::new(catalog),
            staff,
            attendance,
            workers,
        }
    }

    fn registry_read(&self) -> RwLockReadGuard<'_, SettingsRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies an edit to the settings registry.
    ///
    /// Runs already mid-calculation are unaffected: their rates were
    /// snapshotted when the calculation started.
    pub fn edit_settings<R>(&self, edit: impl FnOnce(&mut SettingsRegistry) -> R) -> R {
        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        edit(&mut registry)
    }

    /// Creates a payroll run for a client and period, in `Draft` state.
    ///
    /// Fails with `DuplicatePeriod` when a non-cancelled run already exists
    /// for the triple, or `InvalidPeriod` for a month outside 1-12.
    pub fn create_run(&self, client_id: &str, month: u32, year: i32) -> EngineResult<PayrollRun> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod { month, year });
        }
        let run = PayrollRun::new(client_id, month, year);
        self.store.insert_run(run.clone())?;
        info!(run_id = %run.id, client_id, month, year, "Payroll run created");
        Ok(run)
    }

    /// Calculates every staff member's item for a draft run.
    ///
    /// Settings are snapshotted once before any item is calculated, so every
    /// item of the run uses the same rates. Staff-level failures (missing
    /// attendance, missing pay grade, unknown component, zero expected days)
    /// are collected into the outcome's failure list while the rest of the
    /// run proceeds; a broken settings registry or bracket table aborts the
    /// whole transition before any item is written.
    pub async fn calculate_run(&self, run_id: Uuid) -> EngineResult<CalculationOutcome> {
        let run = self.store.get_run(run_id)?;
        if !run.status.can_transition_to(RunStatus::Calculated) {
            return Err(EngineError::InvalidStateTransition {
                run_id,
                from: run.status.to_string(),
                to: RunStatus::Calculated.to_string(),
            });
        }

        let as_of = NaiveDate::from_ymd_opt(run.year, run.month, 1).ok_or(
            EngineError::InvalidPeriod {
                month: run.month,
                year: run.year,
            },
        )?;
        let snapshot = Arc::new(self.registry_read().snapshot(as_of)?);

        let mut staff_list = self.staff.staff_for_client(&run.client_id);
        staff_list.sort_by(|a, b| a.id.cmp(&b.id));
        info!(
            run_id = %run_id,
            client_id = %run.client_id,
            staff_count = staff_list.len(),
            "Calculating payroll run"
        );

        // Resolve collaborator inputs up front; anything missing blocks only
        // that staff member.
        let mut failed: Vec<ItemFailure> = Vec::new();
        let mut pending = Vec::new();
        for staff in staff_list {
            let Some(grade) = self.staff.active_pay_grade(&staff.id) else {
                failed.push(ItemFailure {
                    staff_id: staff.id.clone(),
                    staff_name: staff.full_name(),
                    error: EngineError::PayGradeNotFound {
                        staff_id: staff.id.clone(),
                    },
                });
                continue;
            };
            let Some(record) = self
                .attendance
                .attendance_record(&staff.id, run.month, run.year)
            else {
                failed.push(ItemFailure {
                    staff_id: staff.id.clone(),
                    staff_name: staff.full_name(),
                    error: EngineError::AttendanceMissing {
                        staff_id: staff.id.clone(),
                        month: run.month,
                        year: run.year,
                    },
                });
                continue;
            };
            pending.push((staff, grade, record));
        }

        // Items share no mutable state, so they fan out over a pool bounded
        // by the core count.
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();
        for (staff, grade, record) in pending {
            let snapshot = Arc::clone(&snapshot);
            let catalog = Arc::clone(&self.catalog);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let result = calculate_item(&staff, &grade, &record, &snapshot, &catalog, run_id);
                (staff.id.clone(), staff.full_name(), result)
            });
        }

        let mut calculated: Vec<PayrollItem> = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, _, Ok(item))) => calculated.push(item),
                Ok((staff_id, staff_name, Err(error))) => {
                    warn!(run_id = %run_id, staff_id = %staff_id, error = %error, "Item calculation failed");
                    failed.push(ItemFailure {
                        staff_id,
                        staff_name,
                        error,
                    });
                }
                Err(join_error) => {
                    warn!(run_id = %run_id, error = %join_error, "Item calculation task aborted");
                }
            }
        }
        calculated.sort_by(|a, b| a.staff_id.cmp(&b.staff_id));
        failed.sort_by(|a, b| a.staff_id.cmp(&b.staff_id));

        let mut totals = RunTotals::default();
        let mut succeeded = Vec::with_capacity(calculated.len());
        for item in &calculated {
            totals.staff_count += 1;
            totals.gross += item.prorated_monthly_gross;
            totals.deductions += item.total_deductions;
            totals.net_pay += item.net_pay;
            totals.credit_to_bank += item.credit_to_bank;
            succeeded.push(item.staff_id.clone());
        }
        for item in calculated {
            // The run is still Draft, so leftover items from an earlier
            // calculation of the same draft are replaced.
            self.store.insert_item(item, true)?;
        }

        let mut run = self.store.get_run(run_id)?;
        run.status = RunStatus::Calculated;
        run.totals = totals;
        run.calculated_at = Some(Utc::now());
        self.store.put_run(run.clone())?;

        info!(
            run_id = %run_id,
            processed = succeeded.len(),
            failed = failed.len(),
            total_net = %run.totals.net_pay,
            "Payroll run calculated"
        );

        Ok(CalculationOutcome {
            run,
            succeeded,
            failed,
        })
    }

    /// Records an approval from the external approval workflow.
    ///
    /// Only checks that the run is in `Calculated` state and stamps the
    /// approval metadata; nothing is recomputed.
    pub fn apply_approval(
        &self,
        run_id: Uuid,
        approver_id: &str,
        timestamp: DateTime<Utc>,
    ) -> EngineResult<PayrollRun> {
        let mut run = self.store.get_run(run_id)?;
        self.check_transition(&run, RunStatus::Approved)?;
        run.status = RunStatus::Approved;
        run.approved_at = Some(timestamp);
        run.approved_by = Some(approver_id.to_string());
        self.store.put_run(run.clone())?;
        info!(run_id = %run_id, approver_id, "Payroll run approved");
        Ok(run)
    }

    /// Records that the export collaborator produced files for the run.
    pub fn mark_exported(&self, run_id: Uuid, timestamp: DateTime<Utc>) -> EngineResult<PayrollRun> {
        let mut run = self.store.get_run(run_id)?;
        self.check_transition(&run, RunStatus::Exported)?;
        run.status = RunStatus::Exported;
        run.exported_at = Some(timestamp);
        self.store.put_run(run.clone())?;
        info!(run_id = %run_id, "Payroll run exported");
        Ok(run)
    }

    /// Returns a calculated run to `Draft`, discarding its items.
    ///
    /// A reopened run is always recalculated from scratch; patching items in
    /// place under changed settings would break determinism.
    pub fn reopen_run(&self, run_id: Uuid) -> EngineResult<PayrollRun> {
        let mut run = self.store.get_run(run_id)?;
        self.check_transition(&run, RunStatus::Draft)?;
        run.status = RunStatus::Draft;
        run.totals = RunTotals::default();
        run.calculated_at = None;
        self.store.delete_items(run_id);
        self.store.put_run(run.clone())?;
        info!(run_id = %run_id, "Payroll run reopened; items discarded");
        Ok(run)
    }

    /// Cancels a run before approval.
    ///
    /// Items are marked superseded and kept for the audit trail.
    pub fn cancel_run(&self, run_id: Uuid) -> EngineResult<PayrollRun> {
        let mut run = self.store.get_run(run_id)?;
        self.check_transition(&run, RunStatus::Cancelled)?;
        run.status = RunStatus::Cancelled;
        run.cancelled_at = Some(Utc::now());
        self.store.mark_items_superseded(run_id);
        self.store.put_run(run.clone())?;
        info!(run_id = %run_id, "Payroll run cancelled");
        Ok(run)
    }

    /// Returns the run with its current totals.
    pub fn run_summary(&self, run_id: Uuid) -> EngineResult<PayrollRun> {
        self.store.get_run(run_id)
    }

    /// Returns a run's items, ordered by staff id.
    pub fn list_items(&self, run_id: Uuid) -> EngineResult<Vec<PayrollItem>> {
        self.store.get_run(run_id)?;
        Ok(self.store.items(run_id))
    }

    fn check_transition(&self, run: &PayrollRun, to: RunStatus) -> EngineResult<()> {
        if run.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(EngineError::InvalidStateTransition {
                run_id: run.id,
                from: run.status.to_string(),
                to: to.to_string(),
            })
        }
    }
}
