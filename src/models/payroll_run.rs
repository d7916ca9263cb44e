//! Payroll run model and workflow state machine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow state of a payroll run.
///
/// A run moves `Draft -> Calculated -> Approved -> Exported`. It may return
/// from `Calculated` to `Draft` (which discards its items for a clean
/// recalculation) and may be cancelled from `Draft` or `Calculated` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Created, not yet calculated.
    Draft,
    /// Items calculated and totals aggregated.
    Calculated,
    /// Approved by the external approval workflow.
    Approved,
    /// Export files generated by the export collaborator.
    Exported,
    /// Abandoned; items are kept but marked superseded.
    Cancelled,
}

impl RunStatus {
    /// Returns true if the state machine permits moving to `next`.
    pub fn can_transition_to(self, next: RunStatus) -> bool {
        use RunStatus::*;
        matches!(
            (self, next),
            (Draft, Calculated)
                | (Draft, Cancelled)
                | (Calculated, Draft)
                | (Calculated, Approved)
                | (Calculated, Cancelled)
                | (Approved, Exported)
        )
    }

    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Draft => "draft",
            RunStatus::Calculated => "calculated",
            RunStatus::Approved => "approved",
            RunStatus::Exported => "exported",
            RunStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate totals over a run's successfully calculated items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Number of items calculated.
    pub staff_count: u32,
    /// Sum of prorated monthly gross over items.
    pub gross: Decimal,
    /// Sum of total deductions over items.
    pub deductions: Decimal,
    /// Sum of net pay over items.
    pub net_pay: Decimal,
    /// Sum of credit-to-bank over items.
    pub credit_to_bank: Decimal,
}

/// One payroll run for a client and period.
///
/// At most one non-cancelled run may exist per `(client, month, year)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique run identifier.
    pub id: Uuid,
    /// The client the run belongs to.
    pub client_id: String,
    /// Payroll month (1-12).
    pub month: u32,
    /// Payroll year.
    pub year: i32,
    /// Current workflow state.
    pub status: RunStatus,
    /// Aggregate totals; zeroed until the run is calculated.
    pub totals: RunTotals,
    /// When the run was created.
    pub created_at: DateTime<Utc>,
    /// When the run was last calculated.
    #[serde(default)]
    pub calculated_at: Option<DateTime<Utc>>,
    /// When the run was approved.
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    /// Who approved the run.
    #[serde(default)]
    pub approved_by: Option<String>,
    /// When the run was exported.
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
    /// When the run was cancelled.
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl PayrollRun {
    /// Creates a new run in `Draft` state.
    pub fn new(client_id: impl Into<String>, month: u32, year: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: client_id.into(),
            month,
            year,
            status: RunStatus::Draft,
            totals: RunTotals::default(),
            created_at: Utc::now(),
            calculated_at: None,
            approved_at: None,
            approved_by: None,
            exported_at: None,
            cancelled_at: None,
        }
    }
}
