//! Structured logging for estimator events

use tracing::{info, warn};

use crate::calculator::Estimate;
use crate::error::WorkloadError;
use crate::models::Workload;

/// Structured logger for workload and estimate events
///
/// Emits consistent key/value events so runs can be compared in JSON logs.
#[derive(Clone)]
pub struct EstimateLogger {
    source: String,
}

impl EstimateLogger {
    /// `source` names where the workload came from, e.g. a file path
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Log a workload accepted for estimation
    pub fn log_workload_loaded(&self, workload: &Workload) {
        info!(
            event = "workload_loaded",
            source = %self.source,
            jobs = workload.job_count(),
            direct_zones = workload.storage.direct.len(),
            table_zones = workload.storage.table_based.len(),
            storage_method = %workload.storage.method,
            warehouses = workload.warehouses.len(),
            growth_percent = workload.growth_percent,
            "Workload loaded"
        );
    }

    /// Log a workload rejected by validation
    pub fn log_validation_failure(&self, error: &WorkloadError) {
        warn!(
            event = "workload_rejected",
            source = %self.source,
            error = %error,
            "Workload failed validation"
        );
    }

    /// Log a completed estimate
    pub fn log_estimate(&self, estimate: &Estimate) {
        info!(
            event = "estimate_computed",
            source = %self.source,
            databricks = estimate.totals.databricks,
            storage = estimate.totals.storage,
            warehouse = estimate.totals.warehouse,
            grand_total = estimate.totals.grand_total,
            growth_percent = estimate.growth_percent,
            projected_annual = estimate.projected_annual,
            "Estimate computed"
        );
    }
}
