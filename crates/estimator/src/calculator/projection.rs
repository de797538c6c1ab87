//! Cost aggregation and 12-month growth projection
//!
//! Job and storage spend compound at the configured monthly growth rate.
//! Warehouse spend is held flat.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::jobs::{calculate_job_costs, JobsCosts};
use super::storage::{calculate_storage_costs, StorageCosts};
use super::warehouse::{calculate_warehouse_costs, WarehouseCosts};
use crate::models::Workload;
use crate::rates::RateCard;

/// Length of the projection window in months
pub const PROJECTION_MONTHS: u32 = 12;

/// Spend category in the cost distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Databricks,
    S3,
    SqlWarehouse,
}

impl CostCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CostCategory::Databricks => "Databricks & Compute",
            CostCategory::S3 => "S3 Storage",
            CostCategory::SqlWarehouse => "SQL Warehouse",
        }
    }
}

/// Monthly totals per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostTotals {
    pub databricks: f64,
    pub storage: f64,
    pub warehouse: f64,
    pub grand_total: f64,
}

impl CostTotals {
    pub fn new(databricks: f64, storage: f64, warehouse: f64) -> Self {
        Self {
            databricks,
            storage,
            warehouse,
            grand_total: databricks + storage + warehouse,
        }
    }

    /// The portion of monthly spend subject to growth
    pub fn growing(&self) -> f64 {
        self.databricks + self.storage
    }
}

/// One category's slice of the monthly total
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostShare {
    pub category: CostCategory,
    pub amount: f64,
    pub share_percent: f64,
}

/// One month of the projection schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthProjection {
    /// 1-based month index; month 1 is the current monthly cost
    pub month: u32,
    pub growing_cost: f64,
    pub fixed_cost: f64,
    pub total: f64,
}

/// Full recomputation of a workload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub generated_at: DateTime<Utc>,
    pub growth_percent: f64,
    pub jobs: JobsCosts,
    pub storage: StorageCosts,
    pub warehouses: WarehouseCosts,
    pub totals: CostTotals,
    pub projected_annual: f64,
    pub distribution: Vec<CostShare>,
    pub schedule: Vec<MonthProjection>,
}

/// Sum of twelve months of spend
///
/// `growing_monthly` compounds at `growth_percent` per month starting from
/// month 1; `fixed_monthly` is added flat for every month.
pub fn project_annual(growing_monthly: f64, fixed_monthly: f64, growth_percent: f64) -> f64 {
    let months = f64::from(PROJECTION_MONTHS);

    let growing = if growth_percent > 0.0 {
        let ratio = 1.0 + growth_percent / 100.0;
        growing_monthly * (ratio.powi(PROJECTION_MONTHS as i32) - 1.0) / (ratio - 1.0)
    } else {
        growing_monthly * months
    };

    growing + fixed_monthly * months
}

/// Month-by-month breakdown whose totals add up to [`project_annual`]
pub fn monthly_schedule(
    growing_monthly: f64,
    fixed_monthly: f64,
    growth_percent: f64,
) -> Vec<MonthProjection> {
    let ratio = if growth_percent > 0.0 {
        1.0 + growth_percent / 100.0
    } else {
        1.0
    };

    (1..=PROJECTION_MONTHS)
        .map(|month| {
            let growing_cost = growing_monthly * ratio.powi(month as i32 - 1);
            MonthProjection {
                month,
                growing_cost,
                fixed_cost: fixed_monthly,
                total: growing_cost + fixed_monthly,
            }
        })
        .collect()
}

/// Category shares of the grand total, omitting zero-valued categories
pub fn cost_distribution(totals: &CostTotals) -> Vec<CostShare> {
    [
        (CostCategory::Databricks, totals.databricks),
        (CostCategory::S3, totals.storage),
        (CostCategory::SqlWarehouse, totals.warehouse),
    ]
    .into_iter()
    .filter(|(_, amount)| *amount > 0.0)
    .map(|(category, amount)| CostShare {
        category,
        amount,
        share_percent: amount / totals.grand_total * 100.0,
    })
    .collect()
}

/// Run every calculator over a workload and aggregate the results
pub fn estimate(workload: &Workload, rates: &RateCard) -> Estimate {
    let jobs = calculate_job_costs(workload, rates);
    let storage = calculate_storage_costs(&workload.storage, rates);
    let warehouses = calculate_warehouse_costs(&workload.warehouses, rates);

    let totals = CostTotals::new(jobs.total(), storage.total, warehouses.total);
    let growth_percent = workload.growth_percent;

    Estimate {
        generated_at: Utc::now(),
        growth_percent,
        projected_annual: project_annual(totals.growing(), totals.warehouse, growth_percent),
        distribution: cost_distribution(&totals),
        schedule: monthly_schedule(totals.growing(), totals.warehouse, growth_percent),
        jobs,
        storage,
        warehouses,
        totals,
    }
}
