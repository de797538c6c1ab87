//! Pricing calculators
//!
//! Each calculator is a pure function of its slice of the workload and
//! the rate card. They share no state and may run in any order.

mod jobs;
mod projection;
mod storage;
mod warehouse;

pub use jobs::{
    calculate_job_costs, calculate_tier_costs, cost_job, JobCost, JobsCosts, JobsSummary,
    TierCosts,
};
pub use projection::{
    cost_distribution, estimate, monthly_schedule, project_annual, CostCategory, CostShare,
    CostTotals, Estimate, MonthProjection, PROJECTION_MONTHS,
};
pub use storage::{calculate_storage_costs, estimated_gb, StorageCosts, ZoneCost};
pub use warehouse::{calculate_warehouse_costs, cost_warehouse, WarehouseCost, WarehouseCosts};
