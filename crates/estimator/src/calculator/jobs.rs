//! Job compute cost calculation
//!
//! Prices each job row's instance time and DBU consumption and rolls
//! them up per tier.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{JobRow, Tier, Workload};
use crate::rates::RateCard;

/// A job row annotated with its computed costs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCost {
    #[serde(flatten)]
    pub job: JobRow,
    /// Tier base rate with the Photon premium applied
    pub effective_dbu_rate: f64,
    /// Instance hourly rate with the spot discount applied
    pub effective_instance_rate: f64,
    pub dbu_cost: f64,
    pub instance_cost: f64,
    pub total_cost: f64,
}

/// Row breakdown and totals for one tier
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TierCosts {
    pub rows: Vec<JobCost>,
    pub dbu_cost: f64,
    pub instance_cost: f64,
}

impl TierCosts {
    pub fn total(&self) -> f64 {
        self.dbu_cost + self.instance_cost
    }
}

/// Totals across every tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct JobsSummary {
    pub job_count: usize,
    pub dbu_cost: f64,
    pub instance_cost: f64,
    pub total_cost: f64,
}

/// Costs for all tiers of a workload
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobsCosts {
    pub tiers: BTreeMap<Tier, TierCosts>,
    pub summary: JobsSummary,
}

impl JobsCosts {
    /// Combined DBU and instance cost, the Databricks share of the bill
    pub fn total(&self) -> f64 {
        self.summary.total_cost
    }
}

/// Price a single job row
///
/// The DBU cost counts node-hours only; the effective DBU rate is
/// reported alongside it but not multiplied in.
pub fn cost_job(job: &JobRow, base_dbu_rate: f64, rates: &RateCard) -> JobCost {
    let effective_dbu_rate = if job.photon_enabled {
        base_dbu_rate * rates.photon_premium
    } else {
        base_dbu_rate
    };

    let spot_multiplier = if job.spot_enabled {
        rates.spot_discount
    } else {
        1.0
    };
    let effective_instance_rate = rates.instance_rate(&job.instance_type) * spot_multiplier;

    let node_hours = job.node_hours();
    let instance_cost = node_hours * effective_instance_rate;
    let dbu_cost = node_hours;

    JobCost {
        job: job.clone(),
        effective_dbu_rate,
        effective_instance_rate,
        dbu_cost,
        instance_cost,
        total_cost: dbu_cost + instance_cost,
    }
}

/// Price a tier's ordered job list against its base DBU rate
pub fn calculate_tier_costs(jobs: &[JobRow], base_dbu_rate: f64, rates: &RateCard) -> TierCosts {
    let rows: Vec<JobCost> = jobs
        .iter()
        .map(|job| cost_job(job, base_dbu_rate, rates))
        .collect();

    let dbu_cost = rows.iter().fold(0.0, |acc, r| acc + r.dbu_cost);
    let instance_cost = rows.iter().fold(0.0, |acc, r| acc + r.instance_cost);

    TierCosts {
        rows,
        dbu_cost,
        instance_cost,
    }
}

/// Price every tier of a workload
pub fn calculate_job_costs(workload: &Workload, rates: &RateCard) -> JobsCosts {
    let tiers: BTreeMap<Tier, TierCosts> = workload
        .jobs_by_tier()
        .into_iter()
        .map(|(tier, jobs)| (tier, calculate_tier_costs(jobs, rates.dbu_rate(tier), rates)))
        .collect();

    let dbu_cost: f64 = tiers.values().fold(0.0, |acc, t| acc + t.dbu_cost);
    let instance_cost: f64 = tiers.values().fold(0.0, |acc, t| acc + t.instance_cost);

    let summary = JobsSummary {
        job_count: tiers.values().map(|t| t.rows.len()).sum(),
        dbu_cost,
        instance_cost,
        total_cost: dbu_cost + instance_cost,
    };

    JobsCosts { tiers, summary }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates_with_instance(name: &str, hourly: f64) -> RateCard {
        let mut rates = RateCard::standard();
        rates.instance_rates.insert(name.to_string(), hourly);
        rates
    }

    fn job(runtime_hours: f64, runs_per_month: u32, node_count: u32) -> JobRow {
        JobRow {
            sequence_number: 1,
            name: "job".to_string(),
            runtime_hours,
            runs_per_month,
            instance_type: "test.large".to_string(),
            node_count,
            photon_enabled: false,
            spot_enabled: false,
        }
    }

    #[test]
    fn test_reference_job_scenario() {
        let rates = rates_with_instance("test.large", 0.50);
        let cost = cost_job(&job(2.0, 10, 1), 0.30, &rates);

        assert!((cost.instance_cost - 10.0).abs() < 1e-9);
        assert!((cost.dbu_cost - 20.0).abs() < 1e-9);
        assert!((cost.total_cost - 30.0).abs() < 1e-9);
        assert!((cost.effective_dbu_rate - 0.30).abs() < 1e-12);
    }

    #[test]
    fn test_zero_factor_rows_cost_nothing() {
        let rates = rates_with_instance("test.large", 0.50);
        for row in [job(0.0, 10, 2), job(3.0, 0, 2), job(3.0, 10, 0)] {
            let cost = cost_job(&row, 0.60, &rates);
            assert_eq!(cost.dbu_cost, 0.0);
            assert_eq!(cost.instance_cost, 0.0);
        }
    }

    #[test]
    fn test_instance_cost_is_monotonic() {
        let rates = rates_with_instance("test.large", 0.25);
        let base = cost_job(&job(1.0, 5, 2), 0.15, &rates).instance_cost;

        assert!(cost_job(&job(1.5, 5, 2), 0.15, &rates).instance_cost >= base);
        assert!(cost_job(&job(1.0, 6, 2), 0.15, &rates).instance_cost >= base);
        assert!(cost_job(&job(1.0, 5, 3), 0.15, &rates).instance_cost >= base);
    }

    #[test]
    fn test_spot_reduces_instance_cost() {
        let rates = rates_with_instance("test.large", 0.50);
        let on_demand = cost_job(&job(2.0, 10, 4), 0.30, &rates);

        let mut spot_row = job(2.0, 10, 4);
        spot_row.spot_enabled = true;
        let spot = cost_job(&spot_row, 0.30, &rates);

        assert!(spot.instance_cost < on_demand.instance_cost);
        assert!((spot.instance_cost - on_demand.instance_cost * rates.spot_discount).abs() < 1e-9);
        assert_eq!(spot.dbu_cost, on_demand.dbu_cost);
    }

    #[test]
    fn test_photon_raises_effective_rate_only() {
        let rates = rates_with_instance("test.large", 0.50);
        let mut row = job(2.0, 10, 1);
        row.photon_enabled = true;
        let cost = cost_job(&row, 0.30, &rates);

        assert!((cost.effective_dbu_rate - 0.36).abs() < 1e-12);
        assert!((cost.dbu_cost - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_instance_type_prices_instances_at_zero() {
        let rates = RateCard::standard();
        let mut row = job(2.0, 10, 3);
        row.instance_type = "retired.type".to_string();
        let cost = cost_job(&row, 0.30, &rates);

        assert_eq!(cost.instance_cost, 0.0);
        assert!((cost.dbu_cost - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_tier_is_zero() {
        let costs = calculate_tier_costs(&[], 0.60, &RateCard::standard());
        assert!(costs.rows.is_empty());
        assert_eq!(costs.dbu_cost, 0.0);
        assert_eq!(costs.instance_cost, 0.0);
        assert_eq!(costs.total(), 0.0);
        assert!(!costs.dbu_cost.is_sign_negative());
        assert!(!costs.instance_cost.is_sign_negative());
    }

    #[test]
    fn test_all_tiers_empty_summary_is_positive_zero() {
        let mut workload = Workload::default();
        workload.jobs.clear();
        let costs = calculate_job_costs(&workload, &RateCard::standard());

        assert_eq!(costs.summary.job_count, 0);
        assert!(!costs.summary.dbu_cost.is_sign_negative());
        assert!(!costs.summary.instance_cost.is_sign_negative());
        assert!(!costs.total().is_sign_negative());
    }

    #[test]
    fn test_tier_totals_sum_rows() {
        let rates = rates_with_instance("test.large", 1.0);
        let rows = [job(1.0, 1, 1), job(2.0, 2, 2), job(0.5, 4, 1)];
        let costs = calculate_tier_costs(&rows, 0.15, &rates);

        assert_eq!(costs.rows.len(), 3);
        assert!((costs.dbu_cost - 11.0).abs() < 1e-9);
        assert!((costs.instance_cost - 11.0).abs() < 1e-9);
        assert_eq!(costs.rows[1].job.sequence_number, 1);
    }

    #[test]
    fn test_workload_summary_spans_tiers() {
        let rates = rates_with_instance("test.large", 0.50);
        let mut workload = Workload::default();
        workload.jobs.insert(Tier::Bronze, vec![job(2.0, 10, 1)]);
        workload.jobs.insert(Tier::Gold, vec![job(1.0, 4, 2)]);
        workload.jobs.remove(&Tier::Silver);

        let costs = calculate_job_costs(&workload, &rates);

        assert_eq!(costs.tiers.len(), 3);
        assert!(costs.tiers[&Tier::Silver].rows.is_empty());
        assert_eq!(costs.summary.job_count, 2);
        assert!((costs.summary.dbu_cost - 28.0).abs() < 1e-9);
        assert!((costs.summary.instance_cost - 14.0).abs() < 1e-9);
        assert!((costs.total() - 42.0).abs() < 1e-9);
    }
}
