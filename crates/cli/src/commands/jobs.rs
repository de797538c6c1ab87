//! Job compute commands

use anyhow::Result;
use colored::Colorize;
use estimator::calculator::{Estimate, TierCosts};
use estimator::Tier;
use tabled::Tabled;

use crate::output::{
    format_currency, format_flag, format_quantity, print_header, print_json, print_section,
    print_table, OutputFormat,
};

/// Row for a tier's job table
#[derive(Tabled)]
struct JobRowDisplay {
    #[tabled(rename = "#")]
    sequence: u32,
    #[tabled(rename = "Job Name")]
    name: String,
    #[tabled(rename = "Runtime (hrs)")]
    runtime: String,
    #[tabled(rename = "Runs/Month")]
    runs: u32,
    #[tabled(rename = "Instance Type")]
    instance_type: String,
    #[tabled(rename = "Nodes")]
    nodes: u32,
    #[tabled(rename = "Photon")]
    photon: String,
    #[tabled(rename = "Spot")]
    spot: String,
    #[tabled(rename = "DBU Rate")]
    dbu_rate: String,
    #[tabled(rename = "DBU Cost")]
    dbu_cost: String,
    #[tabled(rename = "EC2 Cost")]
    instance_cost: String,
    #[tabled(rename = "Total")]
    total: String,
}

/// Show per-tier job breakdowns, optionally for a single tier
pub fn show_jobs(estimate: &Estimate, tier: Option<Tier>, format: OutputFormat) -> Result<()> {
    let tiers: Vec<(&Tier, &TierCosts)> = estimate
        .jobs
        .tiers
        .iter()
        .filter(|(t, _)| tier.map_or(true, |wanted| **t == wanted))
        .collect();

    match format {
        OutputFormat::Json => match tier {
            Some(wanted) => print_json(&estimate.jobs.tiers.get(&wanted))?,
            None => print_json(&estimate.jobs)?,
        },
        OutputFormat::Table => {
            print_header("Databricks & Compute Costs");
            let summary = &estimate.jobs.summary;
            println!("Total Jobs:             {}", summary.job_count);
            println!("DBU Costs:              {}", format_currency(summary.dbu_cost));
            println!("EC2 Costs:              {}", format_currency(summary.instance_cost));
            println!(
                "{}  {}",
                "Monthly Total:       ".bold(),
                format_currency(summary.total_cost).green().bold()
            );
            println!();

            for (t, costs) in tiers {
                print_section(&format!("{}  {}", t.label(), format_currency(costs.total())));

                let rows: Vec<JobRowDisplay> = costs
                    .rows
                    .iter()
                    .map(|row| JobRowDisplay {
                        sequence: row.job.sequence_number,
                        name: row.job.name.clone(),
                        runtime: format_quantity(row.job.runtime_hours),
                        runs: row.job.runs_per_month,
                        instance_type: row.job.instance_type.clone(),
                        nodes: row.job.node_count,
                        photon: format_flag(row.job.photon_enabled),
                        spot: format_flag(row.job.spot_enabled),
                        dbu_rate: format!("${:.4}", row.effective_dbu_rate),
                        dbu_cost: format_currency(row.dbu_cost),
                        instance_cost: format_currency(row.instance_cost),
                        total: format_currency(row.total_cost),
                    })
                    .collect();
                print_table(rows);
                println!();
            }
        }
    }

    Ok(())
}
