//! Summary and projection commands

use anyhow::Result;
use colored::Colorize;
use estimator::calculator::Estimate;
use tabled::Tabled;

use crate::output::{
    format_currency, format_percent, format_timestamp, print_header, print_info, print_json,
    print_section, print_table, OutputFormat,
};

/// Row for the cost distribution table
#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Monthly")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Row for the month-by-month projection table
#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: u32,
    #[tabled(rename = "Jobs + S3")]
    growing: String,
    #[tabled(rename = "SQL Warehouse")]
    fixed: String,
    #[tabled(rename = "Total")]
    total: String,
}

/// Show monthly totals, the 12-month projection and cost distribution
pub fn show_estimate(estimate: &Estimate, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(estimate)?,
        OutputFormat::Table => {
            let totals = &estimate.totals;

            print_header("Cloud Cost Estimate");
            println!();

            print_section("Monthly Costs");
            println!("Databricks & Compute:   {}", format_currency(totals.databricks));
            println!("S3 Storage:             {}", format_currency(totals.storage));
            println!("SQL Warehouse:          {}", format_currency(totals.warehouse));
            println!(
                "{}  {}",
                "Total Cloud Cost:     ".bold(),
                format_currency(totals.grand_total).green().bold()
            );
            println!();

            print_section("Growth Projection");
            println!(
                "Monthly growth:         {} (Databricks + S3)",
                format_percent(estimate.growth_percent)
            );
            println!(
                "{}  {}",
                "12-Month Projected:   ".bold(),
                format_currency(estimate.projected_annual).cyan().bold()
            );
            println!();

            print_section("Cost Distribution");
            if estimate.distribution.is_empty() {
                print_info("No costs configured yet.");
            } else {
                let rows: Vec<ShareRow> = estimate
                    .distribution
                    .iter()
                    .map(|share| ShareRow {
                        category: share.category.label().to_string(),
                        amount: format_currency(share.amount),
                        share: format_percent(share.share_percent),
                    })
                    .collect();
                print_table(rows);
            }

            println!();
            println!(
                "Generated: {}",
                format_timestamp(&estimate.generated_at).dimmed()
            );
        }
    }

    Ok(())
}

/// Show the month-by-month projection schedule
pub fn show_projection(estimate: &Estimate, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&estimate.schedule)?,
        OutputFormat::Table => {
            print_header("12-Month Projection");
            println!(
                "Monthly growth:         {} (SQL Warehouse held flat)",
                format_percent(estimate.growth_percent)
            );
            println!();

            let rows: Vec<MonthRow> = estimate
                .schedule
                .iter()
                .map(|m| MonthRow {
                    month: m.month,
                    growing: format_currency(m.growing_cost),
                    fixed: format_currency(m.fixed_cost),
                    total: format_currency(m.total),
                })
                .collect();
            print_table(rows);

            println!(
                "{}  {}",
                "Projected Total:".bold(),
                format_currency(estimate.projected_annual).green().bold()
            );
        }
    }

    Ok(())
}
