//! S3 storage command

use anyhow::Result;
use colored::Colorize;
use estimator::calculator::Estimate;
use tabled::Tabled;

use crate::output::{
    format_currency, format_quantity, print_header, print_json, print_table, OutputFormat,
};

/// Row for the storage zone table
#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Stored (GB)")]
    storage_gb: String,
    #[tabled(rename = "Storage")]
    storage_cost: String,
    #[tabled(rename = "Requests")]
    request_cost: String,
    #[tabled(rename = "Monthly")]
    cost: String,
}

/// Show per-zone storage costs for the active method
pub fn show_storage(estimate: &Estimate, format: OutputFormat) -> Result<()> {
    let storage = &estimate.storage;

    match format {
        OutputFormat::Json => print_json(storage)?,
        OutputFormat::Table => {
            print_header("AWS S3 Storage Costs");
            println!("Calculation method:     {}", storage.method.to_string().cyan());
            println!();

            let rows: Vec<ZoneRow> = storage
                .zones
                .iter()
                .map(|z| ZoneRow {
                    zone: z.zone.clone(),
                    storage_gb: format_quantity(z.storage_gb),
                    storage_cost: format_currency(z.storage_cost),
                    request_cost: format_currency(z.request_cost),
                    cost: format_currency(z.cost),
                })
                .collect();
            print_table(rows);

            println!(
                "{}  {}/month",
                "Total S3 Storage Cost:".bold(),
                format_currency(storage.total).green().bold()
            );
        }
    }

    Ok(())
}
