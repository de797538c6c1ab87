//! SQL warehouse command

use anyhow::Result;
use colored::Colorize;
use estimator::calculator::Estimate;
use tabled::Tabled;

use crate::output::{
    format_currency, format_quantity, print_header, print_json, print_table, OutputFormat,
};

/// Row for the warehouse table
#[derive(Tabled)]
struct WarehouseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "DBU/hr")]
    dbu_per_hour: String,
    #[tabled(rename = "$/hr")]
    cost_per_hour: String,
    #[tabled(rename = "Billed Hours")]
    billed_hours: String,
    #[tabled(rename = "Monthly")]
    cost: String,
}

/// Show per-warehouse costs and the total
pub fn show_warehouses(estimate: &Estimate, format: OutputFormat) -> Result<()> {
    let warehouses = &estimate.warehouses;

    match format {
        OutputFormat::Json => print_json(warehouses)?,
        OutputFormat::Table => {
            print_header("Databricks SQL Warehouse Costs");

            let rows: Vec<WarehouseRow> = warehouses
                .warehouses
                .iter()
                .map(|w| WarehouseRow {
                    id: w.id.clone(),
                    name: w.name.clone(),
                    size: w.size.clone(),
                    dbu_per_hour: format_quantity(w.dbu_per_hour),
                    cost_per_hour: format_currency(w.cost_per_hour),
                    billed_hours: format_quantity(w.billed_hours),
                    cost: format_currency(w.cost),
                })
                .collect();
            print_table(rows);

            println!(
                "{}  {}/month",
                "Total SQL Warehouse Cost:".bold(),
                format_currency(warehouses.total).green().bold()
            );
            println!(
                "{}",
                format!("{} warehouse(s) configured", warehouses.warehouses.len()).dimmed()
            );
        }
    }

    Ok(())
}
