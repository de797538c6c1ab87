//! Rate table command

use anyhow::Result;
use estimator::rates::{size_key, warehouse_size_labels, INSTANCE_TYPES};
use estimator::{RateCard, StorageClass, Tier};
use tabled::Tabled;

use crate::output::{
    format_currency, format_quantity, print_header, print_json, print_section, print_table,
    OutputFormat,
};

#[derive(Tabled)]
struct TierRateRow {
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "DBU Rate")]
    rate: String,
    #[tabled(rename = "With Photon")]
    photon_rate: String,
}

#[derive(Tabled)]
struct InstanceRateRow {
    #[tabled(rename = "Instance Type")]
    instance_type: String,
    #[tabled(rename = "On-Demand $/hr")]
    on_demand: String,
    #[tabled(rename = "Spot $/hr")]
    spot: String,
}

#[derive(Tabled)]
struct S3RateRow {
    #[tabled(rename = "Storage Class")]
    class: String,
    #[tabled(rename = "$/GB-month")]
    storage: String,
    #[tabled(rename = "$/1k PUT")]
    put: String,
    #[tabled(rename = "$/1k GET")]
    get: String,
}

#[derive(Tabled)]
struct WarehouseRateRow {
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "DBU/hr")]
    dbu_per_hour: String,
    #[tabled(rename = "$/hr")]
    cost_per_hour: String,
}

/// Show the rate tables and option lists used for pricing
pub fn show_rates(rates: &RateCard, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(rates)?,
        OutputFormat::Table => {
            print_header("Rate Card");
            println!(
                "Photon premium:         x{} DBU rate",
                format_quantity(rates.photon_premium)
            );
            println!(
                "Spot discount:          x{} instance rate",
                format_quantity(rates.spot_discount)
            );
            println!();

            print_section("DBU Rates");
            let rows: Vec<TierRateRow> = Tier::ALL
                .iter()
                .map(|tier| {
                    let rate = rates.dbu_rate(*tier);
                    TierRateRow {
                        tier: tier.label().to_string(),
                        rate: format!("${:.4}", rate),
                        photon_rate: format!("${:.4}", rate * rates.photon_premium),
                    }
                })
                .collect();
            print_table(rows);
            println!();

            print_section("Instance Types");
            let rows: Vec<InstanceRateRow> = INSTANCE_TYPES
                .iter()
                .map(|(name, _)| {
                    let rate = rates.instance_rate(name);
                    InstanceRateRow {
                        instance_type: name.to_string(),
                        on_demand: format!("${:.4}", rate),
                        spot: format!("${:.4}", rate * rates.spot_discount),
                    }
                })
                .collect();
            print_table(rows);
            println!();

            print_section("S3 Storage Classes");
            let rows: Vec<S3RateRow> = StorageClass::ALL
                .iter()
                .map(|class| {
                    let pricing = rates.s3(*class);
                    S3RateRow {
                        class: class.label().to_string(),
                        storage: format!("${:.5}", pricing.storage_gb),
                        put: format!("${:.4}", pricing.put_1k),
                        get: format!("${:.4}", pricing.get_1k),
                    }
                })
                .collect();
            print_table(rows);
            println!();

            print_section("SQL Warehouse Sizes");
            let rows: Vec<WarehouseRateRow> = warehouse_size_labels()
                .into_iter()
                .map(|label| {
                    let pricing = rates.warehouse(&label);
                    WarehouseRateRow {
                        size: size_key(&label).to_string(),
                        dbu_per_hour: format_quantity(pricing.dbu_per_hour),
                        cost_per_hour: format_currency(pricing.cost_per_hour),
                    }
                })
                .collect();
            print_table(rows);
        }
    }

    Ok(())
}
