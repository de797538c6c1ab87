//! SQL warehouse cost calculation

use serde::Serialize;

use crate::models::Warehouse;
use crate::rates::RateCard;

/// Monthly cost of one warehouse
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseCost {
    pub id: String,
    pub name: String,
    pub size: String,
    pub dbu_per_hour: f64,
    pub cost_per_hour: f64,
    /// Hours billed per month; zero when the warehouse does not accrue cost
    pub billed_hours: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WarehouseCosts {
    pub warehouses: Vec<WarehouseCost>,
    pub total: f64,
}

/// Price a single warehouse
///
/// Cost accrues only with auto-suspend enabled and a non-empty schedule;
/// the suspend-after setting does not change the figure.
pub fn cost_warehouse(warehouse: &Warehouse, rates: &RateCard) -> WarehouseCost {
    let pricing = rates.warehouse(&warehouse.size);

    let billed_hours = if warehouse.accrues_cost() {
        f64::from(warehouse.hours_per_day) * f64::from(warehouse.days_per_month)
    } else {
        0.0
    };

    WarehouseCost {
        id: warehouse.id.clone(),
        name: warehouse.name.clone(),
        size: warehouse.size.clone(),
        dbu_per_hour: pricing.dbu_per_hour,
        cost_per_hour: pricing.cost_per_hour,
        billed_hours,
        cost: pricing.cost_per_hour * billed_hours,
    }
}

/// Price every warehouse and total them
pub fn calculate_warehouse_costs(warehouses: &[Warehouse], rates: &RateCard) -> WarehouseCosts {
    let warehouses: Vec<WarehouseCost> = warehouses
        .iter()
        .map(|w| cost_warehouse(w, rates))
        .collect();
    let total = warehouses.iter().fold(0.0, |acc, w| acc + w.cost);

    WarehouseCosts { warehouses, total }
}
