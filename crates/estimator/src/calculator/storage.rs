//! S3 storage cost calculation

use serde::Serialize;

use crate::models::{DirectZone, StorageClass, StorageConfig, StorageMethod, TableZone};
use crate::rates::{RateCard, S3Pricing};

const KB_PER_GB: f64 = 1024.0 * 1024.0;

/// Cost of a single storage zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneCost {
    pub zone: String,
    pub storage_gb: f64,
    pub storage_cost: f64,
    pub request_cost: f64,
    pub cost: f64,
}

/// Per-zone costs for the active method, in zone order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageCosts {
    pub method: StorageMethod,
    pub zones: Vec<ZoneCost>,
    pub total: f64,
}

/// Price the zones of the active storage method
pub fn calculate_storage_costs(storage: &StorageConfig, rates: &RateCard) -> StorageCosts {
    let zones: Vec<ZoneCost> = match storage.method {
        StorageMethod::Direct => storage
            .direct
            .iter()
            .map(|zone| direct_zone_cost(zone, rates.s3(zone.class)))
            .collect(),
        StorageMethod::TableBased => {
            // Table-based sizing always prices at the Standard class
            let standard = rates.s3(StorageClass::Standard);
            storage
                .table_based
                .iter()
                .map(|zone| table_zone_cost(zone, standard))
                .collect()
        }
    };

    let total = zones.iter().fold(0.0, |acc, z| acc + z.cost);

    StorageCosts {
        method: storage.method,
        zones,
        total,
    }
}

fn direct_zone_cost(zone: &DirectZone, pricing: S3Pricing) -> ZoneCost {
    let storage_gb = zone.unit.to_gb(zone.amount);
    let storage_cost = storage_gb * pricing.storage_gb;
    let request_cost = zone.put_thousands * pricing.put_1k + zone.get_thousands * pricing.get_1k;

    ZoneCost {
        zone: zone.zone.clone(),
        storage_gb,
        storage_cost,
        request_cost,
        cost: storage_cost + request_cost,
    }
}

/// Estimated stored volume of a table-based zone
pub fn estimated_gb(zone: &TableZone) -> f64 {
    let total_records = zone.tables as f64 * zone.avg_records as f64;
    total_records * zone.avg_record_size_kb / KB_PER_GB
}

fn table_zone_cost(zone: &TableZone, standard: S3Pricing) -> ZoneCost {
    let storage_gb = estimated_gb(zone);
    let storage_cost = storage_gb * standard.storage_gb;

    ZoneCost {
        zone: zone.zone.clone(),
        storage_gb,
        storage_cost,
        request_cost: 0.0,
        cost: storage_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StorageUnit;

    fn direct(class: StorageClass, amount: f64, unit: StorageUnit, put: f64, get: f64) -> DirectZone {
        DirectZone {
            zone: "Landing Zone".to_string(),
            class,
            amount,
            unit,
            put_thousands: put,
            get_thousands: get,
        }
    }

    fn config(method: StorageMethod, direct: Vec<DirectZone>, table_based: Vec<TableZone>) -> StorageConfig {
        StorageConfig {
            method,
            direct,
            table_based,
        }
    }

    #[test]
    fn test_direct_standard_scenario() {
        let storage = config(
            StorageMethod::Direct,
            vec![direct(StorageClass::Standard, 100.0, StorageUnit::Gb, 10.0, 20.0)],
            vec![],
        );
        let costs = calculate_storage_costs(&storage, &RateCard::standard());

        assert_eq!(costs.zones.len(), 1);
        assert!((costs.zones[0].cost - 2.358).abs() < 1e-9);
        assert!((costs.total - 2.358).abs() < 1e-9);
        assert!((costs.zones[0].request_cost - 0.058).abs() < 1e-9);
    }

    #[test]
    fn test_terabytes_match_gigabytes() {
        let rates = RateCard::standard();
        for class in StorageClass::ALL {
            let tb = direct_zone_cost(&direct(class, 1.0, StorageUnit::Tb, 0.0, 0.0), rates.s3(class));
            let gb = direct_zone_cost(&direct(class, 1024.0, StorageUnit::Gb, 0.0, 0.0), rates.s3(class));
            assert_eq!(tb.storage_gb, gb.storage_gb);
            assert_eq!(tb.storage_cost, gb.storage_cost);
        }
    }

    #[test]
    fn test_missing_class_pricing_is_zero() {
        let mut rates = RateCard::standard();
        rates.s3_pricing.remove(&StorageClass::OneZoneIa);

        let storage = config(
            StorageMethod::Direct,
            vec![direct(StorageClass::OneZoneIa, 500.0, StorageUnit::Gb, 100.0, 100.0)],
            vec![],
        );
        assert_eq!(calculate_storage_costs(&storage, &rates).total, 0.0);
    }

    #[test]
    fn test_table_based_uses_standard_rate_and_ignores_direct_zones() {
        let zone = TableZone {
            zone: "L0 / Bronze".to_string(),
            tables: 64,
            avg_records: 1_048_576,
            avg_record_size_kb: 2.0,
        };
        let storage = config(
            StorageMethod::TableBased,
            vec![direct(StorageClass::GlacierDeepArchive, 10.0, StorageUnit::Tb, 50.0, 50.0)],
            vec![zone],
        );
        let costs = calculate_storage_costs(&storage, &RateCard::standard());

        assert_eq!(costs.method, StorageMethod::TableBased);
        assert_eq!(costs.zones.len(), 1);
        // 64 tables * 1Mi records * 2 KB = 128 GiB
        assert!((costs.zones[0].storage_gb - 128.0).abs() < 1e-9);
        assert!((costs.total - 128.0 * 0.023).abs() < 1e-9);
        assert_eq!(costs.zones[0].request_cost, 0.0);
    }

    #[test]
    fn test_direct_ignores_table_zones() {
        let storage = config(
            StorageMethod::Direct,
            vec![],
            vec![TableZone {
                zone: "L2 / Gold".to_string(),
                tables: 10,
                avg_records: 1000,
                avg_record_size_kb: 1.0,
            }],
        );
        let costs = calculate_storage_costs(&storage, &RateCard::standard());
        assert!(costs.zones.is_empty());
        assert_eq!(costs.total, 0.0);
        assert!(!costs.total.is_sign_negative());
    }

    #[test]
    fn test_zone_order_is_preserved() {
        let storage = StorageConfig::default();
        let costs = calculate_storage_costs(&storage, &RateCard::standard());
        let names: Vec<_> = costs.zones.iter().map(|z| z.zone.as_str()).collect();
        assert_eq!(names, ["Landing Zone", "L0 / Bronze", "L1 / Silver", "L2 / Gold"]);
        assert_eq!(costs.total, 0.0);
    }
}
