//! Static rate tables
//!
//! Every lookup defaults to zero on a missing key so that stale
//! configuration degrades to a zero cost instead of failing.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{StorageClass, Tier};

/// Multiplier applied to the DBU rate when Photon is enabled (+20%)
pub const PHOTON_PREMIUM_MULTIPLIER: f64 = 1.2;

/// Multiplier applied to the instance rate for spot capacity (~70% saving)
pub const SPOT_DISCOUNT_MULTIPLIER: f64 = 0.3;

/// Dollar price of one SQL warehouse DBU
pub const SQL_DBU_PRICE: f64 = 0.22;

/// Separator between the size key and its description in a warehouse size label
pub const SIZE_SEPARATOR: &str = " - ";

/// Instance types and their on-demand hourly rates, in option-list order
pub const INSTANCE_TYPES: &[(&str, f64)] = &[
    ("m5.xlarge", 0.192),
    ("m5.2xlarge", 0.384),
    ("m5.4xlarge", 0.768),
    ("m5.8xlarge", 1.536),
    ("c5.xlarge", 0.17),
    ("c5.2xlarge", 0.34),
    ("c5.4xlarge", 0.68),
    ("c5.9xlarge", 1.53),
    ("r5.xlarge", 0.252),
    ("r5.2xlarge", 0.504),
    ("r5.4xlarge", 1.008),
    ("r5d.xlarge", 0.288),
    ("r5d.2xlarge", 0.576),
    ("r5d.4xlarge", 1.152),
];

/// Warehouse size keys and their DBU consumption per hour, smallest first
pub const WAREHOUSE_SIZES: &[(&str, f64)] = &[
    ("2X-Small", 4.0),
    ("X-Small", 6.0),
    ("Small", 12.0),
    ("Medium", 24.0),
    ("Large", 40.0),
    ("X-Large", 80.0),
    ("2X-Large", 144.0),
    ("3X-Large", 272.0),
    ("4X-Large", 528.0),
];

/// Default instance type for new job rows
pub fn default_instance_type() -> &'static str {
    INSTANCE_TYPES[0].0
}

/// Display label for a warehouse size, e.g. `Small - 12 DBU`
pub fn warehouse_size_label(key: &str, dbu_per_hour: f64) -> String {
    format!("{}{}{} DBU", key, SIZE_SEPARATOR, dbu_per_hour)
}

/// All warehouse size labels, smallest first
pub fn warehouse_size_labels() -> Vec<String> {
    WAREHOUSE_SIZES
        .iter()
        .map(|(key, dbu)| warehouse_size_label(key, *dbu))
        .collect()
}

/// Extract the pricing key from a warehouse size label
pub fn size_key(label: &str) -> &str {
    label
        .split_once(SIZE_SEPARATOR)
        .map_or(label, |(key, _)| key)
        .trim()
}

/// Per-class S3 prices
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct S3Pricing {
    /// Dollars per GB-month stored
    pub storage_gb: f64,
    /// Dollars per 1,000 PUT requests
    pub put_1k: f64,
    /// Dollars per 1,000 GET requests
    pub get_1k: f64,
}

/// Per-size SQL warehouse prices
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WarehousePricing {
    pub dbu_per_hour: f64,
    pub cost_per_hour: f64,
}

/// Immutable set of rate tables handed to every calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateCard {
    pub dbu_rates: BTreeMap<Tier, f64>,
    pub instance_rates: BTreeMap<String, f64>,
    pub s3_pricing: BTreeMap<StorageClass, S3Pricing>,
    pub warehouse_pricing: BTreeMap<String, WarehousePricing>,
    pub photon_premium: f64,
    pub spot_discount: f64,
}

impl RateCard {
    /// Built-in published rates
    pub fn standard() -> Self {
        let dbu_rates = BTreeMap::from([
            (Tier::Bronze, 0.15),
            (Tier::Silver, 0.30),
            (Tier::Gold, 0.60),
        ]);

        let instance_rates = INSTANCE_TYPES
            .iter()
            .map(|(name, rate)| (name.to_string(), *rate))
            .collect();

        let s3 = |storage_gb, put_1k, get_1k| S3Pricing {
            storage_gb,
            put_1k,
            get_1k,
        };
        let s3_pricing = BTreeMap::from([
            (StorageClass::Standard, s3(0.023, 0.005, 0.0004)),
            (StorageClass::IntelligentTiering, s3(0.023, 0.005, 0.0004)),
            (StorageClass::InfrequentAccess, s3(0.0125, 0.01, 0.001)),
            (StorageClass::OneZoneIa, s3(0.01, 0.01, 0.001)),
            (StorageClass::GlacierInstantRetrieval, s3(0.004, 0.02, 0.01)),
            (StorageClass::GlacierFlexibleRetrieval, s3(0.0036, 0.03, 0.0004)),
            (StorageClass::GlacierDeepArchive, s3(0.00099, 0.05, 0.0004)),
        ]);

        let warehouse_pricing = WAREHOUSE_SIZES
            .iter()
            .map(|(key, dbu)| {
                (
                    key.to_string(),
                    WarehousePricing {
                        dbu_per_hour: *dbu,
                        cost_per_hour: dbu * SQL_DBU_PRICE,
                    },
                )
            })
            .collect();

        Self {
            dbu_rates,
            instance_rates,
            s3_pricing,
            warehouse_pricing,
            photon_premium: PHOTON_PREMIUM_MULTIPLIER,
            spot_discount: SPOT_DISCOUNT_MULTIPLIER,
        }
    }

    /// Base DBU rate for a tier
    pub fn dbu_rate(&self, tier: Tier) -> f64 {
        self.dbu_rates.get(&tier).copied().unwrap_or_else(|| {
            debug!(tier = %tier, "No DBU rate for tier, pricing at zero");
            0.0
        })
    }

    /// On-demand hourly rate for an instance type
    pub fn instance_rate(&self, instance_type: &str) -> f64 {
        self.instance_rates
            .get(instance_type)
            .copied()
            .unwrap_or_else(|| {
                debug!(instance_type = %instance_type, "Unknown instance type, pricing at zero");
                0.0
            })
    }

    /// S3 prices for a storage class
    pub fn s3(&self, class: StorageClass) -> S3Pricing {
        self.s3_pricing.get(&class).copied().unwrap_or_else(|| {
            debug!(class = %class, "No S3 pricing for storage class, pricing at zero");
            S3Pricing::default()
        })
    }

    /// Warehouse prices for a size label such as `Medium - 24 DBU`
    pub fn warehouse(&self, size_label: &str) -> WarehousePricing {
        let key = size_key(size_label);
        self.warehouse_pricing
            .get(key)
            .copied()
            .unwrap_or_else(|| {
                debug!(size = %size_label, "Unknown warehouse size, pricing at zero");
                WarehousePricing::default()
            })
    }
}

impl Default for RateCard {
    fn default() -> Self {
        Self::standard()
    }
}
