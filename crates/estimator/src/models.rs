//! Core data models for workload configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::WorkloadError;

/// Pricing tier a job runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    /// All tiers in display order
    pub const ALL: [Tier; 3] = [Tier::Bronze, Tier::Silver, Tier::Gold];

    /// Short tier name, e.g. `Silver`
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
        }
    }

    /// Layered label used in reports, e.g. `L1 / Silver`
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Bronze => "L0 / Bronze",
            Tier::Silver => "L1 / Silver",
            Tier::Gold => "L2 / Gold",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bronze" | "l0" => Ok(Tier::Bronze),
            "silver" | "l1" => Ok(Tier::Silver),
            "gold" | "l2" => Ok(Tier::Gold),
            _ => Err(WorkloadError::UnknownTier(s.to_string())),
        }
    }
}

// Parsed from text so tiers work as map keys in any configuration format
impl TryFrom<String> for Tier {
    type Error = WorkloadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One scheduled compute job within a tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRow {
    /// 1-based position in the tier's job list, reassigned on every add/remove
    #[serde(default)]
    pub sequence_number: u32,
    pub name: String,
    /// Duration of a single run
    pub runtime_hours: f64,
    pub runs_per_month: u32,
    /// Key into the instance rate table
    pub instance_type: String,
    pub node_count: u32,
    #[serde(default)]
    pub photon_enabled: bool,
    #[serde(default)]
    pub spot_enabled: bool,
}

impl JobRow {
    /// Node-hours consumed per month
    pub fn node_hours(&self) -> f64 {
        self.runtime_hours * f64::from(self.runs_per_month) * f64::from(self.node_count)
    }
}

/// Storage class key into the S3 pricing table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StorageClass {
    #[serde(rename = "Standard")]
    Standard,
    #[serde(rename = "Intelligent-Tiering")]
    IntelligentTiering,
    #[serde(rename = "Infrequent Access")]
    InfrequentAccess,
    #[serde(rename = "One Zone-IA")]
    OneZoneIa,
    #[serde(rename = "Glacier Instant Retrieval")]
    GlacierInstantRetrieval,
    #[serde(rename = "Glacier Flexible Retrieval")]
    GlacierFlexibleRetrieval,
    #[serde(rename = "Glacier Deep Archive")]
    GlacierDeepArchive,
}

impl StorageClass {
    pub const ALL: [StorageClass; 7] = [
        StorageClass::Standard,
        StorageClass::IntelligentTiering,
        StorageClass::InfrequentAccess,
        StorageClass::OneZoneIa,
        StorageClass::GlacierInstantRetrieval,
        StorageClass::GlacierFlexibleRetrieval,
        StorageClass::GlacierDeepArchive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StorageClass::Standard => "Standard",
            StorageClass::IntelligentTiering => "Intelligent-Tiering",
            StorageClass::InfrequentAccess => "Infrequent Access",
            StorageClass::OneZoneIa => "One Zone-IA",
            StorageClass::GlacierInstantRetrieval => "Glacier Instant Retrieval",
            StorageClass::GlacierFlexibleRetrieval => "Glacier Flexible Retrieval",
            StorageClass::GlacierDeepArchive => "Glacier Deep Archive",
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unit for a directly entered storage amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StorageUnit {
    #[default]
    #[serde(rename = "GB")]
    Gb,
    #[serde(rename = "TB")]
    Tb,
}

impl StorageUnit {
    /// Normalize an amount in this unit to gigabytes
    pub fn to_gb(self, amount: f64) -> f64 {
        match self {
            StorageUnit::Gb => amount,
            StorageUnit::Tb => amount * 1024.0,
        }
    }
}

impl fmt::Display for StorageUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageUnit::Gb => f.write_str("GB"),
            StorageUnit::Tb => f.write_str("TB"),
        }
    }
}

/// Storage zone sized from explicit stored volume and request counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectZone {
    pub zone: String,
    pub class: StorageClass,
    pub amount: f64,
    #[serde(default)]
    pub unit: StorageUnit,
    /// PUT requests, in thousands
    #[serde(default)]
    pub put_thousands: f64,
    /// GET requests, in thousands
    #[serde(default)]
    pub get_thousands: f64,
}

/// Storage zone sized from table and record counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableZone {
    pub zone: String,
    pub tables: u64,
    pub avg_records: u64,
    pub avg_record_size_kb: f64,
}

/// Estimation method for the whole storage section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMethod {
    #[default]
    Direct,
    TableBased,
}

impl fmt::Display for StorageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageMethod::Direct => f.write_str("Direct Storage"),
            StorageMethod::TableBased => f.write_str("Table-Based"),
        }
    }
}

/// Storage configuration; only the zones of the active method are priced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub method: StorageMethod,
    #[serde(default)]
    pub direct: Vec<DirectZone>,
    #[serde(default)]
    pub table_based: Vec<TableZone>,
}

/// Managed SQL warehouse usage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: String,
    pub name: String,
    /// Size label such as `Small - 12 DBU`
    pub size: String,
    pub hours_per_day: u32,
    pub days_per_month: u32,
    #[serde(default)]
    pub auto_suspend: bool,
    /// Idle minutes before suspension; informational only
    #[serde(default)]
    pub suspend_after_minutes: u32,
}

impl Warehouse {
    /// Whether this warehouse is billed at all
    pub fn accrues_cost(&self) -> bool {
        self.auto_suspend && self.hours_per_day > 0 && self.days_per_month > 0
    }
}

/// Complete what-if configuration passed to the calculators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workload {
    pub jobs: BTreeMap<Tier, Vec<JobRow>>,
    pub storage: StorageConfig,
    pub warehouses: Vec<Warehouse>,
    /// Expected monthly growth of job and storage spend, in percent
    pub growth_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parsing() {
        assert_eq!("gold".parse::<Tier>().unwrap(), Tier::Gold);
        assert_eq!(" Bronze ".parse::<Tier>().unwrap(), Tier::Bronze);
        assert_eq!("L1".parse::<Tier>().unwrap(), Tier::Silver);
        assert!(matches!(
            "platinum".parse::<Tier>(),
            Err(WorkloadError::UnknownTier(_))
        ));
    }

    #[test]
    fn test_tier_map_keys_deserialize() {
        let jobs: BTreeMap<Tier, Vec<JobRow>> =
            serde_json::from_str(r#"{"gold": [], "Bronze": []}"#).unwrap();
        assert_eq!(jobs.keys().copied().collect::<Vec<_>>(), [Tier::Bronze, Tier::Gold]);
        assert_eq!(serde_json::to_string(&Tier::Silver).unwrap(), r#""silver""#);
    }

    #[test]
    fn test_tier_ordering_matches_layers() {
        let mut tiers = vec![Tier::Gold, Tier::Bronze, Tier::Silver];
        tiers.sort();
        assert_eq!(tiers, Tier::ALL.to_vec());
        assert_eq!(Tier::Silver.to_string(), "L1 / Silver");
    }

    #[test]
    fn test_storage_unit_conversion() {
        assert_eq!(StorageUnit::Gb.to_gb(512.0), 512.0);
        assert_eq!(StorageUnit::Tb.to_gb(2.0), 2048.0);
    }

    #[test]
    fn test_warehouse_accrual_requires_all_conditions() {
        let mut warehouse = Warehouse {
            id: "warehouse_0".to_string(),
            name: "BI".to_string(),
            size: "Small - 12 DBU".to_string(),
            hours_per_day: 8,
            days_per_month: 22,
            auto_suspend: true,
            suspend_after_minutes: 10,
        };
        assert!(warehouse.accrues_cost());

        warehouse.days_per_month = 0;
        assert!(!warehouse.accrues_cost());

        warehouse.days_per_month = 22;
        warehouse.auto_suspend = false;
        assert!(!warehouse.accrues_cost());
    }

    #[test]
    fn test_job_row_deserializes_with_defaults() {
        let json = r#"{
            "name": "ingest",
            "runtime_hours": 1.5,
            "runs_per_month": 30,
            "instance_type": "m5.xlarge",
            "node_count": 2
        }"#;
        let job: JobRow = serde_json::from_str(json).unwrap();
        assert_eq!(job.sequence_number, 0);
        assert!(!job.photon_enabled);
        assert!(!job.spot_enabled);
        assert_eq!(job.node_hours(), 90.0);
    }

    #[test]
    fn test_storage_labels_round_trip_through_serde() {
        let zone: DirectZone = serde_json::from_str(
            r#"{"zone": "Landing Zone", "class": "Infrequent Access", "amount": 3, "unit": "TB"}"#,
        )
        .unwrap();
        assert_eq!(zone.class, StorageClass::InfrequentAccess);
        assert_eq!(zone.unit, StorageUnit::Tb);
        assert_eq!(zone.put_thousands, 0.0);

        let method: StorageMethod = serde_json::from_str(r#""table_based""#).unwrap();
        assert_eq!(method, StorageMethod::TableBased);
    }
}
