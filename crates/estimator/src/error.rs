//! Workload validation errors

use crate::models::Tier;

/// Precondition violations found in a workload configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkloadError {
    #[error("Unknown tier '{0}' (expected bronze, silver or gold)")]
    UnknownTier(String),

    #[error("{tier} has {count} jobs, at most {max} are allowed")]
    TooManyJobs { tier: Tier, count: usize, max: usize },

    #[error("{tier} job #{sequence} ({name}): {field} must be a finite non-negative number, got {value}")]
    NegativeJobValue {
        tier: Tier,
        sequence: u32,
        name: String,
        field: &'static str,
        value: f64,
    },

    #[error("{tier} job #{sequence} ({name}): node count must be at least 1")]
    ZeroNodes { tier: Tier, sequence: u32, name: String },

    #[error("{tier} job at position {position} has sequence number {found}")]
    SequenceMismatch { tier: Tier, position: usize, found: u32 },

    #[error("Storage zone '{zone}': {field} must be a finite non-negative number, got {value}")]
    NegativeStorageValue {
        zone: String,
        field: &'static str,
        value: f64,
    },

    #[error("Warehouse '{id}': hours per day must be between 0 and {max}, got {value}")]
    HoursPerDayOutOfRange { id: String, value: u32, max: u32 },

    #[error("Warehouse '{id}': days per month must be between 0 and {max}, got {value}")]
    DaysPerMonthOutOfRange { id: String, value: u32, max: u32 },

    #[error("Duplicate warehouse id '{0}'")]
    DuplicateWarehouseId(String),

    #[error("Monthly growth must be between 0 and 100 percent, got {0}")]
    GrowthOutOfRange(f64),
}

/// Result type alias
pub type WorkloadResult<T> = Result<T, WorkloadError>;
