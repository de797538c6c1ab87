//! Workload defaults, row editing and validation
//!
//! The calculators never validate their input. Callers that accept
//! user-supplied workloads run [`Workload::validate`] once at the boundary.

use std::collections::{BTreeMap, HashSet};

use crate::error::{WorkloadError, WorkloadResult};
use crate::models::{
    DirectZone, JobRow, StorageClass, StorageConfig, StorageMethod, StorageUnit, TableZone, Tier,
    Warehouse, Workload,
};
use crate::rates::{default_instance_type, warehouse_size_labels};

/// Maximum number of job rows in a single tier
pub const MAX_JOBS_PER_TIER: usize = 20;

/// Upper bound for the monthly growth percentage
pub const MAX_GROWTH_PERCENT: f64 = 100.0;

pub const MAX_HOURS_PER_DAY: u32 = 24;
pub const MAX_DAYS_PER_MONTH: u32 = 31;

/// Storage zones in pipeline order with their default direct class and record size
const DEFAULT_ZONES: &[(&str, StorageClass, f64)] = &[
    ("Landing Zone", StorageClass::Standard, 1.0),
    ("L0 / Bronze", StorageClass::Standard, 1.5),
    ("L1 / Silver", StorageClass::InfrequentAccess, 2.0),
    ("L2 / Gold", StorageClass::Standard, 2.5),
];

const DEFAULT_AVG_RECORDS: u64 = 100_000;
const DEFAULT_HOURS_PER_DAY: u32 = 8;
const DEFAULT_DAYS_PER_MONTH: u32 = 22;
const DEFAULT_SUSPEND_AFTER_MINUTES: u32 = 10;

impl JobRow {
    /// Idle job row with one on-demand node of the default instance type
    pub fn new(sequence_number: u32, name: impl Into<String>) -> Self {
        Self {
            sequence_number,
            name: name.into(),
            runtime_hours: 0.0,
            runs_per_month: 0,
            instance_type: default_instance_type().to_string(),
            node_count: 1,
            photon_enabled: false,
            spot_enabled: false,
        }
    }
}

impl Warehouse {
    /// Smallest warehouse on a business-hours schedule with auto-suspend on
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size: smallest_warehouse_size(),
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            days_per_month: DEFAULT_DAYS_PER_MONTH,
            auto_suspend: true,
            suspend_after_minutes: DEFAULT_SUSPEND_AFTER_MINUTES,
        }
    }
}

fn smallest_warehouse_size() -> String {
    warehouse_size_labels().into_iter().next().unwrap_or_default()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            method: StorageMethod::Direct,
            direct: DEFAULT_ZONES
                .iter()
                .map(|(zone, class, _)| DirectZone {
                    zone: zone.to_string(),
                    class: *class,
                    amount: 0.0,
                    unit: StorageUnit::Gb,
                    put_thousands: 0.0,
                    get_thousands: 0.0,
                })
                .collect(),
            table_based: DEFAULT_ZONES
                .iter()
                .map(|(zone, _, size_kb)| TableZone {
                    zone: zone.to_string(),
                    tables: 0,
                    avg_records: DEFAULT_AVG_RECORDS,
                    avg_record_size_kb: *size_kb,
                })
                .collect(),
        }
    }
}

impl Default for Workload {
    /// Session starting point: one idle job per tier, empty storage zones
    /// and a single business-hours warehouse
    fn default() -> Self {
        let jobs = Tier::ALL
            .iter()
            .map(|tier| (*tier, vec![JobRow::new(1, format!("{} Job 1", tier.name()))]))
            .collect();

        Self {
            jobs,
            storage: StorageConfig::default(),
            warehouses: vec![Warehouse::new("warehouse_0", "Primary BI Warehouse")],
            growth_percent: 0.0,
        }
    }
}

impl Workload {
    /// Job rows for a tier, empty if the tier has none
    pub fn jobs(&self, tier: Tier) -> &[JobRow] {
        self.jobs.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of job rows across all tiers
    pub fn job_count(&self) -> usize {
        self.jobs.values().map(Vec::len).sum()
    }

    /// Grow or shrink a tier's job list to `count` rows
    ///
    /// New rows are appended as idle `New Job` rows; shrinking drops rows
    /// from the end.
    pub fn set_job_count(&mut self, tier: Tier, count: usize) -> WorkloadResult<()> {
        ensure_job_capacity(tier, count)?;

        let rows = self.jobs.entry(tier).or_default();
        if count > rows.len() {
            rows.resize_with(count, || JobRow::new(0, "New Job"));
        } else {
            rows.truncate(count);
        }
        resequence_rows(rows);
        Ok(())
    }

    /// Append a job row to a tier
    pub fn add_job(&mut self, tier: Tier, job: JobRow) -> WorkloadResult<()> {
        let rows = self.jobs.entry(tier).or_default();
        ensure_job_capacity(tier, rows.len() + 1)?;
        rows.push(job);
        resequence_rows(rows);
        Ok(())
    }

    /// Remove the job row at `index` (0-based) from a tier
    pub fn remove_job(&mut self, tier: Tier, index: usize) -> Option<JobRow> {
        let rows = self.jobs.get_mut(&tier)?;
        if index >= rows.len() {
            return None;
        }
        let removed = rows.remove(index);
        resequence_rows(rows);
        Some(removed)
    }

    /// Reassign sequence numbers in every tier to match list order
    pub fn resequence(&mut self) {
        for rows in self.jobs.values_mut() {
            resequence_rows(rows);
        }
    }

    /// Append a default `New Warehouse` and return it
    pub fn add_warehouse(&mut self) -> &Warehouse {
        let mut n = self.warehouses.len();
        while self.warehouses.iter().any(|w| w.id == format!("warehouse_{}", n)) {
            n += 1;
        }
        self.warehouses
            .push(Warehouse::new(format!("warehouse_{}", n), "New Warehouse"));
        &self.warehouses[self.warehouses.len() - 1]
    }

    /// Remove a warehouse by id
    pub fn remove_warehouse(&mut self, id: &str) -> Option<Warehouse> {
        let index = self.warehouses.iter().position(|w| w.id == id)?;
        Some(self.warehouses.remove(index))
    }

    /// Check the preconditions the calculators rely on
    pub fn validate(&self) -> WorkloadResult<()> {
        if !(0.0..=MAX_GROWTH_PERCENT).contains(&self.growth_percent) {
            return Err(WorkloadError::GrowthOutOfRange(self.growth_percent));
        }

        for (tier, rows) in &self.jobs {
            validate_jobs(*tier, rows)?;
        }

        for zone in &self.storage.direct {
            non_negative_storage(&zone.zone, "amount", zone.amount)?;
            non_negative_storage(&zone.zone, "PUT requests", zone.put_thousands)?;
            non_negative_storage(&zone.zone, "GET requests", zone.get_thousands)?;
        }
        for zone in &self.storage.table_based {
            non_negative_storage(&zone.zone, "average record size", zone.avg_record_size_kb)?;
        }

        let mut seen = HashSet::new();
        for warehouse in &self.warehouses {
            if !seen.insert(warehouse.id.as_str()) {
                return Err(WorkloadError::DuplicateWarehouseId(warehouse.id.clone()));
            }
            if warehouse.hours_per_day > MAX_HOURS_PER_DAY {
                return Err(WorkloadError::HoursPerDayOutOfRange {
                    id: warehouse.id.clone(),
                    value: warehouse.hours_per_day,
                    max: MAX_HOURS_PER_DAY,
                });
            }
            if warehouse.days_per_month > MAX_DAYS_PER_MONTH {
                return Err(WorkloadError::DaysPerMonthOutOfRange {
                    id: warehouse.id.clone(),
                    value: warehouse.days_per_month,
                    max: MAX_DAYS_PER_MONTH,
                });
            }
        }

        Ok(())
    }

    /// Per-tier job lists keyed for every tier, including empty ones
    pub fn jobs_by_tier(&self) -> BTreeMap<Tier, &[JobRow]> {
        Tier::ALL.iter().map(|tier| (*tier, self.jobs(*tier))).collect()
    }
}

fn ensure_job_capacity(tier: Tier, count: usize) -> WorkloadResult<()> {
    if count > MAX_JOBS_PER_TIER {
        return Err(WorkloadError::TooManyJobs {
            tier,
            count,
            max: MAX_JOBS_PER_TIER,
        });
    }
    Ok(())
}

fn resequence_rows(rows: &mut [JobRow]) {
    for (number, row) in (1u32..).zip(rows.iter_mut()) {
        row.sequence_number = number;
    }
}

fn validate_jobs(tier: Tier, rows: &[JobRow]) -> WorkloadResult<()> {
    ensure_job_capacity(tier, rows.len())?;

    for (position, (expected, row)) in (1u32..).zip(rows).enumerate() {
        if row.sequence_number != expected {
            return Err(WorkloadError::SequenceMismatch {
                tier,
                position: position + 1,
                found: row.sequence_number,
            });
        }
        if !is_non_negative_finite(row.runtime_hours) {
            return Err(WorkloadError::NegativeJobValue {
                tier,
                sequence: row.sequence_number,
                name: row.name.clone(),
                field: "runtime hours",
                value: row.runtime_hours,
            });
        }
        if row.node_count == 0 {
            return Err(WorkloadError::ZeroNodes {
                tier,
                sequence: row.sequence_number,
                name: row.name.clone(),
            });
        }
    }
    Ok(())
}

fn is_non_negative_finite(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn non_negative_storage(zone: &str, field: &'static str, value: f64) -> WorkloadResult<()> {
    if !is_non_negative_finite(value) {
        return Err(WorkloadError::NegativeStorageValue {
            zone: zone.to_string(),
            field,
            value,
        });
    }
    Ok(())
}
