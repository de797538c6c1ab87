//! Workload file management for the CLI

use anyhow::{Context, Result};
use estimator::Workload;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment prefix for workload overrides, e.g. `LAKECOST__GROWTH_PERCENT=2.5`
const ENV_PREFIX: &str = "LAKECOST";
const ENV_SEPARATOR: &str = "__";

/// Where the workload for this run comes from
#[derive(Debug, Clone, PartialEq)]
pub enum WorkloadSource {
    /// Built-in session defaults
    Defaults,
    /// A JSON, TOML or YAML workload file
    File(PathBuf),
}

impl fmt::Display for WorkloadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadSource::Defaults => f.write_str("defaults"),
            WorkloadSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Get the default workload file path
pub fn default_workload_path() -> Result<PathBuf> {
    let home = dirs_next::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("lakecost").join("workload.json"))
}

/// Pick the workload source: an explicit path, the default file if present, or defaults
pub fn resolve_source(explicit: Option<&Path>) -> Result<WorkloadSource> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Workload file not found: {}", path.display());
        }
        return Ok(WorkloadSource::File(path.to_path_buf()));
    }

    match default_workload_path() {
        Ok(path) if path.exists() => Ok(WorkloadSource::File(path)),
        _ => Ok(WorkloadSource::Defaults),
    }
}

/// Load a workload, layering environment overrides on top of the source
///
/// Fields missing from the file take their session defaults. Sequence
/// numbers are reassigned from list order.
pub fn load_workload(source: &WorkloadSource) -> Result<Workload> {
    let mut builder = config::Config::builder();

    if let WorkloadSource::File(path) = source {
        builder = builder.add_source(config::File::from(path.as_path()).required(true));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("Failed to read workload from {}", source))?;

    let mut workload: Workload = settings
        .try_deserialize()
        .with_context(|| format!("Failed to parse workload from {}", source))?;

    workload.resequence();
    Ok(workload)
}

/// Write a workload as pretty JSON
pub fn save_workload(workload: &Workload, path: &Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).context("Failed to create workload directory")?;
        }
    }

    let content = serde_json::to_string_pretty(workload).context("Failed to serialize workload")?;
    std::fs::write(path, content).context("Failed to write workload file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimator::{StorageClass, StorageMethod, Tier};
    use tempfile::TempDir;

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(resolve_source(Some(&missing)).is_err());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("workload.json");

        let mut workload = Workload::default();
        workload.set_job_count(Tier::Gold, 3).unwrap();
        workload.storage.method = StorageMethod::TableBased;
        workload.storage.direct[0].class = StorageClass::GlacierDeepArchive;
        workload.growth_percent = 1.5;
        save_workload(&workload, &path, false).unwrap();

        let source = resolve_source(Some(&path)).unwrap();
        assert_eq!(source, WorkloadSource::File(path.clone()));

        let loaded = load_workload(&source).unwrap();
        assert_eq!(loaded.jobs(Tier::Gold).len(), 3);
        assert_eq!(loaded.storage.method, StorageMethod::TableBased);
        assert_eq!(loaded.storage.direct[0].class, StorageClass::GlacierDeepArchive);
        assert_eq!(loaded.growth_percent, 1.5);
    }

    #[test]
    fn test_save_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("workload.json");
        std::fs::write(&path, "{}").unwrap();

        assert!(save_workload(&Workload::default(), &path, false).is_err());
        assert!(save_workload(&Workload::default(), &path, true).is_ok());
    }

    #[test]
    fn test_partial_file_takes_defaults_and_resequences() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(
            &path,
            r#"{
                "jobs": {
                    "silver": [
                        {"sequence_number": 7, "name": "a", "runtime_hours": 1,
                         "runs_per_month": 4, "instance_type": "c5.xlarge", "node_count": 2},
                        {"name": "b", "runtime_hours": 0.5,
                         "runs_per_month": 8, "instance_type": "r5.xlarge", "node_count": 1}
                    ]
                }
            }"#,
        )
        .unwrap();

        let workload = load_workload(&WorkloadSource::File(path)).unwrap();
        let numbers: Vec<u32> = workload
            .jobs(Tier::Silver)
            .iter()
            .map(|j| j.sequence_number)
            .collect();
        assert_eq!(numbers, [1, 2]);
        assert_eq!(workload.warehouses.len(), 1);
        assert_eq!(workload.storage.direct.len(), 4);
        assert!(workload.validate().is_ok());
    }

    #[test]
    fn test_toml_workload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("workload.toml");
        std::fs::write(
            &path,
            r#"
growth_percent = 4

[[warehouses]]
id = "bi"
name = "BI"
size = "Medium - 24 DBU"
hours_per_day = 10
days_per_month = 20
auto_suspend = true
"#,
        )
        .unwrap();

        let workload = load_workload(&WorkloadSource::File(path)).unwrap();
        assert_eq!(workload.growth_percent, 4.0);
        assert_eq!(workload.warehouses.len(), 1);
        assert_eq!(workload.warehouses[0].size, "Medium - 24 DBU");
        assert_eq!(workload.warehouses[0].suspend_after_minutes, 0);
    }

    #[test]
    fn test_infinite_runtime_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("workload.toml");
        std::fs::write(
            &path,
            r#"
[[jobs.silver]]
name = "runaway"
runtime_hours = inf
runs_per_month = 4
instance_type = "m5.xlarge"
node_count = 1
"#,
        )
        .unwrap();

        let workload = load_workload(&WorkloadSource::File(path)).unwrap();
        assert!(workload.jobs(Tier::Silver)[0].runtime_hours.is_infinite());
        assert!(workload.validate().is_err());
    }
}
