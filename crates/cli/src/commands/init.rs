//! Workload template command

use anyhow::Result;
use estimator::{Tier, Workload};
use std::path::{Path, PathBuf};

use crate::config::{default_workload_path, save_workload};
use crate::output::{print_info, print_json, print_success, OutputFormat};

/// Build a default workload with `jobs` rows per tier and `warehouses` warehouses
pub fn template_workload(jobs: usize, warehouses: usize) -> Result<Workload> {
    let mut workload = Workload::default();

    for tier in Tier::ALL {
        workload.set_job_count(tier, jobs)?;
    }

    workload.warehouses.truncate(warehouses);
    while workload.warehouses.len() < warehouses {
        workload.add_warehouse();
    }

    Ok(workload)
}

/// Write a workload template to `output` or the default workload path
pub fn init_workload(
    output: Option<&Path>,
    jobs: usize,
    warehouses: usize,
    force: bool,
    format: OutputFormat,
) -> Result<()> {
    let workload = template_workload(jobs, warehouses)?;
    let path: PathBuf = match output {
        Some(path) => path.to_path_buf(),
        None => default_workload_path()?,
    };

    save_workload(&workload, &path, force)?;
    tracing::info!(path = %path.display(), jobs, warehouses, "Wrote workload template");

    match format {
        OutputFormat::Json => print_json(&workload)?,
        OutputFormat::Table => {
            print_success(&format!("Wrote workload template to {}", path.display()));
            print_info("Edit the file, then run `lakecost --workload <file> estimate`");
        }
    }

    Ok(())
}
