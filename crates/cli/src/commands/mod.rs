//! CLI subcommands

pub mod costs;
pub mod init;
pub mod jobs;
pub mod rates;
pub mod storage;
pub mod warehouses;
